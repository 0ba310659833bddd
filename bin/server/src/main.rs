use hotel_jina_ai::ConciergeResolver;
use hotel_jina_conversation::{InMemorySessionRegistry, SessionRegistry};
use hotel_jina_server::{config::ServerConfig, create_router, state::AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ServerConfig::from_env().expect("failed to load configuration");
    tracing::info!(?config, "Loaded configuration");

    let resolver = ConciergeResolver::gemini(
        config.concierge.resolver_config(),
        config.concierge.gemini_config(),
    )
    .expect("failed to build concierge resolver");
    tracing::info!(remote = resolver.is_remote(), "Concierge ready");

    let sessions = Arc::new(InMemorySessionRegistry::new(Arc::new(resolver)));

    // Spawn periodic idle session cleanup task
    let cleanup_sessions = sessions.clone();
    let cleanup_interval = config.session.cleanup_interval();
    let idle_timeout = config.session.idle_timeout();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(cleanup_interval);
        loop {
            interval.tick().await;
            let count = cleanup_sessions.remove_idle(idle_timeout).await;
            if count > 0 {
                tracing::debug!(removed_sessions = count, "Periodic session cleanup");
            }
        }
    });

    let app_state = Arc::new(AppState::new(sessions, config.session));
    let app = create_router(app_state, &config.site_root);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", config.listen_addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
