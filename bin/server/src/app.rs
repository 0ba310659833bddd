//! Router assembly.

use crate::concierge;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Builds the application router.
///
/// Concierge endpoints live under `/api/concierge`; every other path is
/// served from the static site in `site_root`.
pub fn create_router(state: Arc<AppState>, site_root: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/concierge", get(concierge::conversation))
        .route("/api/concierge/messages", post(concierge::submit_message))
        .fallback_service(ServeDir::new(site_root))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concierge::SESSION_COOKIE;
    use crate::config::SessionConfig;
    use crate::types::ConversationView;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use hotel_jina_ai::prompt::GREETING;
    use hotel_jina_ai::{ConciergeResolver, GeminiConfig, ResolverConfig};
    use hotel_jina_conversation::{InMemorySessionRegistry, Sender, SessionRegistry};
    use std::time::Duration;
    use tower::ServiceExt;

    fn test_app() -> (Router, Arc<InMemorySessionRegistry>) {
        let resolver = ConciergeResolver::gemini(
            ResolverConfig::hotel_jina(None).with_demo_delay(Duration::ZERO),
            GeminiConfig::default(),
        )
        .expect("resolver");
        let sessions = Arc::new(InMemorySessionRegistry::new(Arc::new(resolver)));
        let state = Arc::new(AppState::new(sessions.clone(), SessionConfig::default()));
        (create_router(state, "does-not-exist"), sessions)
    }

    fn test_router() -> Router {
        test_app().0
    }

    fn session_cookie(response: &Response) -> Option<String> {
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(SESSION_COOKIE))
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }

    async fn view(response: Response) -> ConversationView {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("conversation json")
    }

    fn get_conversation(cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/api/concierge");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).expect("request")
    }

    fn post_message(cookie: Option<&str>, text: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/concierge/messages")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let body = serde_json::json!({ "text": text }).to_string();
        builder.body(Body::from(body)).expect("request")
    }

    #[tokio::test]
    async fn health_check() {
        let response = test_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn first_visit_starts_seeded_conversation() {
        let response = test_router()
            .oneshot(get_conversation(None))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = session_cookie(&response).expect("session cookie set");
        let view = view(response).await;

        assert!(cookie.ends_with(&view.session_id));
        assert!(!view.busy);
        assert_eq!(view.messages.len(), 1);
        assert_eq!(view.messages[0].sender, Sender::Assistant);
        assert_eq!(view.messages[0].text, GREETING);
    }

    #[tokio::test]
    async fn messages_accumulate_for_the_same_cookie() {
        let router = test_router();

        let first = router
            .clone()
            .oneshot(get_conversation(None))
            .await
            .expect("response");
        let cookie = session_cookie(&first).expect("cookie");

        let located = router
            .clone()
            .oneshot(post_message(Some(&cookie), "Where are you located?"))
            .await
            .expect("response");
        assert_eq!(located.status(), StatusCode::OK);
        assert!(session_cookie(&located).is_none());
        let located = view(located).await;
        assert_eq!(located.messages.len(), 3);
        assert!(located.messages[2].text.contains("788002"));

        let rates = view(
            router
                .clone()
                .oneshot(post_message(Some(&cookie), "What's the price for a room?"))
                .await
                .expect("response"),
        )
        .await;
        assert_eq!(rates.messages.len(), 5);
        assert_eq!(rates.messages[..3], located.messages[..]);
        assert!(rates.messages[4].text.contains("5,200"));

        let fetched = view(
            router
                .oneshot(get_conversation(Some(&cookie)))
                .await
                .expect("response"),
        )
        .await;
        assert_eq!(fetched.messages, rates.messages);
    }

    #[tokio::test]
    async fn posting_without_cookie_creates_session() {
        let response = test_router()
            .oneshot(post_message(None, "asdfqwerty"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert!(session_cookie(&response).is_some());
        let view = view(response).await;
        assert_eq!(view.messages.len(), 3);
        assert_eq!(
            view.messages[2].text,
            hotel_jina_ai::fallback::DEFAULT_REPLY
        );
    }

    #[tokio::test]
    async fn blank_message_is_bad_request() {
        let response = test_router()
            .oneshot(post_message(None, "   "))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_body_does_not_create_a_session() {
        let (router, sessions) = test_app();
        let request = Request::builder()
            .method("POST")
            .uri("/api/concierge/messages")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .expect("request");

        let response = router.oneshot(request).await.expect("response");

        assert!(response.status().is_client_error());
        assert!(session_cookie(&response).is_none());
        assert_eq!(sessions.len().await, 0);
    }

    #[tokio::test]
    async fn malformed_cookie_gets_a_fresh_session() {
        let response = test_router()
            .oneshot(get_conversation(Some("concierge_session=garbage")))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = session_cookie(&response).expect("replacement cookie");
        assert!(cookie.starts_with("concierge_session=sess_"));
    }

    #[tokio::test]
    async fn unknown_paths_fall_through_to_static_site() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/gallery.html")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
