//! Concierge chat endpoints.
//!
//! Each browser gets its own session, identified by the
//! `concierge_session` cookie. A missing, malformed or expired cookie
//! silently starts a fresh conversation.

use crate::error::ConciergeApiError;
use crate::state::AppState;
use crate::types::{ConversationView, SubmitMessageRequest};
use axum::{
    Json,
    extract::{FromRef, FromRequestParts, State},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use hotel_jina_conversation::ConciergeSession;
use hotel_jina_core::ConversationSessionId;
use std::sync::Arc;
use time::Duration as TimeDuration;

/// Session cookie name.
pub const SESSION_COOKIE: &str = "concierge_session";

/// Extractor resolving the caller's concierge session.
///
/// The jar carries a new session cookie when a session had to be created,
/// so handlers must return it with their response.
pub struct GuestSession {
    pub session: Arc<ConciergeSession>,
    pub jar: CookieJar,
}

impl<S> FromRequestParts<S> for GuestSession
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ConciergeApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = Arc::<AppState>::from_ref(state);
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|e| ConciergeApiError::Internal {
                details: e.to_string(),
            })?;

        Ok(Self::resolve(&app_state, jar).await)
    }
}

impl GuestSession {
    /// Looks up the session named by the cookie, or starts a new one and
    /// adds its cookie to the jar.
    pub async fn resolve(app_state: &AppState, jar: CookieJar) -> Self {
        if let Some(session) = existing_session(app_state, &jar).await {
            return Self { session, jar };
        }

        let session = app_state.sessions.create().await;
        let cookie = Cookie::build((SESSION_COOKIE, session.id().to_string()))
            .path("/")
            .http_only(true)
            .secure(app_state.session_config.secure_cookies)
            .same_site(SameSite::Lax)
            .max_age(TimeDuration::minutes(
                app_state.session_config.idle_timeout_minutes,
            ));

        Self {
            session,
            jar: jar.add(cookie),
        }
    }
}

async fn existing_session(app_state: &AppState, jar: &CookieJar) -> Option<Arc<ConciergeSession>> {
    let raw = jar.get(SESSION_COOKIE)?.value();
    let id = raw
        .parse::<ConversationSessionId>()
        .map_err(|e| tracing::debug!(error = %e, "ignoring malformed session cookie"))
        .ok()?;

    app_state
        .sessions
        .get(id)
        .await
        .map_err(|e| tracing::debug!(error = %e, "session cookie refers to a discarded session"))
        .ok()
}

/// Returns the current conversation, starting one if needed.
pub async fn conversation(guest: GuestSession) -> impl IntoResponse {
    let conversation = guest.session.conversation().await;
    let view = ConversationView::new(&guest.session, conversation);
    (guest.jar, Json(view))
}

/// Submits a guest message and returns the conversation with the reply.
///
/// The body is parsed before any session is looked up, so a malformed
/// request never creates one.
pub async fn submit_message(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(request): Json<SubmitMessageRequest>,
) -> Response {
    let guest = GuestSession::resolve(&app_state, jar).await;
    match guest.session.submit(&request.text).await {
        Ok(conversation) => {
            let view = ConversationView::new(&guest.session, conversation);
            (guest.jar, Json(view)).into_response()
        }
        Err(e) => {
            tracing::debug!(session_id = %guest.session.id(), error = %e, "submission refused");
            (guest.jar, ConciergeApiError::from(e)).into_response()
        }
    }
}
