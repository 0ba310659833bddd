//! Shared application state.

use crate::config::SessionConfig;
use hotel_jina_conversation::SessionRegistry;
use std::sync::Arc;

/// State shared by all handlers.
pub struct AppState {
    /// Live concierge sessions.
    pub sessions: Arc<dyn SessionRegistry>,
    /// Session configuration.
    pub session_config: SessionConfig,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(sessions: Arc<dyn SessionRegistry>, session_config: SessionConfig) -> Self {
        Self {
            sessions,
            session_config,
        }
    }
}
