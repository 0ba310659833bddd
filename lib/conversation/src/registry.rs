//! Registry of live concierge sessions.
//!
//! Sessions are in memory only. A session that sees no traffic for the
//! configured idle period is dropped, together with its conversation.

use crate::error::SessionError;
use crate::session::{ConciergeSession, ReplyResolver};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use hotel_jina_core::ConversationSessionId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Trait for session storage.
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// Creates and stores a new session.
    async fn create(&self) -> Arc<ConciergeSession>;

    /// Gets a session by id, marking it as recently active.
    async fn get(&self, id: ConversationSessionId) -> Result<Arc<ConciergeSession>, SessionError>;

    /// Removes sessions idle for longer than `idle_for`, returning how many were dropped.
    ///
    /// Sessions with a reply in flight are kept.
    async fn remove_idle(&self, idle_for: Duration) -> usize;

    /// Returns the number of live sessions.
    async fn len(&self) -> usize;
}

struct Entry {
    session: Arc<ConciergeSession>,
    last_active_at: DateTime<Utc>,
}

/// Session registry backed by a `HashMap`.
pub struct InMemorySessionRegistry {
    resolver: Arc<dyn ReplyResolver>,
    sessions: RwLock<HashMap<ConversationSessionId, Entry>>,
}

impl InMemorySessionRegistry {
    /// Creates an empty registry whose sessions reply through `resolver`.
    #[must_use]
    pub fn new(resolver: Arc<dyn ReplyResolver>) -> Self {
        Self {
            resolver,
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl SessionRegistry for InMemorySessionRegistry {
    async fn create(&self) -> Arc<ConciergeSession> {
        let session = Arc::new(ConciergeSession::new(Arc::clone(&self.resolver)));
        let entry = Entry {
            session: Arc::clone(&session),
            last_active_at: Utc::now(),
        };
        self.sessions.write().await.insert(session.id(), entry);
        debug!(session_id = %session.id(), "created concierge session");
        session
    }

    async fn get(&self, id: ConversationSessionId) -> Result<Arc<ConciergeSession>, SessionError> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(&id).ok_or(SessionError::NotFound { id })?;
        entry.last_active_at = Utc::now();
        Ok(Arc::clone(&entry.session))
    }

    async fn remove_idle(&self, idle_for: Duration) -> usize {
        let cutoff = Utc::now() - idle_for;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_active_at >= cutoff || entry.session.is_busy());
        before - sessions.len()
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
