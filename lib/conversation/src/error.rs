//! Error types for the conversation crate.
//!
//! - `SubmitError`: a guest message could not be accepted
//! - `SessionError`: session registry lookups

use hotel_jina_core::ConversationSessionId;
use std::fmt;

/// Reasons a submission is refused before anything is appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The message was empty or only whitespace.
    EmptyMessage,
    /// A previous submission is still waiting for its reply.
    Busy { session_id: ConversationSessionId },
    /// The pipeline task failed to run to completion.
    PipelineAborted { reason: String },
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "message is empty"),
            Self::Busy { session_id } => {
                write!(f, "session {session_id} already has a request in flight")
            }
            Self::PipelineAborted { reason } => {
                write!(f, "concierge pipeline aborted: {reason}")
            }
        }
    }
}

impl std::error::Error for SubmitError {}

/// Errors from session registry operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Session not found, either never created or already expired.
    NotFound { id: ConversationSessionId },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { id } => write!(f, "session not found: {id}"),
        }
    }
}

impl std::error::Error for SessionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_error_names_session() {
        let id = ConversationSessionId::new();
        let err = SubmitError::Busy { session_id: id };
        assert!(err.to_string().contains(&id.to_string()));
    }

    #[test]
    fn session_error_display() {
        let err = SessionError::NotFound {
            id: ConversationSessionId::new(),
        };
        assert!(err.to_string().contains("session not found"));
    }
}
