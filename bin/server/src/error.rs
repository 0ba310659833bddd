//! Error types for the concierge HTTP API.
//!
//! Details are logged; guests only ever see a short fixed message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hotel_jina_conversation::{CONNECTION_TROUBLE_REPLY, SubmitError};
use std::fmt;

/// Concierge API errors.
#[derive(Debug)]
pub enum ConciergeApiError {
    /// Submitted text was blank.
    EmptyMessage,
    /// A reply to the previous message is still pending.
    Busy,
    /// The reply pipeline could not run.
    PipelineFailed { details: String },
    /// Request could not be read.
    Internal { details: String },
}

impl fmt::Display for ConciergeApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "empty message"),
            Self::Busy => write!(f, "reply already in flight"),
            Self::PipelineFailed { details } => {
                write!(f, "concierge pipeline failed: {details}")
            }
            Self::Internal { details } => write!(f, "internal error: {details}"),
        }
    }
}

impl std::error::Error for ConciergeApiError {}

impl From<SubmitError> for ConciergeApiError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::EmptyMessage => Self::EmptyMessage,
            SubmitError::Busy { .. } => Self::Busy,
            SubmitError::PipelineAborted { reason } => Self::PipelineFailed { details: reason },
        }
    }
}

impl IntoResponse for ConciergeApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::EmptyMessage => (StatusCode::BAD_REQUEST, "Message must not be empty"),
            Self::Busy => (
                StatusCode::CONFLICT,
                "Still answering your previous message",
            ),
            Self::PipelineFailed { details } => {
                tracing::error!(details = %details, "concierge pipeline failed");
                (StatusCode::INTERNAL_SERVER_ERROR, CONNECTION_TROUBLE_REPLY)
            }
            Self::Internal { details } => {
                tracing::error!(details = %details, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, message).into_response()
    }
}
