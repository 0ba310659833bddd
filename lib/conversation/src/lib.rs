//! Concierge conversation service for Hotel Jina.
//!
//! This crate provides:
//!
//! - **Conversation**: append-only history seeded with the concierge greeting
//! - **Session**: the `submit` pipeline with its one-request-at-a-time guard
//! - **Registry**: in-memory session storage with idle expiry

pub mod conversation;
pub mod error;
pub mod message;
pub mod registry;
pub mod session;

pub use conversation::{Conversation, last_user_text};
pub use error::{SessionError, SubmitError};
pub use message::{Message, Sender};
pub use registry::{InMemorySessionRegistry, SessionRegistry};
pub use session::{CONNECTION_TROUBLE_REPLY, ConciergeSession, ReplyResolver};
