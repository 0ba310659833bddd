//! Core domain types for the Hotel Jina concierge.
//!
//! This crate provides the strongly-typed identifiers and the error
//! handling foundation shared by the conversation, AI and server crates.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{ConversationSessionId, MessageId};
