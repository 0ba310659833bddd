//! Hotel Jina web server.
//!
//! Serves the marketing site and the AI concierge's JSON API.

pub mod app;
pub mod concierge;
pub mod config;
pub mod error;
pub mod state;
pub mod types;

pub use app::create_router;
