//! Concierge reply resolution for Hotel Jina.
//!
//! This crate provides:
//!
//! - **Resolver**: remote completion with keyword fallback, never failing
//! - **Fallback rules**: the ordered "Demo Mode" keyword replies
//! - **Backends**: the completion backend trait and its Gemini implementation
//! - **Prompt**: persona context and prompt turn assembly

pub mod backend;
pub mod error;
pub mod fallback;
pub mod gemini;
pub mod prompt;
pub mod resolver;

pub use backend::{
    ApiKey, Candidate, CompletionBackend, CompletionRequest, CompletionResponse,
    GenerationParams, LlmProvider, PromptTurn, TurnRole,
};
pub use error::LlmError;
pub use fallback::{KeywordRule, KeywordRuleSet};
pub use gemini::{GeminiBackend, GeminiConfig};
pub use resolver::{
    ConciergeResolver, DEFAULT_DEMO_DELAY, FallbackReason, ReplySource, Resolution,
    ResolverConfig,
};
