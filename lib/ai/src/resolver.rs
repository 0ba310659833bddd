//! Concierge reply resolution.
//!
//! Two stages: ask the remote model when a credential is configured, and
//! answer from the keyword rules otherwise or whenever the remote call
//! fails. Resolution never returns an error.

use crate::backend::{ApiKey, CompletionBackend, CompletionRequest, GenerationParams};
use crate::error::LlmError;
use crate::fallback::KeywordRuleSet;
use crate::gemini::{GeminiBackend, GeminiConfig};
use crate::prompt::{CLARIFICATION_REPLY, GREETING, HOTEL_CONTEXT, build_turns};
use async_trait::async_trait;
use hotel_jina_conversation::{Message, ReplyResolver, last_user_text};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

/// Simulated latency for demo-mode replies.
pub const DEFAULT_DEMO_DELAY: Duration = Duration::from_millis(1000);

/// Static resolver configuration, fixed at startup.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Provider credential. `None` means demo mode.
    pub api_key: Option<ApiKey>,
    /// Persona and facts sent as the priming turn.
    pub system_context: String,
    /// Pause before answering in demo mode.
    pub demo_delay: Duration,
}

impl ResolverConfig {
    /// Hotel Jina's persona with the given credential.
    #[must_use]
    pub fn hotel_jina(api_key: Option<ApiKey>) -> Self {
        Self {
            api_key,
            system_context: HOTEL_CONTEXT.to_string(),
            demo_delay: DEFAULT_DEMO_DELAY,
        }
    }

    /// Sets the demo-mode delay.
    #[must_use]
    pub fn with_demo_delay(mut self, demo_delay: Duration) -> Self {
        self.demo_delay = demo_delay;
        self
    }
}

/// Why a reply came from the keyword rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// No credential configured; the remote service was not contacted.
    NoCredential,
    /// The remote call failed.
    RemoteFailed,
}

/// Where a reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    /// First candidate of a successful remote call.
    Remote,
    /// Remote call succeeded without usable text.
    Clarification,
    /// Keyword rules.
    Fallback(FallbackReason),
}

/// A resolved reply and its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Reply text shown to the guest.
    pub text: String,
    /// Which stage produced it.
    pub source: ReplySource,
}

/// Resolves concierge replies for Hotel Jina.
pub struct ConciergeResolver {
    config: ResolverConfig,
    backend: Arc<dyn CompletionBackend>,
    rules: KeywordRuleSet,
}

impl ConciergeResolver {
    /// Creates a resolver over an existing backend.
    ///
    /// The backend is only used when `config` carries a credential.
    #[must_use]
    pub fn new(config: ResolverConfig, backend: Arc<dyn CompletionBackend>) -> Self {
        if config.api_key.is_none() {
            warn!("no concierge API key configured, replies will come from demo mode rules");
        }
        Self {
            config,
            backend,
            rules: KeywordRuleSet::hotel_jina(),
        }
    }

    /// Creates a resolver talking to Gemini.
    ///
    /// # Errors
    ///
    /// Returns an error if the Gemini client cannot be built.
    pub fn gemini(
        config: ResolverConfig,
        gemini: GeminiConfig,
    ) -> hotel_jina_core::Result<Self, LlmError> {
        let backend = GeminiBackend::new(gemini)?;
        Ok(Self::new(config, Arc::new(backend)))
    }

    /// Returns true when replies are requested from the remote service.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// Resolves the reply to the last user turn in `history`.
    #[instrument(skip_all, fields(turns = history.len()))]
    pub async fn resolve_detailed(&self, history: &[Message]) -> Resolution {
        let user_text = last_user_text(history).unwrap_or_default();

        let Some(api_key) = &self.config.api_key else {
            debug!("answering from keyword rules, no credential");
            if !self.config.demo_delay.is_zero() {
                tokio::time::sleep(self.config.demo_delay).await;
            }
            return self.fallback(user_text, FallbackReason::NoCredential);
        };

        let request = CompletionRequest {
            turns: build_turns(&self.config.system_context, history),
            generation: GenerationParams::CONCIERGE,
        };

        match self.backend.complete(api_key, &request).await {
            Ok(response) => match response.first_text() {
                Some(text) => Resolution {
                    text: text.to_string(),
                    source: ReplySource::Remote,
                },
                None => {
                    warn!(
                        provider = %self.backend.provider(),
                        candidates = response.candidates.len(),
                        "remote completion had no text, asking guest to rephrase"
                    );
                    Resolution {
                        text: CLARIFICATION_REPLY.to_string(),
                        source: ReplySource::Clarification,
                    }
                }
            },
            Err(e) => {
                error!(
                    provider = %self.backend.provider(),
                    model = %self.backend.model(),
                    error = %e,
                    "remote completion failed, answering from keyword rules"
                );
                self.fallback(user_text, FallbackReason::RemoteFailed)
            }
        }
    }

    fn fallback(&self, user_text: &str, reason: FallbackReason) -> Resolution {
        Resolution {
            text: self.rules.reply_for(user_text).to_string(),
            source: ReplySource::Fallback(reason),
        }
    }
}

#[async_trait]
impl ReplyResolver for ConciergeResolver {
    fn greeting(&self) -> &str {
        GREETING
    }

    async fn resolve(&self, history: &[Message]) -> String {
        self.resolve_detailed(history).await.text
    }
}
