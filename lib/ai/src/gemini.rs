//! Google Gemini `generateContent` backend.

use crate::backend::{
    ApiKey, Candidate, CompletionBackend, CompletionRequest, CompletionResponse, LlmProvider,
    TurnRole,
};
use crate::error::LlmError;
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::RETRY_AFTER;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Public Gemini API host.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Model the concierge talks to unless configured otherwise.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-09-2025";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Connection settings for [`GeminiBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    /// API host, without trailing path.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Upper bound on a whole request, after which the resolver falls back.
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Completion backend for the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiBackend {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl GeminiBackend {
    /// Creates a backend from connection settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: GeminiConfig) -> hotel_jina_core::Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::InvalidConfig {
                reason: e.to_string(),
            })?;

        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.model
        );

        Ok(Self {
            client,
            endpoint,
            model: config.model,
        })
    }

    fn transport_error(&self, e: &reqwest::Error) -> LlmError {
        if e.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::ProviderUnavailable {
                provider: LlmProvider::Gemini.to_string(),
                reason: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl CompletionBackend for GeminiBackend {
    #[instrument(skip_all, fields(model = %self.model, turns = request.turns.len()))]
    async fn complete(
        &self,
        api_key: &ApiKey,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, LlmError> {
        let body = GenerateContentRequest::from(request);

        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, api_key.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok());
            return Err(LlmError::RateLimited { retry_after_secs });
        }
        if !status.is_success() {
            let reason = response.text().await.unwrap_or_default();
            return Err(LlmError::RequestFailed {
                status: Some(status.as_u16()),
                reason,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(&e))?;
        let parsed: GenerateContentResponse =
            serde_json::from_slice(&bytes).map_err(|e| LlmError::ResponseParseFailed {
                reason: e.to_string(),
            })?;

        let completion = parsed.into_completion(&self.model);
        debug!(candidates = completion.candidates.len(), "gemini responded");
        Ok(completion)
    }

    fn provider(&self) -> LlmProvider {
        LlmProvider::Gemini
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: TurnRole,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

impl<'a> From<&'a CompletionRequest> for GenerateContentRequest<'a> {
    fn from(request: &'a CompletionRequest) -> Self {
        Self {
            contents: request
                .turns
                .iter()
                .map(|turn| Content {
                    role: turn.role,
                    parts: vec![Part { text: &turn.text }],
                })
                .collect(),
            generation_config: GenerationConfig {
                temperature: request.generation.temperature,
                max_output_tokens: request.generation.max_output_tokens,
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Option<Vec<WireCandidate>>,
}

#[derive(Debug, Deserialize)]
struct WireCandidate {
    #[serde(default)]
    content: Option<WireContent>,
}

#[derive(Debug, Deserialize)]
struct WireContent {
    #[serde(default)]
    parts: Option<Vec<WirePart>>,
}

#[derive(Debug, Deserialize)]
struct WirePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    fn into_completion(self, model: &str) -> CompletionResponse {
        let candidates = self
            .candidates
            .unwrap_or_default()
            .into_iter()
            .map(|c| Candidate {
                text: c
                    .content
                    .and_then(|content| content.parts)
                    .and_then(|parts| parts.into_iter().next())
                    .and_then(|part| part.text),
            })
            .collect();

        CompletionResponse {
            candidates,
            model: model.to_string(),
        }
    }
}
