//! Centralized server configuration.
//!
//! Loaded via the `config` crate from environment variables, with `__`
//! separating nested keys (e.g. `CONCIERGE__GEMINI_API_KEY`).

use hotel_jina_ai::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use hotel_jina_ai::{ApiKey, GeminiConfig, ResolverConfig};
use serde::Deserialize;
use std::time::Duration;

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Directory holding the pre-built marketing site.
    #[serde(default = "default_site_root")]
    pub site_root: String,

    /// Concierge configuration.
    #[serde(default)]
    pub concierge: ConciergeConfig,

    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,
}

/// Concierge reply configuration.
#[derive(Clone, Deserialize)]
pub struct ConciergeConfig {
    /// Gemini API key. Without one the concierge answers in demo mode.
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    /// Gemini model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Gemini API host.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Seconds before a Gemini request is abandoned in favour of the fallback rules.
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,

    /// Simulated latency for demo-mode replies, in milliseconds.
    #[serde(default = "default_demo_delay_ms")]
    pub demo_delay_ms: u64,
}

impl std::fmt::Debug for ConciergeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConciergeConfig")
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field("demo_delay_ms", &self.demo_delay_ms)
            .finish()
    }
}

/// Session-related configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Minutes without traffic before a chat session is discarded.
    #[serde(default = "default_idle_timeout_minutes")]
    pub idle_timeout_minutes: i64,

    /// Interval between session cleanup runs, in seconds.
    #[serde(default = "default_cleanup_interval_seconds")]
    pub cleanup_interval_seconds: u64,

    /// Whether to set the Secure flag on cookies (requires HTTPS).
    /// Set to false for local HTTP development.
    #[serde(default = "default_secure_cookies")]
    pub secure_cookies: bool,
}

fn default_listen_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_site_root() -> String {
    "site".to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout_seconds() -> u64 {
    30
}

fn default_demo_delay_ms() -> u64 {
    1000
}

fn default_idle_timeout_minutes() -> i64 {
    30
}

fn default_cleanup_interval_seconds() -> u64 {
    300
}

fn default_secure_cookies() -> bool {
    true
}

impl Default for ConciergeConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            request_timeout_seconds: default_request_timeout_seconds(),
            demo_delay_ms: default_demo_delay_ms(),
        }
    }
}

impl ConciergeConfig {
    /// Resolver settings: credential, persona and demo delay.
    #[must_use]
    pub fn resolver_config(&self) -> ResolverConfig {
        let api_key = self.gemini_api_key.clone().and_then(ApiKey::new);
        ResolverConfig::hotel_jina(api_key).with_demo_delay(Duration::from_millis(self.demo_delay_ms))
    }

    /// Gemini connection settings.
    #[must_use]
    pub fn gemini_config(&self) -> GeminiConfig {
        GeminiConfig {
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            timeout: Duration::from_secs(self.request_timeout_seconds),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_minutes: default_idle_timeout_minutes(),
            cleanup_interval_seconds: default_cleanup_interval_seconds(),
            secure_cookies: default_secure_cookies(),
        }
    }
}

impl SessionConfig {
    /// Idle period after which a session is dropped.
    #[must_use]
    pub fn idle_timeout(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.idle_timeout_minutes)
    }

    /// Period of the idle-session sweep, never shorter than one second.
    #[must_use]
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_seconds.max(1))
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_config(
            config::Config::builder()
                .add_source(
                    config::Environment::default()
                        .separator("__")
                        .try_parsing(true),
                )
                .build()?,
        )
    }

    /// Deserializes an already assembled configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a value has the wrong type.
    pub fn from_config(config: config::Config) -> Result<Self, config::ConfigError> {
        config.try_deserialize()
    }
}
