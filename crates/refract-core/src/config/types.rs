//! Sub-configuration structs and their defaults.

use serde::{Deserialize, Serialize};

/// Remote completion service and request shape.
///
/// The request constants (`model_tag`, `temperature`, `max_tokens`) are the
/// same for every call; they live here only so deployments can point at a
/// different backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancerConfig {
    /// Chat-completion endpoint
    pub endpoint: String,

    /// Value of the identifying `Referer` header
    pub referer: String,

    /// API key (supports ${ENV_VAR} syntax); sent as a bearer token when set
    pub api_key: String,

    /// Text model tag sent in every request
    pub model_tag: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum tokens in the rewritten prompt
    pub max_tokens: u32,

    /// Deadline for the remote call in milliseconds
    pub timeout_ms: u64,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://text.pollinations.ai/openai".to_string(),
            referer: "image.pollinations.ai".to_string(),
            api_key: "${POLLINATIONS_KEY}".to_string(),
            model_tag: "openai".to_string(),
            temperature: 0.5,
            max_tokens: 400,
            timeout_ms: 7000,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
