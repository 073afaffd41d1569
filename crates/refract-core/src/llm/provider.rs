//! Completion client trait and chat payload types.
//!
//! Defines the interface the enhancer dispatches through, the OpenAI-style
//! request body it sends, and the factory that builds the production client
//! from config.

use super::pollinations::PollinationsClient;
use crate::config::EnhancerConfig;
use crate::error::EnhanceError;
use async_trait::async_trait;
use serde::Serialize;

/// Chat-completion request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatPayload {
    pub messages: Vec<ChatMessage>,
    pub seed: i64,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// A single message in the conversation sent to the remote model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: MessageContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// Message body: a bare string for the system role, content parts for the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ContentPart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

impl ChatMessage {
    pub fn system(text: &str) -> Self {
        Self {
            role: Role::System,
            content: MessageContent::Text(text.to_string()),
        }
    }

    pub fn user(parts: Vec<ContentPart>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Parts(parts),
        }
    }
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    pub fn image_url(url: impl Into<String>) -> Self {
        ContentPart::ImageUrl {
            image_url: ImageUrl { url: url.into() },
        }
    }
}

/// Outbound completion call.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (the enhancer holds an `Arc<dyn CompletionClient>` so it can move the call
/// into a spawned task).
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Client name for logging.
    fn name(&self) -> &str;

    /// Send `payload` and return the raw response body.
    async fn complete(&self, payload: &ChatPayload) -> Result<String, EnhanceError>;
}

/// Resolve `${ENV_VAR}` references in config strings.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok().filter(|v| !v.is_empty())
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Builds the production [`CompletionClient`] from config.
pub struct CompletionClientFactory;

impl CompletionClientFactory {
    /// Create the HTTP client, resolving the credential once up front.
    pub fn create(config: &EnhancerConfig) -> PollinationsClient {
        PollinationsClient::new(
            &config.endpoint,
            &config.referer,
            resolve_env_var(&config.api_key),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_system_message_serializes_as_plain_string() {
        let value = serde_json::to_value(ChatMessage::system("be helpful")).unwrap();
        assert_eq!(value, json!({ "role": "system", "content": "be helpful" }));
    }

    #[test]
    fn test_user_parts_serialize_with_type_tags() {
        let message = ChatMessage::user(vec![
            ContentPart::text("User's instruction: \"make it blue\""),
            ContentPart::image_url("data:image/png;base64,AAAA"),
        ]);
        let value = serde_json::to_value(message).unwrap();
        assert_eq!(
            value,
            json!({
                "role": "user",
                "content": [
                    { "type": "text", "text": "User's instruction: \"make it blue\"" },
                    { "type": "image_url", "image_url": { "url": "data:image/png;base64,AAAA" } }
                ]
            })
        );
    }

    #[test]
    fn test_payload_top_level_fields() {
        let payload = ChatPayload {
            messages: vec![ChatMessage::system("x")],
            seed: 42,
            model: "openai".to_string(),
            temperature: 0.5,
            max_tokens: 400,
        };
        let value = serde_json::to_value(payload).unwrap();
        assert_eq!(value["seed"], 42);
        assert_eq!(value["model"], "openai");
        assert_eq!(value["temperature"], 0.5);
        assert_eq!(value["max_tokens"], 400);
        assert_eq!(value["messages"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_resolve_env_var() {
        // Non-env-var strings pass through
        assert_eq!(resolve_env_var("plain-key"), Some("plain-key".to_string()));
        // Empty returns None
        assert_eq!(resolve_env_var(""), None);
        // Unset env var returns None
        assert_eq!(resolve_env_var("${DEFINITELY_NOT_SET_XYZ_123}"), None);
    }
}
