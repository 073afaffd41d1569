//! HTTP completion client for the Pollinations text endpoint.
//!
//! The endpoint speaks the OpenAI chat format on the way in but answers with
//! the completion as a plain-text body, so no response parsing happens here.

use super::provider::{ChatPayload, CompletionClient};
use crate::error::EnhanceError;
use async_trait::async_trait;

/// reqwest-backed [`CompletionClient`].
pub struct PollinationsClient {
    endpoint: String,
    referer: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl PollinationsClient {
    pub fn new(endpoint: &str, referer: &str, api_key: Option<String>) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            referer: referer.to_string(),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl CompletionClient for PollinationsClient {
    fn name(&self) -> &str {
        "pollinations"
    }

    async fn complete(&self, payload: &ChatPayload) -> Result<String, EnhanceError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("Referer", &self.referer)
            .json(payload);

        if let Some(api_key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {api_key}"));
        }

        let resp = request.send().await.map_err(|e| EnhanceError::Network {
            message: format!("request to {} failed: {e}", self.endpoint),
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(EnhanceError::Transport {
                status_code: status.as_u16(),
                body,
            });
        }

        resp.text().await.map_err(|e| EnhanceError::Network {
            message: format!("failed to read response body: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::provider::ChatMessage;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn payload() -> ChatPayload {
        ChatPayload {
            messages: vec![ChatMessage::system("rewrite it")],
            seed: 42,
            model: "openai".to_string(),
            temperature: 0.5,
            max_tokens: 400,
        }
    }

    #[tokio::test]
    async fn test_complete_returns_body_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/openai"))
            .and(header("Referer", "image.pollinations.ai"))
            .and(body_json(payload()))
            .respond_with(ResponseTemplate::new(200).set_body_string("  A sunlit bookstore.\n"))
            .expect(1)
            .mount(&server)
            .await;

        let client = PollinationsClient::new(
            &format!("{}/openai", server.uri()),
            "image.pollinations.ai",
            None,
        );
        let text = client.complete(&payload()).await.unwrap();
        // Trimming is the enhancer's job; the client returns the body verbatim.
        assert_eq!(text, "  A sunlit bookstore.\n");
    }

    #[tokio::test]
    async fn test_bearer_header_sent_when_credential_present() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("Authorization", "Bearer secret-token"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let client = PollinationsClient::new(
            &server.uri(),
            "image.pollinations.ai",
            Some("secret-token".to_string()),
        );
        assert!(client.has_credential());
        assert_eq!(client.complete(&payload()).await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_no_authorization_header_without_credential() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("anonymous"))
            .mount(&server)
            .await;

        let client = PollinationsClient::new(&server.uri(), "image.pollinations.ai", None);
        assert_eq!(client.complete(&payload()).await.unwrap(), "anonymous");

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        assert!(!received[0]
            .headers
            .keys()
            .any(|name| name.as_str().eq_ignore_ascii_case("authorization")));
    }

    #[tokio::test]
    async fn test_non_success_status_is_transport_fault() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let client = PollinationsClient::new(&server.uri(), "image.pollinations.ai", None);
        match client.complete(&payload()).await {
            Err(EnhanceError::Transport { status_code, body }) => {
                assert_eq!(status_code, 503);
                assert_eq!(body, "overloaded");
            }
            other => panic!("Expected transport fault, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_fault() {
        // Port 9 (discard) on localhost is not expected to accept HTTP.
        let client = PollinationsClient::new("http://127.0.0.1:9/openai", "image.pollinations.ai", None);
        let err = client.complete(&payload()).await.unwrap_err();
        assert!(matches!(err, EnhanceError::Network { .. }), "Got: {err:?}");
    }
}
