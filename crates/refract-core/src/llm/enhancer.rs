//! Prompt enhancement orchestrator.
//!
//! Decodes the prompt, picks the model's instruction for the task, builds the
//! chat payload and races the remote call against a deadline. Every failure
//! path degrades to the decoded prompt, so `enhance` always yields a usable
//! prompt for the image model.

use super::provider::{ChatMessage, ChatPayload, CompletionClient, ContentPart};
use crate::catalog::InstructionCatalog;
use crate::config::EnhancerConfig;
use crate::decode::decode_prompt_lossy;
use crate::error::{EnhanceError, EnhanceResult};
use crate::types::{EnhancementRequest, TaskType};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Per-request constants for the remote call.
#[derive(Debug, Clone)]
pub struct EnhanceOptions {
    /// Text model tag sent to the completion service
    pub model_tag: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum tokens in the rewritten prompt
    pub max_tokens: u32,
    /// Deadline for the remote call in milliseconds
    pub timeout_ms: u64,
}

impl Default for EnhanceOptions {
    fn default() -> Self {
        EnhancerConfig::default().into()
    }
}

impl From<EnhancerConfig> for EnhanceOptions {
    fn from(config: EnhancerConfig) -> Self {
        Self {
            model_tag: config.model_tag,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout_ms: config.timeout_ms,
        }
    }
}

/// Rewrites prompts through a remote completion service.
pub struct Enhancer {
    catalog: InstructionCatalog,
    client: Arc<dyn CompletionClient>,
    options: EnhanceOptions,
}

impl Enhancer {
    pub fn new(
        catalog: InstructionCatalog,
        client: Arc<dyn CompletionClient>,
        options: EnhanceOptions,
    ) -> Self {
        Self {
            catalog,
            client,
            options,
        }
    }

    /// Enhance a prompt, falling back to the decoded original on any fault.
    pub async fn enhance(&self, request: &EnhancementRequest) -> String {
        let prompt = decode_prompt_lossy(&request.prompt);
        match self.enhance_decoded(&prompt, request).await {
            Ok(enhanced) => enhanced,
            Err(EnhanceError::UnsupportedTask { model, task }) => {
                tracing::info!(
                    target: "refract::error",
                    "Model '{model}' does not support {task}; returning original prompt"
                );
                prompt
            }
            Err(e) => {
                tracing::warn!(target: "refract::error", "Error during prompt enhancement: {e}");
                prompt
            }
        }
    }

    /// Enhance a prompt, reporting why it could not be enhanced.
    ///
    /// Unlike [`Enhancer::enhance`], a malformed prompt encoding is an error
    /// here instead of being passed through.
    pub async fn try_enhance(&self, request: &EnhancementRequest) -> EnhanceResult<String> {
        let prompt = crate::decode::decode_prompt(&request.prompt)?;
        self.enhance_decoded(&prompt, request).await
    }

    async fn enhance_decoded(
        &self,
        prompt: &str,
        request: &EnhancementRequest,
    ) -> EnhanceResult<String> {
        let task = request.task();
        tracing::debug!(
            target: "refract::trace",
            "Enhancing prompt for [{}] ([{task}]): \"{prompt}\"",
            request.model
        );

        let instruction = self
            .catalog
            .instruction(&request.model, task)
            .ok_or_else(|| EnhanceError::UnsupportedTask {
                model: request.model.clone(),
                task: task.to_string(),
            })?;

        let payload = self.build_payload(instruction, prompt, request);
        let start = Instant::now();
        let response = self.dispatch(payload).await?;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            target: "refract::perf",
            elapsed_ms,
            model = %request.model,
            %task,
            "Prompt enhancement took {elapsed_ms}ms"
        );

        Ok(response.trim().to_string())
    }

    fn build_payload(
        &self,
        instruction: &str,
        prompt: &str,
        request: &EnhancementRequest,
    ) -> ChatPayload {
        let parts = match (request.task(), request.image.as_deref()) {
            (TaskType::Editing, Some(image)) => vec![
                ContentPart::text(format!("User's instruction: \"{prompt}\"")),
                ContentPart::image_url(image),
            ],
            _ => vec![ContentPart::text(format!("Prompt: {prompt}"))],
        };

        ChatPayload {
            messages: vec![ChatMessage::system(instruction), ChatMessage::user(parts)],
            seed: request.seed,
            model: self.options.model_tag.clone(),
            temperature: self.options.temperature,
            max_tokens: self.options.max_tokens,
        }
    }

    /// Race the remote call against the deadline.
    ///
    /// The call runs in its own task. If the deadline wins, the task is left
    /// running and drained in the background; its result is only logged.
    async fn dispatch(&self, payload: ChatPayload) -> EnhanceResult<String> {
        let client = self.client.clone();
        let mut call = tokio::spawn(async move { client.complete(&payload).await });
        let deadline = Duration::from_millis(self.options.timeout_ms);

        tokio::select! {
            joined = &mut call => match joined {
                Ok(result) => result,
                Err(e) => Err(EnhanceError::Network {
                    message: format!("completion task failed: {e}"),
                }),
            },
            _ = tokio::time::sleep(deadline) => {
                let client_name = self.client.name().to_string();
                tokio::spawn(async move {
                    match call.await {
                        Ok(Ok(_)) => tracing::debug!(
                            target: "refract::trace",
                            "Discarding late response from {client_name}"
                        ),
                        Ok(Err(e)) => tracing::debug!(
                            target: "refract::trace",
                            "Late {client_name} call failed after timeout: {e}"
                        ),
                        Err(e) => tracing::debug!(
                            target: "refract::trace",
                            "Late {client_name} task failed: {e}"
                        ),
                    }
                });
                Err(EnhanceError::Timeout {
                    timeout_ms: self.options.timeout_ms,
                })
            }
        }
    }
}
