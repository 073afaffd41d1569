//! Refract Core - model-aware prompt enhancement for image generation.
//!
//! Refract rewrites a user's image prompt into one tailored to the downstream
//! image model by asking a remote chat-completion service to do the rewrite.
//! It never fails: if the remote call errors, times out, or the model has no
//! instruction for the task, the decoded original prompt comes back instead.
//!
//! # Architecture
//!
//! ```text
//! caller → MemoizedEnhancer → (miss) Enhancer → InstructionCatalog
//!                                            → CompletionClient (raced against timeout)
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use refract_core::{EnhancementRequest, Refract};
//!
//! #[tokio::main]
//! async fn main() -> refract_core::Result<()> {
//!     let refract = Refract::from_default_config()?;
//!     let prompt = refract
//!         .enhance(&EnhancementRequest::new("a cozy bookstore", "flux", 42))
//!         .await;
//!     println!("{prompt}");
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod catalog;
pub mod config;
pub mod decode;
pub mod error;
pub mod llm;
pub mod types;

// Re-exports for convenient access
pub use catalog::{InstructionCatalog, InstructionSet};
pub use config::Config;
pub use error::{ConfigError, EnhanceError, EnhanceResult, RefractError, Result};
pub use llm::{CompletionClient, EnhanceOptions, Enhancer, MemoizedEnhancer};
pub use types::{EnhancementRequest, ImageInput, TaskType};

use std::sync::Arc;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Refract enhancer - the main entry point.
///
/// Wires the catalog, the HTTP completion client and the cache together from
/// a [`Config`]. Share one instance per process so the cache is shared too.
pub struct Refract {
    config: Config,
    enhancer: MemoizedEnhancer,
}

impl Refract {
    /// Build the pipeline from configuration.
    ///
    /// The API key is resolved here, once, rather than per call.
    pub fn new(config: Config) -> Self {
        let client = llm::CompletionClientFactory::create(&config.enhancer);
        if !client.has_credential() {
            tracing::debug!("No API key configured; sending unauthenticated requests");
        }
        Self::with_client(config, Arc::new(client))
    }

    /// Build the pipeline from the config file at [`Config::default_path`].
    pub fn from_default_config() -> Result<Self> {
        let config = Config::load()?;
        Ok(Self::new(config))
    }

    /// Build the pipeline around a caller-supplied completion client.
    pub fn with_client(config: Config, client: Arc<dyn CompletionClient>) -> Self {
        tracing::debug!("Initializing Refract v{} with {} client", VERSION, client.name());
        let enhancer = Enhancer::new(
            InstructionCatalog::new(),
            client,
            EnhanceOptions::from(config.enhancer.clone()),
        );
        Self {
            config,
            enhancer: MemoizedEnhancer::new(enhancer),
        }
    }

    /// Enhance a prompt. Always returns a prompt, never an error.
    pub async fn enhance(&self, request: &EnhancementRequest) -> String {
        self.enhancer.enhance(request).await
    }

    /// Get a reference to the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of results held in the cache.
    pub fn cached(&self) -> usize {
        self.enhancer.len()
    }
}
