//! Remote prompt rewriting.
//!
//! Provides the completion client abstraction, the HTTP client for the
//! Pollinations text endpoint, the enhancement orchestrator and the
//! memoizing wrapper callers go through.

pub(crate) mod enhancer;
pub(crate) mod memo;
pub(crate) mod pollinations;
pub(crate) mod provider;

pub use enhancer::{EnhanceOptions, Enhancer};
pub use memo::{cache_key, MemoizedEnhancer};
pub use pollinations::PollinationsClient;
pub use provider::{
    resolve_env_var, ChatMessage, ChatPayload, CompletionClient, CompletionClientFactory,
    ContentPart, ImageUrl, MessageContent, Role,
};
