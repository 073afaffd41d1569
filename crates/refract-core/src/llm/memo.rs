//! Memoization of enhancement results.
//!
//! Results are keyed on the request with any embedded image payload removed,
//! so editing requests that differ only in their inline image share an entry.
//! The cache is unbounded and lives as long as the process. It is filled only
//! after a call resolves: concurrent calls with the same key may each reach
//! the remote service, and the last one to finish wins the slot.

use super::enhancer::Enhancer;
use crate::types::{is_embedded_image, EnhancementRequest};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// [`Enhancer`] wrapper that serves repeated requests from memory.
pub struct MemoizedEnhancer {
    inner: Enhancer,
    cache: Mutex<HashMap<String, String>>,
}

impl MemoizedEnhancer {
    pub fn new(inner: Enhancer) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Enhance a prompt, returning the cached result for a repeated key.
    pub async fn enhance(&self, request: &EnhancementRequest) -> String {
        let key = cache_key(request);
        tracing::debug!(target: "refract::trace", "cache key {key}");

        if let Some(hit) = self.lookup(&key) {
            return hit;
        }

        let result = self.inner.enhance(request).await;
        self.cache_lock().insert(key, result.clone());
        result
    }

    /// Number of cached results.
    pub(crate) fn len(&self) -> usize {
        self.cache_lock().len()
    }

    fn lookup(&self, key: &str) -> Option<String> {
        self.cache_lock().get(key).cloned()
    }

    // Entries are plain strings, so a poisoned map is still consistent.
    fn cache_lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Serialize the request arguments as a JSON array, dropping inline images.
///
/// An absent image adds nothing; a non-embedded reference (e.g. an `https://`
/// URL) is part of the key.
pub fn cache_key(request: &EnhancementRequest) -> String {
    let mut args = vec![
        Value::from(request.prompt.as_str()),
        Value::from(request.model.as_str()),
        Value::from(request.seed),
    ];
    if let Some(image) = request.image.as_deref() {
        if !is_embedded_image(image) {
            args.push(Value::from(image));
        }
    }
    Value::Array(args).to_string()
}
