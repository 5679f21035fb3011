//! The shared result store populated by hooks.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::error::AppError;
use crate::types::value::find_path;

/// A second write under an existing `data_key`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("hook data key '{key}' has already been set")]
pub struct DuplicateKeyError {
    /// The key that was already present.
    pub key: String,
}

impl From<DuplicateKeyError> for AppError {
    fn from(err: DuplicateKeyError) -> Self {
        AppError::conflict(err.to_string())
    }
}

/// Mapping from `data_key` to the mapping a hook returned.
///
/// Each key can be written at most once for the lifetime of the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HookData {
    entries: Map<String, Value>,
}

impl HookData {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a hook result under `key`.
    ///
    /// Fails if `key` is already present, whether or not the values match.
    pub fn merge(&mut self, key: &str, value: Map<String, Value>) -> Result<(), DuplicateKeyError> {
        if self.entries.contains_key(key) {
            return Err(DuplicateKeyError {
                key: key.to_string(),
            });
        }
        tracing::debug!(data_key = %key, fields = value.len(), "Hook data merged");
        self.entries.insert(key.to_string(), Value::Object(value));
        Ok(())
    }

    /// Gets the value published under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Finds a nested value; the first path segment is the data key.
    pub fn find(&self, path: &str) -> Option<&Value> {
        let (key, rest) = path.split_once('.').unwrap_or((path, ""));
        self.entries.get(key).and_then(|value| find_path(value, rest))
    }

    /// Returns whether `key` has been published.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the published keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns the number of published keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether nothing has been published.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
