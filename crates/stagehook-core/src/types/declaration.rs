//! Hook declarations as authored in deployment configuration.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// One hook to run at a lifecycle stage.
///
/// Declarations are immutable once loaded; the engine reads them in the order
/// they were authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct HookDeclaration {
    /// Symbolic path of the capability (`package.module.function`).
    #[validate(length(min = 1, message = "hook path must not be empty"))]
    pub path: String,
    /// Whether a failure of this hook aborts the run.
    #[serde(default = "default_true")]
    pub required: bool,
    /// Whether the hook runs at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Key under which a mapping result is published to `hook_data`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "data_key must not be empty"))]
    pub data_key: Option<String>,
    /// Arguments passed to the hook. Values may contain lookups.
    #[serde(default)]
    pub args: Map<String, Value>,
}

impl HookDeclaration {
    /// Creates a required, enabled declaration with no args.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            required: true,
            enabled: true,
            data_key: None,
            args: Map::new(),
        }
    }

    /// Marks the declaration as not required.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Sets the `required` flag.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the `enabled` flag.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the data key.
    pub fn with_data_key(mut self, data_key: impl Into<String>) -> Self {
        self.data_key = Some(data_key.into());
        self
    }

    /// Inserts an argument.
    pub fn with_arg(mut self, key: &str, value: Value) -> Self {
        self.args.insert(key.to_string(), value);
        self
    }

    /// Returns the data key if it is set and non-empty.
    pub fn data_key(&self) -> Option<&str> {
        self.data_key.as_deref().filter(|key| !key.is_empty())
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_from_minimal_record() {
        let decl: HookDeclaration =
            serde_json::from_value(json!({"path": "pkg.mod.func"})).expect("deserialize");
        assert!(decl.required);
        assert!(decl.enabled);
        assert!(decl.data_key.is_none());
        assert!(decl.args.is_empty());
    }

    #[test]
    fn test_empty_path_fails_validation() {
        let decl = HookDeclaration::new("");
        assert!(decl.validate().is_err());
    }

    #[test]
    fn test_empty_data_key_is_ignored() {
        let decl = HookDeclaration::new("pkg.mod.func").with_data_key("");
        assert_eq!(decl.data_key(), None);
        assert!(decl.validate().is_err());
    }

    #[test]
    fn test_builder() {
        let decl = HookDeclaration::new("pkg.mod.func")
            .optional()
            .with_data_key("out")
            .with_arg("name", json!("value"));
        assert!(!decl.required);
        assert_eq!(decl.data_key(), Some("out"));
        assert_eq!(decl.args.get("name"), Some(&json!("value")));
    }
}
