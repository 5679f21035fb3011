//! Lookup registry: handlers are registered by name at startup.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::error::LookupError;
use crate::handler::LookupHandler;
use crate::handlers::builtin_handlers;

/// Registry of lookup handlers keyed by lookup name.
#[derive(Debug, Default)]
pub struct LookupRegistry {
    /// Lookup name → handler.
    handlers: HashMap<String, Arc<dyn LookupHandler>>,
}

impl LookupRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in handler.
    pub fn with_builtins() -> Self {
        let handlers: HashMap<String, Arc<dyn LookupHandler>> = builtin_handlers()
            .into_iter()
            .map(|handler| (handler.name().to_string(), handler))
            .collect();
        info!(lookups = handlers.len(), "Built-in lookup handlers registered");
        Self { handlers }
    }

    /// Registers a handler under its own name.
    pub fn register(&mut self, handler: Arc<dyn LookupHandler>) -> Result<(), LookupError> {
        let name = handler.name();
        if self.handlers.contains_key(name) {
            return Err(LookupError::AlreadyRegistered {
                name: name.to_string(),
            });
        }

        self.handlers.insert(name.to_string(), handler);
        info!(lookup = %name, "Lookup handler registered");
        Ok(())
    }

    /// Gets a handler by lookup name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn LookupHandler>> {
        self.handlers.get(name).cloned()
    }

    /// Returns registered lookup names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::LookupContext;
    use crate::handlers::VarLookup;
    use serde_json::Value;

    #[derive(Debug)]
    struct Constant;

    impl LookupHandler for Constant {
        fn name(&self) -> &'static str {
            "constant"
        }

        fn handle(&self, query: &str, _ctx: &LookupContext<'_>) -> Result<Value, LookupError> {
            Ok(Value::String(query.to_uppercase()))
        }
    }

    #[test]
    fn test_builtins_registered() {
        let registry = LookupRegistry::with_builtins();
        assert_eq!(
            registry.names(),
            vec!["default", "env", "envvar", "hook_data", "var"]
        );
        assert_eq!(registry.len(), builtin_handlers().len());
    }

    #[test]
    fn test_register_custom_handler() {
        let mut registry = LookupRegistry::with_builtins();
        registry.register(Arc::new(Constant)).expect("register");
        assert!(registry.get("constant").is_some());
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = LookupRegistry::with_builtins();
        let err = registry.register(Arc::new(VarLookup)).expect_err("duplicate");
        assert!(matches!(err, LookupError::AlreadyRegistered { name } if name == "var"));
    }
}
