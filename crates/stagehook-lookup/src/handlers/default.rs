//! `default` lookup: a parameter value with a literal fallback.
//!
//! ```text
//! groups: ${default app_security_groups::sg-12345,sg-67890}
//! ```

use serde_json::Value;

use crate::error::LookupError;
use crate::handler::{LookupContext, LookupHandler};

/// Returns `parameters[name]` if set, otherwise the text after `::`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLookup;

impl LookupHandler for DefaultLookup {
    fn name(&self) -> &'static str {
        "default"
    }

    fn handle(&self, query: &str, ctx: &LookupContext<'_>) -> Result<Value, LookupError> {
        let (name, fallback) = query.split_once("::").ok_or_else(|| LookupError::InvalidQuery {
            query: query.to_string(),
            reason: "must be in <name>::<default value> format".to_string(),
        })?;

        Ok(ctx
            .context
            .parameters
            .get(name)
            .cloned()
            .unwrap_or_else(|| Value::String(fallback.to_string())))
    }
}
