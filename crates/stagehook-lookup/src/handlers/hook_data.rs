//! `hook_data` lookup: reads values published by earlier hooks.
//!
//! ```text
//! bucket: ${hook_data staticsite.artifact_bucket_name}
//! config: ${hook_data settings.raw::load=json, get=port}
//! ```

use serde_json::Value;
use stagehook_core::types::is_truthy;

use crate::error::LookupError;
use crate::format::format_results;
use crate::handler::{LookupContext, LookupHandler, LookupQuery};

/// Finds a dotted path in the shared hook data store.
#[derive(Debug, Clone, Copy, Default)]
pub struct HookDataLookup;

impl LookupHandler for HookDataLookup {
    fn name(&self) -> &'static str {
        "hook_data"
    }

    fn handle(&self, query: &str, ctx: &LookupContext<'_>) -> Result<Value, LookupError> {
        let LookupQuery {
            query: path,
            mut args,
        } = LookupQuery::parse(query)?;

        let default = args.get("default").map(|d| Value::String(d.to_string()));
        let result = ctx
            .context
            .hook_data()
            .find(&path)
            .cloned()
            .or_else(|| default.clone());

        let result = match result {
            Some(value) if is_truthy(&value) => value,
            _ => {
                return Err(LookupError::NotFound {
                    query: query.to_string(),
                });
            }
        };

        // A default is already in its final form.
        if default.as_ref() == Some(&result) {
            args.remove("load");
            args.remove("get");
        }

        format_results(result, &args)
    }
}
