//! `var` lookup: reads a dotted path from the run parameters.

use serde_json::Value;
use stagehook_core::types::find_path;

use crate::error::LookupError;
use crate::format::format_results;
use crate::handler::{LookupContext, LookupHandler, LookupQuery};

/// Reads `context.parameters`, honouring a `default=` argument.
#[derive(Debug, Clone, Copy, Default)]
pub struct VarLookup;

impl LookupHandler for VarLookup {
    fn name(&self) -> &'static str {
        "var"
    }

    fn handle(&self, query: &str, ctx: &LookupContext<'_>) -> Result<Value, LookupError> {
        let LookupQuery {
            query: path,
            mut args,
        } = LookupQuery::parse(query)?;
        let default = args.remove("default");

        let (head, rest) = path.split_once('.').unwrap_or((path.as_str(), ""));
        let found = ctx
            .context
            .parameters
            .get(head)
            .and_then(|value| find_path(value, rest))
            .cloned();

        match (found, default) {
            (Some(value), _) => format_results(value, &args),
            (None, Some(default)) => format_results(Value::String(default), &args),
            (None, None) => Err(LookupError::NotFound {
                query: query.to_string(),
            }),
        }
    }
}
