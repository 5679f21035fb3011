//! `env` lookup: reads the environment snapshot taken when the run started.

use serde_json::Value;

use crate::error::LookupError;
use crate::format::format_results;
use crate::handler::{LookupContext, LookupHandler, LookupQuery};

/// Reads `context.env_vars`, honouring a `default=` argument.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvLookup;

impl LookupHandler for EnvLookup {
    fn name(&self) -> &'static str {
        "env"
    }

    fn handle(&self, query: &str, ctx: &LookupContext<'_>) -> Result<Value, LookupError> {
        let LookupQuery {
            query: name,
            mut args,
        } = LookupQuery::parse(query)?;
        let default = args.remove("default");

        let result = ctx
            .context
            .env_vars
            .get(&name)
            .cloned()
            .or(default)
            .unwrap_or_default();

        if result.is_empty() {
            return Err(LookupError::NotFound {
                query: query.to_string(),
            });
        }

        format_results(Value::String(result), &args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{lookup_ctx, provider};
    use serde_json::json;
    use stagehook_core::context::DeployContext;
    use std::collections::HashMap;

    fn context() -> DeployContext {
        let vars: HashMap<String, String> = [
            ("DEPLOY_ENVIRONMENT".to_string(), "prod".to_string()),
            ("FEATURE".to_string(), "on".to_string()),
        ]
        .into_iter()
        .collect();
        DeployContext::new("ns", "prod").with_env_vars(vars)
    }

    #[test]
    fn test_reads_snapshot() {
        let context = context();
        let provider = provider();
        let result = EnvLookup
            .handle("DEPLOY_ENVIRONMENT", &lookup_ctx(&context, &provider))
            .expect("resolve");
        assert_eq!(result, json!("prod"));
    }

    #[test]
    fn test_default_and_transform() {
        let context = context();
        let provider = provider();
        let ctx = lookup_ctx(&context, &provider);
        assert_eq!(
            EnvLookup
                .handle("MISSING::default=fallback", &ctx)
                .expect("resolve"),
            json!("fallback")
        );
        assert_eq!(
            EnvLookup
                .handle("FEATURE::transform=bool", &ctx)
                .expect("resolve"),
            json!(true)
        );
    }

    #[test]
    fn test_missing_without_default() {
        let context = context();
        let provider = provider();
        let err = EnvLookup
            .handle("MISSING", &lookup_ctx(&context, &provider))
            .expect_err("must fail");
        assert!(matches!(err, LookupError::NotFound { .. }));
    }
}
