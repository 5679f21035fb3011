//! `envvar` lookup: reads the live process environment.
//!
//! The variable name may be stored in a file: `${envvar file://name.txt}`.

use serde_json::Value;

use crate::error::LookupError;
use crate::handler::{LookupContext, LookupHandler, read_value_from_path};

/// Reads an environment variable of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvvarLookup;

impl LookupHandler for EnvvarLookup {
    fn name(&self) -> &'static str {
        "envvar"
    }

    fn handle(&self, query: &str, _ctx: &LookupContext<'_>) -> Result<Value, LookupError> {
        let name = read_value_from_path(query)?;
        std::env::var(&name)
            .map(Value::String)
            .map_err(|_| LookupError::NotFound { query: name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{lookup_ctx, provider};
    use stagehook_core::context::DeployContext;

    #[test]
    fn test_reads_process_env() {
        let context = DeployContext::new("ns", "dev");
        let provider = provider();
        // PATH is set in every test environment we run in.
        let expected = std::env::var("PATH").expect("PATH set");
        let result = EnvvarLookup
            .handle("PATH", &lookup_ctx(&context, &provider))
            .expect("resolve");
        assert_eq!(result, Value::String(expected));
    }

    #[test]
    fn test_missing_variable() {
        let context = DeployContext::new("ns", "dev");
        let provider = provider();
        let err = EnvvarLookup
            .handle("STAGEHOOK_TEST_SURELY_UNSET_VAR", &lookup_ctx(&context, &provider))
            .expect_err("must fail");
        assert!(matches!(err, LookupError::NotFound { .. }));
    }
}
