//! The lookup resolution seam used by the hook engine.

use serde_json::Value;

use crate::context::DeployContext;
use crate::result::AppResult;
use crate::traits::provider::Provider;

/// Resolves embedded lookup expressions inside a value tree.
///
/// The output has the same shape as the input: mappings stay mappings,
/// sequences stay sequences, and only strings containing lookups change.
pub trait LookupResolver: Send + Sync {
    /// Resolves every lookup in `value` against the run context.
    fn resolve(
        &self,
        value: &Value,
        context: &DeployContext,
        provider: &dyn Provider,
    ) -> AppResult<Value>;
}

/// A resolver that returns every value unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopResolver;

impl LookupResolver for NoopResolver {
    fn resolve(
        &self,
        value: &Value,
        _context: &DeployContext,
        _provider: &dyn Provider,
    ) -> AppResult<Value> {
        Ok(value.clone())
    }
}
