//! Resolves lookups embedded anywhere in a hook's argument tree.

use std::sync::Arc;

use serde_json::{Map, Value};
use stagehook_core::context::DeployContext;
use stagehook_core::result::AppResult;
use stagehook_core::traits::{LookupResolver, Provider};
use tracing::debug;

use crate::error::LookupError;
use crate::format::type_name;
use crate::handler::LookupContext;
use crate::parser::Expr;
use crate::registry::LookupRegistry;

/// The [`LookupResolver`] backed by a [`LookupRegistry`].
#[derive(Debug, Clone)]
pub struct VariableResolver {
    registry: Arc<LookupRegistry>,
}

impl VariableResolver {
    /// Creates a resolver over the given registry.
    pub fn new(registry: Arc<LookupRegistry>) -> Self {
        Self { registry }
    }

    /// Creates a resolver with only the built-in handlers.
    pub fn with_builtins() -> Self {
        Self::new(Arc::new(LookupRegistry::with_builtins()))
    }

    /// Returns the underlying registry.
    pub fn registry(&self) -> &Arc<LookupRegistry> {
        &self.registry
    }

    /// Resolves every lookup inside a value tree.
    pub fn resolve_value(
        &self,
        value: &Value,
        ctx: &LookupContext<'_>,
    ) -> Result<Value, LookupError> {
        match value {
            Value::String(raw) => self.resolve_str(raw, ctx),
            Value::Array(items) => items
                .iter()
                .map(|item| self.resolve_value(item, ctx))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Value::Object(map) => map
                .iter()
                .map(|(key, item)| Ok((key.clone(), self.resolve_value(item, ctx)?)))
                .collect::<Result<Map<_, _>, LookupError>>()
                .map(Value::Object),
            other => Ok(other.clone()),
        }
    }

    /// Resolves a single string.
    pub fn resolve_str(&self, raw: &str, ctx: &LookupContext<'_>) -> Result<Value, LookupError> {
        let expr = Expr::parse(raw)?;
        if expr.is_literal() {
            return Ok(Value::String(raw.to_string()));
        }
        self.evaluate(&expr, raw, ctx)
    }

    fn evaluate(
        &self,
        expr: &Expr,
        source: &str,
        ctx: &LookupContext<'_>,
    ) -> Result<Value, LookupError> {
        match expr {
            Expr::Literal(text) => Ok(Value::String(text.clone())),
            Expr::Lookup { name, query } => {
                let query = self.evaluate_text(query, source, ctx)?;
                let handler = self
                    .registry
                    .get(name)
                    .ok_or_else(|| LookupError::UnknownLookupType { name: name.clone() })?;

                debug!(lookup = %name, query = %query, "Resolving lookup");
                handler
                    .handle(&query, ctx)
                    .map_err(|source| LookupError::Failed {
                        lookup: format!("${{{name} {query}}}"),
                        source: Box::new(source),
                    })
            }
            Expr::Concat(_) => self.evaluate_text(expr, source, ctx).map(Value::String),
        }
    }

    /// Evaluates an expression whose result must be text.
    fn evaluate_text(
        &self,
        expr: &Expr,
        source: &str,
        ctx: &LookupContext<'_>,
    ) -> Result<String, LookupError> {
        match expr {
            Expr::Literal(text) => Ok(text.clone()),
            Expr::Concat(parts) => parts.iter().try_fold(String::new(), |mut out, part| {
                out.push_str(&self.evaluate_text(part, source, ctx)?);
                Ok(out)
            }),
            Expr::Lookup { .. } => match self.evaluate(expr, source, ctx)? {
                Value::String(s) => Ok(s),
                Value::Number(n) => Ok(n.to_string()),
                other => Err(LookupError::InvalidConcatenation {
                    lookup: expr.to_string(),
                    expression: source.to_string(),
                    found: type_name(&other),
                }),
            },
        }
    }
}

impl LookupResolver for VariableResolver {
    fn resolve(
        &self,
        value: &Value,
        context: &DeployContext,
        provider: &dyn Provider,
    ) -> AppResult<Value> {
        let ctx = LookupContext { context, provider };
        Ok(self.resolve_value(value, &ctx)?)
    }
}
