//! The lookup handler trait and shared query parsing.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use stagehook_core::context::DeployContext;
use stagehook_core::traits::Provider;

use crate::error::LookupError;

const FILE_PREFIX: &str = "file://";

/// What a handler can see while resolving a query.
#[derive(Clone, Copy)]
pub struct LookupContext<'a> {
    /// The deployment run context.
    pub context: &'a DeployContext,
    /// The infrastructure provider.
    pub provider: &'a dyn Provider,
}

impl fmt::Debug for LookupContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookupContext")
            .field("run_id", &self.context.run_id())
            .field("provider", &self.provider.name())
            .finish()
    }
}

/// Trait implemented by every lookup handler.
pub trait LookupHandler: Send + Sync + fmt::Debug {
    /// Name used in expressions (`${<name> ...}`).
    fn name(&self) -> &'static str;

    /// Resolves a query to a value.
    fn handle(&self, query: &str, ctx: &LookupContext<'_>) -> Result<Value, LookupError>;
}

/// Formatting and handler arguments written after `::` in a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupArgs {
    values: BTreeMap<String, String>,
}

impl LookupArgs {
    /// Parses `key=value, key=value`.
    pub fn parse(raw: &str) -> Result<Self, LookupError> {
        let mut values = BTreeMap::new();
        for arg in raw.split(',') {
            let (key, value) = arg.split_once('=').ok_or_else(|| LookupError::InvalidQuery {
                query: raw.to_string(),
                reason: format!("argument '{}' is not in key=value form", arg.trim()),
            })?;
            values.insert(key.trim().to_string(), value.trim().to_string());
        }
        Ok(Self { values })
    }

    /// Gets an argument value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Removes an argument, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// Returns whether no arguments were given.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A query split into its main part and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupQuery {
    /// Text before `::`.
    pub query: String,
    /// Arguments after `::`.
    pub args: LookupArgs,
}

impl LookupQuery {
    /// Parses `<query>[::key=value, ...]`, reading `file://` values first.
    pub fn parse(raw: &str) -> Result<Self, LookupError> {
        let raw = read_value_from_path(raw)?;
        match raw.split_once("::") {
            Some((query, args)) => Ok(Self {
                query: query.to_string(),
                args: LookupArgs::parse(args)?,
            }),
            None => Ok(Self {
                query: raw,
                args: LookupArgs::default(),
            }),
        }
    }
}

/// Replaces a `file://<path>` value with the trimmed contents of the file.
pub fn read_value_from_path(value: &str) -> Result<String, LookupError> {
    match value.strip_prefix(FILE_PREFIX) {
        Some(path) => std::fs::read_to_string(path)
            .map(|contents| contents.trim().to_string())
            .map_err(|source| LookupError::ReadFile {
                path: path.to_string(),
                source,
            }),
        None => Ok(value.to_string()),
    }
}
