//! Deployment run context handed to every hook.

pub mod hook_data;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::config::DeploymentConfig;
use crate::types::RunId;

pub use hook_data::{DuplicateKeyError, HookData};

/// State shared by every hook of one deployment run.
///
/// The context owns the [`HookData`] store. Hooks only ever see it through a
/// shared reference; the hook executor is the one writer, through
/// [`DeployContext::set_hook_data`].
#[derive(Debug)]
pub struct DeployContext {
    /// Identifier of this run.
    run_id: RunId,
    /// When the run started.
    started_at: DateTime<Utc>,
    /// Deployment namespace (prefix for everything the run creates).
    pub namespace: String,
    /// Name of the deploy environment (`dev`, `prod`, ...).
    pub environment: String,
    /// User-supplied parameters, consulted by the `default` and `var` lookups.
    pub parameters: Map<String, Value>,
    /// Snapshot of environment variables taken when the run started.
    pub env_vars: HashMap<String, String>,
    /// Results published by hooks.
    hook_data: HookData,
}

impl DeployContext {
    /// Creates a context, snapshotting the process environment.
    pub fn new(namespace: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            run_id: RunId::new(),
            started_at: Utc::now(),
            namespace: namespace.into(),
            environment: environment.into(),
            parameters: Map::new(),
            env_vars: std::env::vars().collect(),
            hook_data: HookData::new(),
        }
    }

    /// Creates a context from the deployment section of the configuration.
    pub fn from_config(config: &DeploymentConfig) -> Self {
        Self::new(config.namespace.clone(), config.environment.clone())
            .with_parameters(config.parameters.clone())
    }

    /// Replaces the parameters.
    pub fn with_parameters(mut self, parameters: Map<String, Value>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Inserts a single parameter.
    pub fn with_parameter(mut self, key: &str, value: Value) -> Self {
        self.parameters.insert(key.to_string(), value);
        self
    }

    /// Replaces the environment snapshot.
    pub fn with_env_vars(mut self, env_vars: HashMap<String, String>) -> Self {
        self.env_vars = env_vars;
        self
    }

    /// Returns the run identifier.
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Returns when the run started.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Returns the results published so far.
    pub fn hook_data(&self) -> &HookData {
        &self.hook_data
    }

    /// Publishes a hook result. Fails if `key` was already published.
    ///
    /// Only the hook executor should call this.
    pub fn set_hook_data(
        &mut self,
        key: &str,
        value: Map<String, Value>,
    ) -> Result<(), DuplicateKeyError> {
        self.hook_data.merge(key, value)
    }
}
