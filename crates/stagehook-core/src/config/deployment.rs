//! Deployment run configuration: identity, parameters, and per-stage hooks.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::types::{HookDeclaration, Stage};

/// The deployment section of the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DeploymentConfig {
    /// Deployment namespace.
    #[serde(default)]
    pub namespace: String,
    /// Deploy environment name.
    #[serde(default = "default_environment")]
    pub environment: String,
    /// Parameters available to lookups.
    #[serde(default)]
    pub parameters: Map<String, Value>,
    /// Hooks run before deploying.
    #[serde(default)]
    #[validate(nested)]
    pub pre_deploy: Vec<HookDeclaration>,
    /// Hooks run after deploying.
    #[serde(default)]
    #[validate(nested)]
    pub post_deploy: Vec<HookDeclaration>,
    /// Hooks run before destroying.
    #[serde(default)]
    #[validate(nested)]
    pub pre_destroy: Vec<HookDeclaration>,
    /// Hooks run after destroying.
    #[serde(default)]
    #[validate(nested)]
    pub post_destroy: Vec<HookDeclaration>,
}

impl DeploymentConfig {
    /// Returns the declarations for a stage, in authored order.
    pub fn hooks_for(&self, stage: Stage) -> &[HookDeclaration] {
        match stage {
            Stage::PreDeploy => &self.pre_deploy,
            Stage::PostDeploy => &self.post_deploy,
            Stage::PreDestroy => &self.pre_destroy,
            Stage::PostDestroy => &self.post_destroy,
        }
    }

    /// Iterates every declaration with the stage it belongs to.
    pub fn all_hooks(&self) -> impl Iterator<Item = (Stage, &HookDeclaration)> {
        Stage::ALL
            .into_iter()
            .flat_map(move |stage| self.hooks_for(stage).iter().map(move |decl| (stage, decl)))
    }
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            namespace: String::new(),
            environment: default_environment(),
            parameters: Map::new(),
            pre_deploy: Vec::new(),
            post_deploy: Vec::new(),
            pre_destroy: Vec::new(),
            post_destroy: Vec::new(),
        }
    }
}

fn default_environment() -> String {
    "default".to_string()
}
