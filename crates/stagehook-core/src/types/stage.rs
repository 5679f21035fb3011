//! Well-known lifecycle stage names.
//!
//! The engine itself treats a stage as an opaque string; this enum only names
//! the stages a deployment run fires and gives the CLI something to parse.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A lifecycle stage at which a list of hooks runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Before any stack is deployed.
    PreDeploy,
    /// After all stacks are deployed.
    PostDeploy,
    /// Before any stack is destroyed.
    PreDestroy,
    /// After all stacks are destroyed.
    PostDestroy,
}

impl Stage {
    /// All well-known stages in lifecycle order.
    pub const ALL: [Stage; 4] = [
        Self::PreDeploy,
        Self::PostDeploy,
        Self::PreDestroy,
        Self::PostDestroy,
    ];

    /// Returns the string name of this stage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreDeploy => "pre_deploy",
            Self::PostDeploy => "post_deploy",
            Self::PreDestroy => "pre_destroy",
            Self::PostDestroy => "post_destroy",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Stage {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Unknown stage '{s}'; expected one of pre_deploy, post_deploy, pre_destroy, post_destroy"
                ))
            })
    }
}
