//! Hook engine behaviour switches.

use serde::{Deserialize, Serialize};

/// Hook engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Treat a falsy result from a required hook as a failure.
    #[serde(default)]
    pub strict_results: bool,
}
