//! `fs.EnsureDirectory`: a directory that lives as long as the stack.

use std::path::PathBuf;

use serde::Deserialize;
use serde_json::json;
use stagehook_engine::prelude::*;
use tracing::info;

/// Creates `path` on deploy and removes it after destroy.
///
/// Has no `pre_destroy` entry point.
#[derive(Debug, Clone, Deserialize)]
pub struct EnsureDirectory {
    /// Directory to manage.
    pub path: PathBuf,
}

impl EnsureDirectory {
    async fn create(&self) -> AppResult<Value> {
        let created = !tokio::fs::try_exists(&self.path).await?;
        if created {
            tokio::fs::create_dir_all(&self.path).await?;
            info!(path = %self.path.display(), "Directory created");
        }
        Ok(json!({ "path": self.path, "created": created }))
    }

    async fn remove(&self) -> AppResult<Value> {
        let removed = tokio::fs::try_exists(&self.path).await?;
        if removed {
            tokio::fs::remove_dir_all(&self.path).await?;
            info!(path = %self.path.display(), "Directory removed");
        }
        Ok(json!({ "path": self.path, "removed": removed }))
    }
}

#[async_trait]
impl StageHook for EnsureDirectory {
    fn handles(&self, stage: &str) -> bool {
        matches!(stage, "pre_deploy" | "post_deploy" | "post_destroy")
    }

    async fn run_stage(&self, stage: &str) -> AppResult<Value> {
        match stage {
            "post_destroy" => self.remove().await,
            _ => self.create().await,
        }
    }
}
