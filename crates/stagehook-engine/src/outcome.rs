//! Per-declaration outcomes and the stage report.

use chrono::{DateTime, Utc};
use serde::Serialize;
use stagehook_core::error::AppError;
use stagehook_core::types::RunId;

use crate::error::LoadError;

/// How one declaration ended.
#[derive(Debug, Clone)]
pub enum HookOutcome {
    /// The declaration is disabled.
    Skipped,
    /// The hook returned a truthy value.
    Success,
    /// The hook returned a falsy value, or a stage object had no entry point.
    Empty,
    /// The hook path could not be resolved.
    LoadFailure(LoadError),
    /// Argument resolution, construction or invocation failed.
    InvocationFailure(AppError),
}

impl HookOutcome {
    /// Classification tag of the outcome.
    pub fn status(&self) -> OutcomeStatus {
        match self {
            Self::Skipped => OutcomeStatus::Skipped,
            Self::Success => OutcomeStatus::Success,
            Self::Empty => OutcomeStatus::Empty,
            Self::LoadFailure(_) => OutcomeStatus::LoadFailure,
            Self::InvocationFailure(_) => OutcomeStatus::InvocationFailure,
        }
    }

    /// Error message for failed outcomes.
    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::LoadFailure(err) => Some(err.to_string()),
            Self::InvocationFailure(err) => Some(err.to_string()),
            _ => None,
        }
    }
}

/// Serializable outcome tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// Not run.
    Skipped,
    /// Ran with a truthy result.
    Success,
    /// Ran with a falsy result.
    Empty,
    /// Path did not resolve.
    LoadFailure,
    /// Hook failed.
    InvocationFailure,
}

impl std::fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Skipped => "skipped",
            Self::Success => "success",
            Self::Empty => "empty",
            Self::LoadFailure => "load_failure",
            Self::InvocationFailure => "invocation_failure",
        };
        write!(f, "{s}")
    }
}

/// Record of one declaration in a stage run.
#[derive(Debug, Clone, Serialize)]
pub struct HookRecord {
    /// Hook path.
    pub path: String,
    /// Outcome tag.
    pub status: OutcomeStatus,
    /// Whether the declaration was required.
    pub required: bool,
    /// Key the result was published under, if it was stored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stored_as: Option<String>,
    /// Error message for failed outcomes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summary of one stage run.
#[derive(Debug, Clone, Serialize)]
pub struct StageReport {
    /// Run the stage belonged to.
    pub run_id: RunId,
    /// Stage name.
    pub stage: String,
    /// When the stage started.
    pub started_at: DateTime<Utc>,
    /// When the stage finished.
    pub finished_at: DateTime<Utc>,
    /// One record per declaration, in order.
    pub hooks: Vec<HookRecord>,
}

impl StageReport {
    /// Starts an empty report.
    pub fn new(run_id: RunId, stage: &str) -> Self {
        let now = Utc::now();
        Self {
            run_id,
            stage: stage.to_string(),
            started_at: now,
            finished_at: now,
            hooks: Vec::new(),
        }
    }

    /// Number of records with the given status.
    pub fn count(&self, status: OutcomeStatus) -> usize {
        self.hooks.iter().filter(|h| h.status == status).count()
    }
}
