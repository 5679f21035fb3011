//! Hook executor: runs the declarations of one stage in order.
//!
//! Per declaration:
//! - Disabled declarations are skipped without touching the loader.
//! - Args are resolved just before the hook runs, so lookups see data
//!   published by earlier hooks of the same stage.
//! - A missing module always aborts the stage. A missing capability, a
//!   lookup failure or a hook error aborts only if the declaration is
//!   required.
//! - A truthy mapping result with a `data_key` is merged into `hook_data`.
//!   A key that is already present always aborts the stage.

use std::sync::Arc;

use chrono::Utc;
use serde_json::{Map, Value};
use stagehook_core::config::EngineConfig;
use stagehook_core::context::DeployContext;
use stagehook_core::error::AppError;
use stagehook_core::traits::{LookupResolver, Provider};
use stagehook_core::types::{HookDeclaration, is_truthy};
use tracing::{debug, error, info, warn};

use crate::adapter::{Invocation, invoke};
use crate::error::{HookError, LoadError};
use crate::loader::CapabilityLoader;
use crate::outcome::{HookOutcome, HookRecord, OutcomeStatus, StageReport};

/// Runs stage declarations against a loader and a lookup resolver.
#[derive(Clone)]
pub struct HookExecutor {
    /// Resolves hook paths.
    loader: Arc<dyn CapabilityLoader>,
    /// Resolves lookups in hook args.
    resolver: Arc<dyn LookupResolver>,
    /// Engine options.
    config: EngineConfig,
}

impl std::fmt::Debug for HookExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookExecutor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HookExecutor {
    /// Creates an executor with default options.
    pub fn new(loader: Arc<dyn CapabilityLoader>, resolver: Arc<dyn LookupResolver>) -> Self {
        Self {
            loader,
            resolver,
            config: EngineConfig::default(),
        }
    }

    /// Replaces the engine options.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the engine options.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs every declaration for `stage`, in order.
    ///
    /// Returns the report of a completed stage, or the first fatal error.
    /// Declarations after a fatal error are not run.
    pub async fn run_stage(
        &self,
        stage: &str,
        declarations: &[HookDeclaration],
        provider: &dyn Provider,
        context: &mut DeployContext,
    ) -> Result<StageReport, HookError> {
        let mut report = StageReport::new(context.run_id(), stage);

        if declarations.is_empty() {
            debug!(stage = %stage, "No hooks declared for stage");
            return Ok(report);
        }

        debug!(stage = %stage, hook_count = declarations.len(), "Running stage hooks");

        for decl in declarations {
            let record = self.run_one(stage, decl, provider, context).await?;
            report.hooks.push(record);
        }

        report.finished_at = Utc::now();
        info!(
            stage = %stage,
            succeeded = report.count(OutcomeStatus::Success),
            empty = report.count(OutcomeStatus::Empty),
            skipped = report.count(OutcomeStatus::Skipped),
            failed = report.count(OutcomeStatus::LoadFailure)
                + report.count(OutcomeStatus::InvocationFailure),
            "Stage hooks complete"
        );

        Ok(report)
    }

    async fn run_one(
        &self,
        stage: &str,
        decl: &HookDeclaration,
        provider: &dyn Provider,
        context: &mut DeployContext,
    ) -> Result<HookRecord, HookError> {
        let path = decl.path.as_str();

        if !decl.enabled {
            debug!(stage = %stage, path = %path, "Hook disabled, skipping");
            return Ok(record(decl, &HookOutcome::Skipped, None));
        }

        let args = match self.resolve_args(decl, provider, context) {
            Ok(args) => args,
            Err(err) => {
                if decl.required {
                    error!(
                        stage = %stage,
                        path = %path,
                        error = %err,
                        "Failed to resolve hook args"
                    );
                    return Err(HookError::LookupResolution {
                        path: path.to_string(),
                        source: err,
                    });
                }
                warn!(
                    stage = %stage,
                    path = %path,
                    error = %err,
                    "Failed to resolve args for non-required hook"
                );
                return Ok(record(decl, &HookOutcome::InvocationFailure(err), None));
            }
        };

        let capability = match self.loader.load(path) {
            Ok(capability) => capability,
            Err(err @ LoadError::ModuleNotFound { .. }) => {
                error!(stage = %stage, path = %path, error = %err, "Hook module not found");
                return Err(HookError::ModuleResolution {
                    path: path.to_string(),
                    source: err,
                });
            }
            Err(err) => {
                if decl.required {
                    error!(stage = %stage, path = %path, error = %err, "Failed to load hook");
                    return Err(HookError::CapabilityResolution {
                        path: path.to_string(),
                        source: err,
                    });
                }
                warn!(
                    stage = %stage,
                    path = %path,
                    error = %err,
                    "Failed to load non-required hook"
                );
                return Ok(record(decl, &HookOutcome::LoadFailure(err), None));
            }
        };

        debug!(
            stage = %stage,
            path = %path,
            shape = capability.shape(),
            required = decl.required,
            "Invoking hook"
        );

        let invocation = invoke(&capability, stage, context, provider, args).await;
        let value = match invocation {
            Ok(Invocation::Returned(value)) => value,
            Ok(Invocation::NoEntryPoint) => {
                return Ok(record(decl, &HookOutcome::Empty, None));
            }
            Err(err) => {
                if decl.required {
                    error!(stage = %stage, path = %path, error = %err, "Required hook failed");
                    return Err(HookError::Invocation {
                        path: path.to_string(),
                        source: err,
                    });
                }
                warn!(stage = %stage, path = %path, error = %err, "Non-required hook failed");
                return Ok(record(decl, &HookOutcome::InvocationFailure(err), None));
            }
        };

        if !is_truthy(&value) {
            if self.config.strict_results {
                if decl.required {
                    error!(stage = %stage, path = %path, "Required hook returned an empty result");
                    return Err(HookError::EmptyResult {
                        path: path.to_string(),
                    });
                }
                warn!(stage = %stage, path = %path, "Non-required hook returned an empty result");
            }
            debug!(stage = %stage, path = %path, "Hook returned an empty result");
            return Ok(record(decl, &HookOutcome::Empty, None));
        }

        let stored_as = match (decl.data_key(), value) {
            (Some(key), Value::Object(map)) => {
                context.set_hook_data(key, map).map_err(|source| {
                    error!(
                        stage = %stage,
                        path = %path,
                        data_key = %key,
                        "Hook data key already in use"
                    );
                    HookError::DuplicateKey {
                        path: path.to_string(),
                        source,
                    }
                })?;
                debug!(stage = %stage, path = %path, data_key = %key, "Hook data stored");
                Some(key.to_string())
            }
            _ => None,
        };

        Ok(record(decl, &HookOutcome::Success, stored_as))
    }

    fn resolve_args(
        &self,
        decl: &HookDeclaration,
        provider: &dyn Provider,
        context: &DeployContext,
    ) -> Result<Map<String, Value>, AppError> {
        if decl.args.is_empty() {
            return Ok(Map::new());
        }

        match self
            .resolver
            .resolve(&Value::Object(decl.args.clone()), context, provider)?
        {
            Value::Object(map) => Ok(map),
            other => Err(AppError::lookup(format!(
                "resolved args must be a mapping, got {other}"
            ))),
        }
    }
}

fn record(
    decl: &HookDeclaration,
    outcome: &HookOutcome,
    stored_as: Option<String>,
) -> HookRecord {
    HookRecord {
        path: decl.path.clone(),
        status: outcome.status(),
        required: decl.required,
        stored_as,
        error: outcome.error_message(),
    }
}
