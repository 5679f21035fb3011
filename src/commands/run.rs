//! `run`: executes the hooks declared for one stage.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use stagehook_core::config::AppConfig;
use stagehook_core::context::DeployContext;
use stagehook_core::error::AppError;
use stagehook_core::traits::StaticProvider;
use stagehook_core::types::Stage;
use stagehook_engine::{HookRecord, StageReport};

/// Arguments for the run command
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Stage to run (pre_deploy, post_deploy, pre_destroy, post_destroy)
    pub stage: Stage,

    /// Provider name passed to hooks
    #[arg(long, default_value = "local")]
    pub provider: String,

    /// Provider region
    #[arg(long)]
    pub region: Option<String>,
}

/// Hook record row for table output
#[derive(Debug, Serialize, Tabled)]
struct HookRow {
    /// Hook path
    path: String,
    /// Outcome
    status: String,
    /// Required flag
    required: bool,
    /// Data key the result was stored under
    stored_as: String,
    /// Failure message
    error: String,
}

impl From<&HookRecord> for HookRow {
    fn from(record: &HookRecord) -> Self {
        Self {
            path: record.path.clone(),
            status: record.status.to_string(),
            required: record.required,
            stored_as: record.stored_as.clone().unwrap_or_default(),
            error: record.error.clone().unwrap_or_default(),
        }
    }
}

/// Execute the run command
pub async fn execute(
    args: &RunArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let executor = super::build_executor(config)?;

    let mut provider = StaticProvider::new(args.provider.clone());
    if let Some(region) = &args.region {
        provider = provider.with_region(region.clone());
    }

    let mut context = DeployContext::from_config(&config.deployment);
    let declarations = config.deployment.hooks_for(args.stage);

    tracing::info!(
        run_id = %context.run_id(),
        stage = %args.stage,
        namespace = %context.namespace,
        hooks = declarations.len(),
        "Running stage"
    );

    let report = executor
        .run_stage(args.stage.as_str(), declarations, &provider, &mut context)
        .await?;

    print_report(&report, &context, format);
    Ok(())
}

fn print_report(report: &StageReport, context: &DeployContext, format: OutputFormat) {
    match format {
        OutputFormat::Json => output::print_json(
            &serde_json::json!({
                "report": report,
                "hook_data": context.hook_data(),
            }),
            "{}",
        ),
        OutputFormat::Table => {
            let rows: Vec<HookRow> = report.hooks.iter().map(HookRow::from).collect();
            output::print_list(&rows, format);
            output::print_success(&format!(
                "Stage '{}' complete ({} hooks)",
                report.stage,
                report.hooks.len()
            ));
        }
    }
}
