//! CLI command definitions and dispatch.

pub mod config;
pub mod list;
pub mod run;
pub mod validate;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use stagehook_core::config::AppConfig;
use stagehook_core::error::AppError;
use stagehook_engine::{CapabilityRegistry, HookExecutor};
use stagehook_lookup::VariableResolver;

/// stagehook: lifecycle hooks for stack deployments
#[derive(Debug, Parser)]
#[command(name = "stagehook", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "stagehook.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the hooks of one stage
    Run(run::RunArgs),
    /// Check that every declared hook path resolves
    Validate,
    /// List registered hooks
    List,
    /// Configuration inspection
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Run(args) => run::execute(args, &config, self.format).await,
            Commands::Validate => validate::execute(&config, self.format),
            Commands::List => list::execute(self.format),
            Commands::Config(args) => config::execute(args, &config, &self.config, self.format),
        }
    }
}

/// Helper: registry holding every built-in hook
pub fn build_registry() -> Result<CapabilityRegistry, AppError> {
    let mut registry = CapabilityRegistry::new();
    stagehook_builtins::register(&mut registry)?;
    Ok(registry)
}

/// Helper: executor over the built-in hooks and lookups
pub fn build_executor(config: &AppConfig) -> Result<HookExecutor, AppError> {
    let registry = Arc::new(build_registry()?);
    let resolver = Arc::new(VariableResolver::with_builtins());
    Ok(HookExecutor::new(registry, resolver).with_config(config.engine.clone()))
}
