//! Configuration inspection CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use stagehook_core::config::AppConfig;
use stagehook_core::error::AppError;
use stagehook_core::types::Stage;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the loaded configuration
    Show,
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => match format {
            OutputFormat::Json => output::print_json(config, "{}"),
            OutputFormat::Table => {
                output::print_success(&format!("Configuration '{}'", config_path));
                output::print_kv("Namespace", &config.deployment.namespace);
                output::print_kv("Environment", &config.deployment.environment);
                output::print_kv("Parameters", &config.deployment.parameters.len().to_string());
                for stage in Stage::ALL {
                    let hooks = config.deployment.hooks_for(stage);
                    output::print_kv(stage.as_str(), &format!("{} hook(s)", hooks.len()));
                }
                output::print_kv("Strict results", &config.engine.strict_results.to_string());
                output::print_kv("Log level", &config.logging.level);
                if config.deployment.namespace.is_empty() {
                    output::print_warning("No namespace configured");
                }
            }
        },
    }

    Ok(())
}
