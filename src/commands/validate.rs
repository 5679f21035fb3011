//! `validate`: checks every declared hook path against the registry.

use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use stagehook_core::config::AppConfig;
use stagehook_core::error::AppError;
use stagehook_engine::{CapabilityLoader, LoadError};

/// Declaration check row for table output
#[derive(Debug, Serialize, Tabled)]
struct CheckRow {
    /// Stage
    stage: String,
    /// Hook path
    path: String,
    /// Required flag
    required: bool,
    /// Enabled flag
    enabled: bool,
    /// Resolution result
    status: String,
}

/// Execute the validate command
pub fn execute(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let registry = super::build_registry()?;
    let mut fatal = 0;

    let rows: Vec<CheckRow> = config
        .deployment
        .all_hooks()
        .map(|(stage, decl)| {
            let status = match registry.load(&decl.path) {
                Ok(capability) => capability.shape().to_string(),
                Err(err) => {
                    let is_fatal = decl.enabled
                        && (decl.required || matches!(err, LoadError::ModuleNotFound { .. }));
                    if is_fatal {
                        fatal += 1;
                    }
                    match err {
                        LoadError::ModuleNotFound { .. } => "module not found".to_string(),
                        LoadError::SymbolNotFound { .. } => "hook not found".to_string(),
                        other => other.to_string(),
                    }
                }
            };

            CheckRow {
                stage: stage.to_string(),
                path: decl.path.clone(),
                required: decl.required,
                enabled: decl.enabled,
                status,
            }
        })
        .collect();

    output::print_list(&rows, format);

    if fatal > 0 {
        return Err(AppError::validation(format!(
            "{fatal} hook declaration(s) would abort their stage"
        )));
    }

    if format == OutputFormat::Table {
        output::print_success("All hook declarations resolve");
    }
    Ok(())
}
