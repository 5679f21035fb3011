//! `list`: shows registered hooks.

use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use stagehook_core::error::AppError;

/// Capability display row for table output
#[derive(Debug, Serialize, Tabled)]
struct CapabilityRow {
    /// Hook path
    path: String,
    /// Function or stage object
    shape: String,
}

/// Execute the list command
pub fn execute(format: OutputFormat) -> Result<(), AppError> {
    let registry = super::build_registry()?;

    let rows: Vec<CapabilityRow> = registry
        .list()
        .into_iter()
        .map(|info| CapabilityRow {
            path: info.path,
            shape: info.shape.to_string(),
        })
        .collect();

    output::print_list(&rows, format);
    Ok(())
}
