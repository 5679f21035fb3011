//! Built-in hooks for stagehook.
//!
//! Everything here is registered under the `stagehook.builtins` package:
//!
//! | Path | Shape |
//! |------|-------|
//! | `stagehook.builtins.command.run_command` | function |
//! | `stagehook.builtins.data.echo` | function |
//! | `stagehook.builtins.fs.EnsureDirectory` | stage object |

pub mod command;
pub mod data;
pub mod fs;

use stagehook_engine::error::LoadError;
use stagehook_engine::loader::CapabilityRegistry;
use stagehook_engine::register_functions;

/// Package prefix of every built-in hook path.
pub const PACKAGE: &str = "stagehook.builtins";

/// Registers every built-in hook.
pub fn register(registry: &mut CapabilityRegistry) -> Result<(), LoadError> {
    register_functions!(registry, format!("{PACKAGE}.command"), {
        "run_command" => command::RunCommand,
    })?;
    register_functions!(registry, format!("{PACKAGE}.data"), {
        "echo" => data::Echo,
    })?;
    registry.register_stage_hook::<fs::EnsureDirectory>(&format!(
        "{PACKAGE}.fs.EnsureDirectory"
    ))
}
