//! Built-in lookup handlers.

pub mod default;
pub mod env;
pub mod envvar;
pub mod hook_data;
pub mod var;

use std::sync::Arc;

use crate::handler::LookupHandler;

pub use default::DefaultLookup;
pub use env::EnvLookup;
pub use envvar::EnvvarLookup;
pub use hook_data::HookDataLookup;
pub use var::VarLookup;

/// Returns one instance of every built-in handler.
pub fn builtin_handlers() -> Vec<Arc<dyn LookupHandler>> {
    vec![
        Arc::new(DefaultLookup),
        Arc::new(EnvLookup),
        Arc::new(EnvvarLookup),
        Arc::new(HookDataLookup),
        Arc::new(VarLookup),
    ]
}
