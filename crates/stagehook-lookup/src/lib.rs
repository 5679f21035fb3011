//! # stagehook-lookup
//!
//! Lookup expressions for hook arguments. Provides:
//!
//! - A parser for `${name query}` expressions, including nesting and
//!   concatenation with literal text
//! - A registry of named lookup handlers
//! - Built-in handlers: `default`, `env`, `envvar`, `hook_data`, `var`
//! - [`VariableResolver`], the `LookupResolver` implementation the hook
//!   engine uses to resolve argument trees

pub mod error;
pub mod format;
pub mod handler;
pub mod handlers;
pub mod parser;
pub mod registry;
pub mod resolver;

pub use error::LookupError;
pub use handler::{LookupArgs, LookupContext, LookupHandler, LookupQuery};
pub use parser::Expr;
pub use registry::LookupRegistry;
pub use resolver::VariableResolver;
