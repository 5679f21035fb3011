//! # stagehook-core
//!
//! Core crate for stagehook. Contains the deployment context and its shared
//! hook data store, hook declarations, configuration schemas, the provider
//! and lookup seams, and the unified error system.
//!
//! This crate has **no** internal dependencies on other stagehook crates.

pub mod config;
pub mod context;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use context::{DeployContext, HookData};
pub use error::AppError;
pub use result::AppResult;
pub use types::{HookDeclaration, RunId};
