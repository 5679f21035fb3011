//! Prelude for hook authors.

pub use async_trait::async_trait;
pub use serde_json::{Map, Value};

pub use stagehook_core::context::DeployContext;
pub use stagehook_core::error::AppError;
pub use stagehook_core::result::AppResult;
pub use stagehook_core::traits::Provider;

pub use crate::capability::{ClosureHook, HookCall, HookFunction, StageHook};
pub use crate::loader::CapabilityRegistry;

pub use crate::{hook_args, register_functions};
