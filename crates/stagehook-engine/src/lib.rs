//! # stagehook-engine
//!
//! Lifecycle hook engine. Provides:
//!
//! - Two hook shapes: plain functions and stage-dispatching objects
//! - A build-time capability registry keyed by symbolic path
//! - An invocation adapter that gives both shapes one calling convention
//! - A sequential stage executor with per-declaration fatality rules

pub mod adapter;
pub mod capability;
pub mod error;
pub mod executor;
pub mod loader;
pub mod macros;
pub mod outcome;
pub mod prelude;

pub use adapter::Invocation;
pub use capability::{Capability, ClosureHook, HookCall, HookFunction, StageHook};
pub use error::{HookError, LoadError};
pub use executor::HookExecutor;
pub use loader::{CapabilityInfo, CapabilityLoader, CapabilityRegistry};
pub use outcome::{HookOutcome, HookRecord, OutcomeStatus, StageReport};
