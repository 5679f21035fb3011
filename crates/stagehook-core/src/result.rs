//! Convenience result type alias for stagehook.

use crate::error::AppError;

/// A specialized `Result` type for stagehook operations.
///
/// Hook bodies, lookup handlers, and configuration loaders all return this so
/// that every crate does not need to write `Result<T, AppError>` explicitly.
pub type AppResult<T> = Result<T, AppError>;
