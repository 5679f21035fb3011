//! Engine error types.

use stagehook_core::context::DuplicateKeyError;
use stagehook_core::error::{AppError, ErrorKind};
use thiserror::Error;

/// Errors raised while resolving a symbolic hook path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The module segment of the path does not resolve.
    #[error("No module named '{module}' (from hook path '{path}')")]
    ModuleNotFound {
        /// Module segment that was looked up.
        module: String,
        /// Full hook path.
        path: String,
    },

    /// The module exists but has no capability with that name.
    #[error("Module '{module}' has no hook named '{symbol}'")]
    SymbolNotFound {
        /// Module that was found.
        module: String,
        /// Name that was missing.
        symbol: String,
    },

    /// A capability is already registered under this path.
    #[error("Hook path '{path}' is already registered")]
    AlreadyRegistered {
        /// The duplicated path.
        path: String,
    },

    /// The path cannot be registered because it names no module.
    #[error("Hook path '{path}' must be in <module>.<name> form")]
    InvalidPath {
        /// The rejected path.
        path: String,
    },
}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        let kind = match &err {
            LoadError::AlreadyRegistered { .. } => ErrorKind::Conflict,
            LoadError::InvalidPath { .. } => ErrorKind::Validation,
            LoadError::ModuleNotFound { .. } | LoadError::SymbolNotFound { .. } => ErrorKind::Load,
        };
        let message = err.to_string();
        AppError::with_source(kind, message, err)
    }
}

/// A fatal condition that aborted a stage.
#[derive(Debug, Error)]
pub enum HookError {
    /// The hook's module could not be resolved. Always fatal.
    #[error("Failed to load hook '{path}': {source}")]
    ModuleResolution {
        /// Hook path.
        path: String,
        /// Loader error.
        #[source]
        source: LoadError,
    },

    /// The hook's capability could not be resolved in a found module.
    #[error("Failed to load hook '{path}': {source}")]
    CapabilityResolution {
        /// Hook path.
        path: String,
        /// Loader error.
        #[source]
        source: LoadError,
    },

    /// The hook failed while being constructed or run.
    #[error("Hook '{path}' failed: {source}")]
    Invocation {
        /// Hook path.
        path: String,
        /// Error raised by the hook.
        #[source]
        source: AppError,
    },

    /// The hook's arguments could not be resolved.
    #[error("Failed to resolve args for hook '{path}': {source}")]
    LookupResolution {
        /// Hook path.
        path: String,
        /// Resolver error.
        #[source]
        source: AppError,
    },

    /// The hook's result was published under a key already in use.
    #[error("Hook '{path}' returned data for a key already in use: {source}")]
    DuplicateKey {
        /// Hook path.
        path: String,
        /// Store error.
        #[source]
        source: DuplicateKeyError,
    },

    /// A required hook returned nothing while strict results are enabled.
    #[error("Required hook '{path}' returned an empty result")]
    EmptyResult {
        /// Hook path.
        path: String,
    },
}

impl HookError {
    /// Path of the hook that aborted the stage.
    pub fn path(&self) -> &str {
        match self {
            Self::ModuleResolution { path, .. }
            | Self::CapabilityResolution { path, .. }
            | Self::Invocation { path, .. }
            | Self::LookupResolution { path, .. }
            | Self::DuplicateKey { path, .. }
            | Self::EmptyResult { path } => path,
        }
    }
}

impl From<HookError> for AppError {
    fn from(err: HookError) -> Self {
        let kind = match &err {
            HookError::ModuleResolution { .. } | HookError::CapabilityResolution { .. } => {
                ErrorKind::Load
            }
            HookError::Invocation { .. } => ErrorKind::Invocation,
            HookError::LookupResolution { .. } => ErrorKind::Lookup,
            HookError::DuplicateKey { .. } => ErrorKind::Conflict,
            HookError::EmptyResult { .. } => ErrorKind::Hook,
        };
        let message = err.to_string();
        AppError::with_source(kind, message, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_kinds() {
        let err: AppError = LoadError::ModuleNotFound {
            module: "missing".into(),
            path: "missing.hook".into(),
        }
        .into();
        assert_eq!(err.kind, ErrorKind::Load);

        let err: AppError = LoadError::AlreadyRegistered {
            path: "pkg.hook".into(),
        }
        .into();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[test]
    fn test_hook_error_path_and_kind() {
        let err = HookError::DuplicateKey {
            path: "pkg.hook".into(),
            source: DuplicateKeyError {
                key: "out".into(),
            },
        };
        assert_eq!(err.path(), "pkg.hook");
        let app: AppError = err.into();
        assert_eq!(app.kind, ErrorKind::Conflict);
    }
}
