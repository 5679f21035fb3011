//! Lookup error type.

use stagehook_core::error::{AppError, ErrorKind};
use thiserror::Error;

/// Errors raised while parsing or resolving lookup expressions.
#[derive(Debug, Error)]
pub enum LookupError {
    /// No handler is registered under the lookup name.
    #[error("Unknown lookup type '{name}'")]
    UnknownLookupType {
        /// The lookup name as written.
        name: String,
    },

    /// A handler is already registered under this name.
    #[error("Lookup handler '{name}' is already registered")]
    AlreadyRegistered {
        /// The duplicated name.
        name: String,
    },

    /// The expression is malformed.
    #[error("Invalid lookup syntax in '{expression}': {reason}")]
    InvalidSyntax {
        /// The offending expression.
        expression: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A lookup inside a concatenation produced a non-string value.
    #[error("Expected a string or number from '{lookup}' in '{expression}', got {found}")]
    InvalidConcatenation {
        /// The lookup that produced the bad value.
        lookup: String,
        /// The full concatenated expression.
        expression: String,
        /// JSON type name of the value found.
        found: &'static str,
    },

    /// The query passed to a handler is malformed.
    #[error("Invalid lookup query '{query}': {reason}")]
    InvalidQuery {
        /// The query as received by the handler.
        query: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The handler found no value for the query.
    #[error("Could not find a value for '{query}'")]
    NotFound {
        /// The query as received by the handler.
        query: String,
    },

    /// Loading or transforming the result failed.
    #[error("Unable to format lookup result: {reason}")]
    Format {
        /// What went wrong.
        reason: String,
    },

    /// A `file://` query could not be read.
    #[error("Unable to read '{path}': {source}")]
    ReadFile {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A handler failed while resolving a specific lookup.
    #[error("Failed to resolve lookup '{lookup}': {source}")]
    Failed {
        /// The lookup expression (`${name query}`).
        lookup: String,
        /// The handler error.
        #[source]
        source: Box<LookupError>,
    },
}

impl LookupError {
    /// Creates a format error.
    pub fn format(reason: impl Into<String>) -> Self {
        Self::Format {
            reason: reason.into(),
        }
    }
}

impl From<LookupError> for AppError {
    fn from(err: LookupError) -> Self {
        let message = err.to_string();
        AppError::with_source(ErrorKind::Lookup, message, err)
    }
}
