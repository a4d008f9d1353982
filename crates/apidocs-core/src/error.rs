//! Core error types.

use crate::model::SimpleDataType;
use crate::validation::{ValidationError, ValidationErrorCode};
use thiserror::Error;

/// Result type for apidocs operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while resolving identifiers and walking the metadata graph.
#[derive(Debug, Error)]
pub enum Error {
    /// Identifier has no `namespace.` prefix.
    #[error("identifier should be of format {{namespace}}.{{type}}: '{identifier}'")]
    MalformedIdentifier {
        /// The offending identifier.
        identifier: String,
    },

    /// Simple type has no wire name in the type table.
    #[error("attempted to convert an unsupported simple type into a wire name: {0:?}")]
    UnsupportedSimpleType(SimpleDataType),

    /// A path component did not match anything on the node.
    #[error("unable to navigate from {node} by component '{component}'")]
    NavigationNotFound {
        /// The component that failed to match.
        component: String,
        /// Description of the node navigation started from.
        node: String,
    },

    /// Identifier matched neither a graph member nor a simple type.
    #[error("could not resolve type identifier: {identifier}")]
    UnresolvedTypeIdentifier {
        /// The identifier that failed to resolve.
        identifier: String,
    },

    /// Identifier resolved to a member of a different kind than requested.
    #[error("unable to find type identifier '{identifier}' as '{expected}'")]
    TypeMismatch {
        /// The identifier that was looked up.
        identifier: String,
        /// The kind of member the caller asked for.
        expected: &'static str,
    },

    /// The node kind cannot be turned back into an identifier.
    #[error("unsupported node kind: {kind}")]
    UnsupportedNodeKind {
        /// Kind of the node.
        kind: &'static str,
    },

    /// Declared capability that has no implementation yet.
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// A custom type reference was empty.
    #[error("invalid custom type reference: {0}")]
    InvalidCustomType(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Validation code used when this error is reported as a leaf.
    pub fn code(&self) -> ValidationErrorCode {
        match self {
            Error::MalformedIdentifier { .. } | Error::InvalidCustomType(_) => {
                ValidationErrorCode::MalformedIdentifier
            }
            Error::UnsupportedSimpleType(_) => ValidationErrorCode::UnsupportedSimpleType,
            Error::NavigationNotFound { .. } => ValidationErrorCode::NavigationNotFound,
            Error::UnresolvedTypeIdentifier { .. } => ValidationErrorCode::UnresolvedTypeIdentifier,
            Error::TypeMismatch { .. } => ValidationErrorCode::ResourceTypeNotFound,
            Error::UnsupportedNodeKind { .. } => ValidationErrorCode::UnsupportedNodeKind,
            Error::NotImplemented(_) => ValidationErrorCode::NotImplemented,
            Error::Io(_) => ValidationErrorCode::ResourceTypeNotFound,
            Error::Json(_) => ValidationErrorCode::InvalidJson,
        }
    }

    /// Convert into a leaf validation error with the given context.
    pub fn into_validation_error(self, context: Option<&str>) -> ValidationError {
        ValidationError::new(self.code(), context, self.to_string())
    }
}
