//! Validation results.
//!
//! A comparison or validation pass returns an ordered list of
//! [`ValidationError`]s. Leaves carry a code, an optional context and a
//! message; consolidated errors group related failures under one parent
//! message and never stand in for a root cause themselves.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine-readable category of a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationErrorCode {
    /// A resource or schema present on one side is missing on the other.
    ResourceTypeNotFound,
    /// Grouping code for consolidated errors.
    ConsolidatedError,
    /// Identifier without a namespace.
    MalformedIdentifier,
    /// Simple type without a wire name.
    UnsupportedSimpleType,
    /// Path component did not resolve.
    NavigationNotFound,
    /// Type identifier did not resolve.
    UnresolvedTypeIdentifier,
    /// Node kind cannot be named.
    UnsupportedNodeKind,
    /// Declared but unimplemented capability was reached.
    NotImplemented,
    /// Example text is not valid JSON.
    InvalidJson,
    /// A documented property is missing from an example.
    MissingRequiredProperty,
    /// An example carries a property the documentation does not define.
    AdditionalPropertyDetected,
    /// A property or member declared on one side is missing on the other.
    PropertyNotFound,
    /// A property is declared with different types on each side.
    PropertyTypeMismatch,
}

impl fmt::Display for ValidationErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A single validation failure or a group of related failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationError {
    /// A root-cause failure.
    Leaf {
        /// Error category.
        code: ValidationErrorCode,
        /// Where the failure was detected, if known.
        context: Option<String>,
        /// Human-readable message.
        message: String,
    },
    /// Several failures sharing one contextual cause.
    Consolidated {
        /// Parent message.
        message: String,
        /// Grouped errors, in detection order.
        children: Vec<ValidationError>,
    },
}

impl ValidationError {
    /// Create a leaf error.
    pub fn new(
        code: ValidationErrorCode,
        context: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        ValidationError::Leaf {
            code,
            context: context.map(str::to_string),
            message: message.into(),
        }
    }

    /// Group `children` under one parent message.
    pub fn consolidated(children: Vec<ValidationError>, message: impl Into<String>) -> Self {
        ValidationError::Consolidated {
            message: message.into(),
            children,
        }
    }

    /// The error's code. Consolidated errors always report `ConsolidatedError`.
    pub fn code(&self) -> ValidationErrorCode {
        match self {
            ValidationError::Leaf { code, .. } => *code,
            ValidationError::Consolidated { .. } => ValidationErrorCode::ConsolidatedError,
        }
    }

    /// The context of a leaf error.
    pub fn context(&self) -> Option<&str> {
        match self {
            ValidationError::Leaf { context, .. } => context.as_deref(),
            ValidationError::Consolidated { .. } => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ValidationError::Leaf { message, .. } | ValidationError::Consolidated { message, .. } => {
                message
            }
        }
    }

    /// Grouped errors; empty for leaves.
    pub fn children(&self) -> &[ValidationError] {
        match self {
            ValidationError::Leaf { .. } => &[],
            ValidationError::Consolidated { children, .. } => children,
        }
    }

    pub fn is_consolidated(&self) -> bool {
        matches!(self, ValidationError::Consolidated { .. })
    }

    /// Depth-first iterator over every leaf beneath (and including) this error.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves { stack: vec![self] }
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            ValidationError::Leaf {
                code,
                context: Some(context),
                message,
            } => write!(f, "{indent}[{code}] {context}: {message}"),
            ValidationError::Leaf {
                code,
                context: None,
                message,
            } => write!(f, "{indent}[{code}] {message}"),
            ValidationError::Consolidated { message, children } => {
                write!(f, "{indent}{message}")?;
                for child in children {
                    writeln!(f)?;
                    child.fmt_indented(f, depth + 1)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

/// Iterator returned by [`ValidationError::leaves`].
pub struct Leaves<'a> {
    stack: Vec<&'a ValidationError>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a ValidationError;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(error) = self.stack.pop() {
            match error {
                ValidationError::Leaf { .. } => return Some(error),
                ValidationError::Consolidated { children, .. } => {
                    self.stack.extend(children.iter().rev());
                }
            }
        }
        None
    }
}
