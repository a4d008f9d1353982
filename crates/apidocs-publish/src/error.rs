//! Publishing error types.

use thiserror::Error;

/// Errors raised while publishing metadata.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Writing the artifact failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The documentation graph could not be built.
    #[error("failed to build metadata graph: {0}")]
    Build(#[from] apidocs_core::Error),
}
