//! Error types for exactum operations.

use thiserror::Error;

/// Errors that can occur when constructing or re-targeting a transform.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// The rectangle does not fit in the signed 16-bit coordinate domain.
    #[error("rectangle exceeds the signed 16-bit coordinate domain")]
    DomainOutOfRange,
}
