//! Error types for ReliefRoute

use thiserror::Error;

/// Main error type for ReliefRoute operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReliefError {
    /// The area identifier is not registered
    #[error("Area {0} not found")]
    UnknownArea(String),

    /// The distribution center identifier is not registered
    #[error("Distribution center {0} not found")]
    UnknownCenter(String),

    /// Feature vector arity differs from the trained model
    #[error("Feature arity mismatch: model expects {expected}, got {found}")]
    ArityMismatch { expected: usize, found: usize },

    /// Invalid caller input (empty or mismatched data, duplicates, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Prediction requested before the model was trained
    #[error("Model is not trained yet")]
    NotReady,

    /// Non-finite or otherwise undefined numeric input
    #[error("Domain error: {0}")]
    Domain(String),
}

/// Coarse classification of a [`ReliefError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad caller input; retrying with the same input cannot succeed.
    Validation,
    /// The component must be prepared (trained) first.
    NotReady,
    /// A formula received or produced an undefined value.
    Domain,
}

impl ReliefError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReliefError::UnknownArea(_)
            | ReliefError::UnknownCenter(_)
            | ReliefError::ArityMismatch { .. }
            | ReliefError::Validation(_) => ErrorKind::Validation,
            ReliefError::NotReady => ErrorKind::NotReady,
            ReliefError::Domain(_) => ErrorKind::Domain,
        }
    }

    /// Shorthand for [`ReliefError::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        ReliefError::Validation(message.into())
    }
}

/// Result type alias for ReliefRoute operations
pub type Result<T> = std::result::Result<T, ReliefError>;
