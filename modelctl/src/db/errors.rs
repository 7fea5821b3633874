use crate::validation::ValidationError;
use thiserror::Error;

/// Unified error type for storage operations that application code can handle
#[derive(Error, Debug)]
pub enum DbError {
    /// Entity not found by the given identifier
    #[error("Entity not found")]
    NotFound,

    /// A field of the request broke a validation rule; nothing after it was applied
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Type alias for storage operation results
pub type Result<T> = std::result::Result<T, DbError>;
