//! Projects API error types

use thiserror::Error;

/// Errors returned by a [`crate::ProjectsApi`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No project with this id
    #[error("Project not found: {0}")]
    NotFound(u64),

    /// Request body rejected
    #[error("Invalid project: {0}")]
    Invalid(String),

    /// Backing storage failed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ApiError {
    /// HTTP status the REST layer answers with.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::NotFound(_) => 404,
            ApiError::Invalid(_) => 400,
            ApiError::Storage(_) => 500,
        }
    }
}

/// Result type for projects API operations
pub type Result<T> = std::result::Result<T, ApiError>;
