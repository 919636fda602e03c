// Defines a custom error type and a result type alias for the API layer using the thiserror crate.
use thiserror::Error;

// Make the response module public
pub mod response;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    // The #[from] attribute automatically converts a sqlx::Error into an AppError::Database using the From trait.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

// Custom result type
pub type AppResult<T> = Result<T, AppError>;
