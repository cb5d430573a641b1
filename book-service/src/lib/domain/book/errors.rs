use thiserror::Error;

/// Error for BookId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for required text fields (title, author)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequiredFieldError {
    #[error("`{0}` is required")]
    Missing(&'static str),
}

/// Top-level error for all book-related operations
#[derive(Debug, Clone, Error)]
pub enum BookError {
    #[error("Invalid book ID: {0}")]
    InvalidBookId(#[from] BookIdError),

    #[error("Book validation failed: {0}")]
    Validation(#[from] RequiredFieldError),

    #[error("Book not found")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
