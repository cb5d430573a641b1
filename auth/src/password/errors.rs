use thiserror::Error;

/// Error type for password operations.
///
/// Verification never fails with an error; only producing a digest can.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
