use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Default lifetime of an issued token.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Authentication coordinator combining password verification and JWT generation.
///
/// Holds the signing secret and token lifetime. Built once at startup and
/// shared read-only between requests.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_ttl: Duration,
}

/// Result of successful authentication.
#[derive(Debug)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create an authenticator issuing tokens valid for
    /// [`DEFAULT_TOKEN_TTL_HOURS`].
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self::with_ttl(jwt_secret, Duration::hours(DEFAULT_TOKEN_TTL_HOURS))
    }

    /// Create an authenticator with an explicit token lifetime.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `token_ttl` - Validity window of issued tokens
    pub fn with_ttl(jwt_secret: &[u8], token_ttl: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            token_ttl,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against its stored digest and issue a token for
    /// `subject`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match or digest is malformed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: impl ToString,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issue_token(subject)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a token for `subject` without password verification.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(&self, subject: impl ToString) -> Result<String, JwtError> {
        let claims = Claims::for_subject(subject, self.token_ttl);
        self.jwt_handler.encode(&claims)
    }

    /// Validate a token's signature and expiry and return its claims.
    ///
    /// # Errors
    /// * `JwtError` - Token is expired, tampered or malformed
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }
}
