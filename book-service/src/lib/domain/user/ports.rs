use async_trait::async_trait;

use crate::domain::user::models::IssuedToken;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::models::Username;

/// Port for registration and login.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Hash the password and persist a new credential.
    ///
    /// # Arguments
    /// * `command` - Validated username and plaintext password
    ///
    /// # Returns
    /// Stored credential
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `Hashing` - Password could not be hashed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Verify credentials and issue a bearer token.
    ///
    /// Unknown username and wrong password fail identically.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `Token` - Token could not be signed
    /// * `DatabaseError` - Credential lookup failed
    async fn login(&self, command: LoginCommand) -> Result<IssuedToken, UserError>;
}

/// Persistence operations for credentials.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new credential to storage.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve credential by username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
}
