use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::IssuedToken;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for registration and login.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential persistence implementation
    /// * `authenticator` - Password hashing and token signing
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(password.expose()))
                .await
                .map_err(|e| UserError::Hashing(e.to_string()))?
                .map_err(|e| UserError::Hashing(e.to_string()))?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn login(&self, command: LoginCommand) -> Result<IssuedToken, UserError> {
        let Ok(username) = Username::new(command.username) else {
            return Err(UserError::InvalidCredentials);
        };

        let user = self
            .repository
            .find_by_username(&username)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let stored_hash = user.password_hash;
        let user_id = user.id;
        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(password.expose(), &stored_hash, user_id)
        })
        .await
        .map_err(|e| UserError::Hashing(e.to_string()))?
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
            AuthenticationError::JwtError(err) => UserError::Token(err.to_string()),
        })?;

        tracing::info!(user_id = %user_id, "User logged in");

        Ok(IssuedToken {
            user_id,
            token: result.access_token,
        })
    }
}
