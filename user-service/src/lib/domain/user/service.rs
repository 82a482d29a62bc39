use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::AuthorizationContext;
use auth::StoredCredential;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::IssueTokenCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

// Verified against when the email is unknown so both login failures cost one digest.
const UNKNOWN_USER_SALT: &str = "00000000000000000000000000000000";
const UNKNOWN_USER_DIGEST: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

/// Domain service implementation for user operations.
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
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Credential digests and token issuance
    ///
    /// # Returns
    /// Configured user service instance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    fn reject_unknown_user(&self, command: &IssueTokenCommand) -> Result<String, UserError> {
        let placeholder = StoredCredential {
            digest: UNKNOWN_USER_DIGEST.to_string(),
            salt: UNKNOWN_USER_SALT.to_string(),
        };
        self.authenticator
            .verify_password(command.password.expose(), &placeholder)?;

        Err(UserError::InvalidCredentials)
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let credential = self
            .authenticator
            .hash_password(command.password.expose())?;

        let user = User {
            id: UserId::new(),
            first_name: command.first_name,
            last_name: command.last_name,
            email: command.email,
            password_digest: credential.digest,
            salt: credential.salt,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn issue_token(&self, command: IssueTokenCommand) -> Result<String, UserError> {
        let Some(user) = self.repository.find_by_email(&command.email).await? else {
            tracing::debug!("Token requested for unknown email");
            return self.reject_unknown_user(&command);
        };

        let claims = self.authenticator.claims_for(user.id, user.email.as_str());

        let result = self
            .authenticator
            .authenticate(command.password.expose(), &user.credential(), &claims)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::debug!(user_id = %user.id, "Token requested with wrong password");
                    UserError::InvalidCredentials
                }
                AuthenticationError::PasswordError(err) => UserError::from(err),
                AuthenticationError::TokenError(err) => UserError::from(err),
            })?;

        tracing::info!(user_id = %user.id, "Session token issued");

        Ok(result.access_token)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn get_current_user(&self, context: &AuthorizationContext) -> Result<User, UserError> {
        let claims = context.subject().ok_or(UserError::Unauthorized)?;
        // A signed id that is not a UUID names no user of this service.
        let user_id = UserId::from_string(&claims.id)
            .map_err(|_| UserError::NotFound(claims.id.clone()))?;

        self.get_user(&user_id).await
    }
}
