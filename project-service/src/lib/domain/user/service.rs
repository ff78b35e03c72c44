use std::sync::Arc;

use async_trait::async_trait;
use auth::Clock;

use crate::domain::user::credentials::Credentials;
use crate::domain::user::models::Notes;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user profile operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    credentials: Credentials,
    clock: Arc<dyn Clock>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `credentials` - Password hashing for password changes
    /// * `clock` - Time source for session revocation
    pub fn new(repository: Arc<UR>, credentials: Credentials, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            credentials,
            clock,
        }
    }

    async fn load(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.load(id).await
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        if command.is_empty() {
            return Err(UserError::NothingToUpdate);
        }

        let mut user = self.load(id).await?;

        if let Some(new_username) = command.username {
            user.username = new_username;
        }

        if let Some(new_email) = command.email {
            user.email = new_email;
        }

        let password_changed = command.password.is_some();
        if let Some(new_password) = command.password {
            user.password_hash = self.credentials.hash(new_password).await?;
        }

        let revoke_at = user.session_issue_time(self.clock.now());
        let mut updated = self.repository.update(user).await?;

        if password_changed {
            self.repository.revoke_sessions(id, revoke_at).await?;
            updated.sessions_revoked_at = Some(
                updated
                    .sessions_revoked_at
                    .map_or(revoke_at, |revoked_at| revoked_at.max(revoke_at)),
            );
            tracing::info!(user_id = %id, "Password changed, existing sessions revoked");
        }

        Ok(updated)
    }

    async fn update_notes(&self, id: &UserId, notes: Notes) -> Result<User, UserError> {
        let mut user = self.load(id).await?;
        user.notes = notes;

        self.repository.update(user).await
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        // Owned projects and memberships go with the row
        self.repository.delete(id).await?;

        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }
}
