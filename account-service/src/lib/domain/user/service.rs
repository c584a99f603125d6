use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::ChangePasswordCommand;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserPatch;
use crate::domain::user::models::PASSWORD_MAX_LENGTH;
use crate::domain::user::models::PASSWORD_MIN_LENGTH;
use crate::user::errors::UserError;
use crate::user::ports::CredentialHasher;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Owns no state of its own: every call reads from and writes to the
/// repository, and all credential work goes through the hasher port.
pub struct UserService<UR, PH>
where
    UR: UserRepository,
    PH: CredentialHasher,
{
    repository: Arc<UR>,
    password_hasher: Arc<PH>,
}

impl<UR, PH> UserService<UR, PH>
where
    UR: UserRepository,
    PH: CredentialHasher,
{
    /// Create a new user service with injected dependencies.
    pub fn new(repository: Arc<UR>, password_hasher: Arc<PH>) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }

    /// Fails when `email` is registered to a user other than `acting_user`.
    async fn ensure_email_available(
        &self,
        email: &str,
        acting_user: Option<&UserId>,
    ) -> Result<(), UserError> {
        match self.repository.find_by_email(email).await? {
            Some(owner) if Some(&owner.id) != acting_user => {
                Err(UserError::EmailAlreadyExists(email.to_string()))
            }
            _ => Ok(()),
        }
    }
}

/// Collapse a store failure into the operation's user-facing failure.
///
/// Email conflicts raised by the store's uniqueness constraint pass through
/// unchanged.
fn store_failure(operation: &'static str, error: UserError, failure: UserError) -> UserError {
    match error {
        UserError::EmailAlreadyExists(_) => error,
        other => {
            tracing::error!(operation, error = %other, "Store rejected user write");
            failure
        }
    }
}

#[async_trait]
impl<UR, PH> UserServicePort for UserService<UR, PH>
where
    UR: UserRepository,
    PH: CredentialHasher,
{
    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        self.ensure_email_available(command.email.as_str(), None)
            .await
            .map_err(|e| store_failure("create_user", e, UserError::CreateFailed))?;

        let password_hash = self.password_hasher.hash(&command.password)?;

        let user = User {
            id: UserId::new(),
            name: command.name,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self
            .repository
            .create(user)
            .await
            .map_err(|e| store_failure("create_user", e, UserError::CreateFailed))?;

        tracing::info!(user_id = %created_user.id, "User created");

        Ok(created_user)
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        if let Some(email) = &command.email {
            self.ensure_email_available(email.as_str(), Some(id))
                .await
                .map_err(|e| store_failure("update_user", e, UserError::UpdateFailed))?;
        }

        let patch = UserPatch {
            name: command.name,
            email: command.email,
            password_hash: None,
        };

        let updated_user = self
            .repository
            .update(id, patch)
            .await
            .map_err(|e| store_failure("update_user", e, UserError::UpdateFailed))?;

        tracing::info!(user_id = %id, "User updated");

        Ok(updated_user)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository
            .delete(id)
            .await
            .map_err(|e| store_failure("delete_user", e, UserError::DeleteFailed))?;

        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }

    async fn change_password(
        &self,
        id: &UserId,
        command: ChangePasswordCommand,
    ) -> Result<(), UserError> {
        let user = self.get_user(id).await?;

        if !self
            .password_hasher
            .verify(&command.old_password, &user.password_hash)?
        {
            tracing::warn!(user_id = %id, "Password change rejected: old password mismatch");
            return Err(UserError::InvalidCredentials);
        }

        if command.new_password != command.new_password_confirm {
            return Err(UserError::PasswordMismatch);
        }

        let length = command.new_password.chars().count();
        if !(PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&length) {
            return Err(UserError::PasswordLength {
                min: PASSWORD_MIN_LENGTH,
                max: PASSWORD_MAX_LENGTH,
            });
        }

        let password_hash = self.password_hasher.hash(&command.new_password)?;

        self.repository
            .update(id, UserPatch::password_hash(password_hash))
            .await
            .map_err(|e| store_failure("change_password", e, UserError::PasswordUpdateFailed))?;

        tracing::info!(user_id = %id, "Password changed");

        Ok(())
    }
}
