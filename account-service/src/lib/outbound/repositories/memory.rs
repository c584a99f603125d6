use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserPatch;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Process-local user store.
///
/// Email uniqueness is checked and the write applied under the same write
/// lock, so concurrent creates for one address cannot both succeed.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_taken_by_other(users: &HashMap<UserId, User>, email: &str, id: &UserId) -> bool {
    users
        .values()
        .any(|user| user.id != *id && user.email.as_str() == email)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if email_taken_by_other(&users, user.email.as_str(), &user.id) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        if users.contains_key(&user.id) {
            return Err(UserError::DatabaseError(format!(
                "duplicate user id {}",
                user.id
            )));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email.as_str() == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn update(&self, id: &UserId, patch: UserPatch) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if let Some(email) = &patch.email {
            if email_taken_by_other(&users, email.as_str(), id) {
                return Err(UserError::EmailAlreadyExists(email.to_string()));
            }
        }

        let user = users
            .get_mut(id)
            .ok_or(UserError::NotFound(id.to_string()))?;
        patch.apply_to(user);

        Ok(user.clone())
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        self.users
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Name;

    fn user(email: &str) -> User {
        User {
            id: UserId::new(),
            name: Name::new("A".to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repository = InMemoryUserRepository::new();
        let created = repository.create(user("a@x.com")).await.unwrap();

        let by_id = repository.find_by_id(&created.id).await.unwrap().unwrap();
        let by_email = repository.find_by_email("a@x.com").await.unwrap().unwrap();

        assert_eq!(by_id.id, created.id);
        assert_eq!(by_email.id, created.id);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let repository = InMemoryUserRepository::new();
        repository.create(user("a@x.com")).await.unwrap();

        let result = repository.create(user("a@x.com")).await;

        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
        assert_eq!(repository.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_allows_own_email_and_rejects_foreign_email() {
        let repository = InMemoryUserRepository::new();
        let first = repository.create(user("a@x.com")).await.unwrap();
        repository.create(user("b@x.com")).await.unwrap();

        let own = UserPatch {
            email: Some(EmailAddress::new("a@x.com".to_string()).unwrap()),
            ..UserPatch::default()
        };
        assert!(repository.update(&first.id, own).await.is_ok());

        let foreign = UserPatch {
            email: Some(EmailAddress::new("b@x.com".to_string()).unwrap()),
            ..UserPatch::default()
        };
        let result = repository.update(&first.id, foreign).await;
        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_user() {
        let repository = InMemoryUserRepository::new();
        let id = UserId::new();

        let update = repository
            .update(&id, UserPatch::password_hash("$argon2id$x".to_string()))
            .await;
        assert!(matches!(update, Err(UserError::NotFound(_))));

        let delete = repository.delete(&id).await;
        assert!(matches!(delete, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_concurrent_creates_with_same_email() {
        let repository = std::sync::Arc::new(InMemoryUserRepository::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repository = std::sync::Arc::clone(&repository);
                tokio::spawn(async move { repository.create(user("race@x.com")).await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(repository.list_all().await.unwrap().len(), 1);
    }
}
