//! User service implementation.

use crate::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::user_service::UserService;
use async_trait::async_trait;
use roster_core::{NewUser, RosterError, RosterResult, UserChanges, UserId, ValidateExt};
use roster_repository::UserRepository;
use roster_security::PasswordHasher;
use std::sync::Arc;
use tracing::{debug, error, info};

/// User service backed by a [`UserRepository`].
pub struct UserServiceImpl {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: PasswordHasher,
}

impl UserServiceImpl {
    /// Creates a new user service.
    pub fn new(user_repository: Arc<dyn UserRepository>, password_hasher: PasswordHasher) -> Self {
        Self {
            user_repository,
            password_hasher,
        }
    }
}

/// Logs repository failures before they propagate.
fn log_failure(operation: &'static str) -> impl FnOnce(RosterError) -> RosterError {
    move |e| {
        error!(operation, error = %e, "User repository call failed");
        e
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn create(&self, request: CreateUserRequest) -> RosterResult<UserResponse> {
        debug!("Creating user: {}", request.name);

        request.validate_request()?;

        let password_hash = self.password_hasher.hash_optional(request.password.as_deref())?;
        let new_user = NewUser {
            name: request.name,
            email: request.email,
            password_hash,
        };

        let saved_user = self
            .user_repository
            .save(new_user)
            .await
            .map_err(log_failure("save"))?;

        info!("User created: {}", saved_user.id);
        Ok(UserResponse::from(saved_user))
    }

    async fn find_all(&self) -> RosterResult<Vec<UserResponse>> {
        debug!("Listing users");

        let users = self
            .user_repository
            .find_all()
            .await
            .map_err(log_failure("find_all"))?;

        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<UserResponse>> {
        debug!("Getting user: {}", id);

        let user = self
            .user_repository
            .find_by_id(id)
            .await
            .map_err(log_failure("find_by_id"))?;

        Ok(user.map(UserResponse::from))
    }

    async fn find_by_id_and_update(
        &self,
        id: UserId,
        request: UpdateUserRequest,
    ) -> RosterResult<Option<UserResponse>> {
        debug!("Updating user: {}", id);

        request.validate_request()?;

        let changes = UserChanges {
            password_hash: self.password_hasher.hash_optional(request.password.as_deref())?,
            name: request.name,
            email: request.email,
        };

        let updated = self
            .user_repository
            .update(id, changes)
            .await
            .map_err(log_failure("update"))?;

        if updated.is_some() {
            info!("User updated: {}", id);
        }
        Ok(updated.map(UserResponse::from))
    }

    async fn find_by_id_and_delete(&self, id: UserId) -> RosterResult<Option<UserResponse>> {
        debug!("Deleting user: {}", id);

        let deleted = self
            .user_repository
            .delete(id)
            .await
            .map_err(log_failure("delete"))?;

        if deleted.is_some() {
            info!("User deleted: {}", id);
        }
        Ok(deleted.map(UserResponse::from))
    }
}

impl std::fmt::Debug for UserServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceImpl").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use mockall::predicate::eq;
    use roster_core::User;

    mock! {
        pub UserRepo {}

        #[async_trait]
        impl UserRepository for UserRepo {
            async fn save(&self, user: NewUser) -> RosterResult<User>;
            async fn find_all(&self) -> RosterResult<Vec<User>>;
            async fn find_by_id(&self, id: UserId) -> RosterResult<Option<User>>;
            async fn update(&self, id: UserId, changes: UserChanges) -> RosterResult<Option<User>>;
            async fn delete(&self, id: UserId) -> RosterResult<Option<User>>;
        }
    }

    fn service(repo: MockUserRepo) -> UserServiceImpl {
        UserServiceImpl::new(Arc::new(repo), PasswordHasher::with_cost(1))
    }

    fn stored_user(name: &str, email: &str) -> User {
        User::from_new(UserId::new(), NewUser::new(name, email))
    }

    fn create_request(name: &str, email: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: None,
        }
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut repo = MockUserRepo::new();
        repo.expect_save()
            .withf(|user| user.name == "Ada" && user.email == "ada@example.com" && user.password_hash.is_none())
            .times(1)
            .returning(|user| Ok(User::from_new(UserId::new(), user)));

        let response = service(repo)
            .create(create_request("Ada", "ada@example.com"))
            .await
            .unwrap();

        assert_eq!(response.name, "Ada");
        assert_eq!(response.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let mut repo = MockUserRepo::new();
        repo.expect_save()
            .withf(|user| {
                user.password_hash
                    .as_deref()
                    .is_some_and(|hash| hash.starts_with("$argon2id$") && !hash.contains("hunter2"))
            })
            .times(1)
            .returning(|user| Ok(User::from_new(UserId::new(), user)));

        let request = CreateUserRequest {
            password: Some("hunter2".to_string()),
            ..create_request("Ada", "ada@example.com")
        };

        assert!(service(repo).create(request).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_user_missing_fields_never_persists() {
        let mut repo = MockUserRepo::new();
        repo.expect_save().never();

        let result = service(repo).create(create_request("", "")).await;

        match result {
            Err(RosterError::InvalidFields(fields)) => {
                let names: Vec<&str> = fields.iter().map(|f| f.field.as_str()).collect();
                assert_eq!(names, vec!["email", "name"]);
            }
            other => panic!("expected InvalidFields, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_user_overlong_name_is_validation_error() {
        let mut repo = MockUserRepo::new();
        repo.expect_save().never();

        let err = service(repo)
            .create(create_request(&"a".repeat(300), "ada@example.com"))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 400);
        match err {
            RosterError::InvalidFields(fields) => assert_eq!(fields[0].field, "name"),
            other => panic!("expected InvalidFields, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_user_repository_failure() {
        let mut repo = MockUserRepo::new();
        repo.expect_save()
            .returning(|_| Err(RosterError::database("connection refused")));

        let err = service(repo)
            .create(create_request("Ada", "ada@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, RosterError::Database(_)));
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_find_all_preserves_order() {
        let users = vec![
            stored_user("Ada", "ada@example.com"),
            stored_user("Grace", "grace@example.com"),
        ];
        let expected: Vec<UserResponse> = users.iter().cloned().map(UserResponse::from).collect();

        let mut repo = MockUserRepo::new();
        repo.expect_find_all().times(1).return_once(move || Ok(users));

        assert_eq!(service(repo).find_all().await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_find_all_repository_failure() {
        let mut repo = MockUserRepo::new();
        repo.expect_find_all()
            .returning(|| Err(RosterError::database("connection lost")));

        let err = service(repo).find_all().await.unwrap_err();

        assert!(matches!(err, RosterError::Database(_)));
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let user = stored_user("Ada", "ada@example.com");
        let id = user.id;

        let mut repo = MockUserRepo::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .return_once(move |_| Ok(Some(user)));

        let found = service(repo).find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.id, id);
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let mut repo = MockUserRepo::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        assert!(service(repo).find_by_id(UserId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_passes_only_supplied_fields() {
        let mut user = stored_user("Ada", "ada@example.com");
        let id = user.id;

        let mut repo = MockUserRepo::new();
        repo.expect_update()
            .withf(move |target, changes| {
                *target == id
                    && changes.name.as_deref() == Some("X")
                    && changes.email.is_none()
                    && changes.password_hash.is_none()
            })
            .times(1)
            .return_once(move |_, changes| {
                user.apply(changes);
                Ok(Some(user))
            });

        let request = UpdateUserRequest {
            name: Some("X".to_string()),
            ..Default::default()
        };
        let updated = service(repo).find_by_id_and_update(id, request).await.unwrap().unwrap();

        assert_eq!(updated.name, "X");
        assert_eq!(updated.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let mut repo = MockUserRepo::new();
        repo.expect_update().returning(|_, _| Ok(None));

        let request = UpdateUserRequest {
            name: Some("X".to_string()),
            ..Default::default()
        };
        let result = service(repo).find_by_id_and_update(UserId::new(), request).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_invalid_never_reaches_repository() {
        let mut repo = MockUserRepo::new();
        repo.expect_update().never();

        let request = UpdateUserRequest {
            email: Some(String::new()),
            ..Default::default()
        };
        let err = service(repo)
            .find_by_id_and_update(UserId::new(), request)
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_update_overlong_email_never_reaches_repository() {
        let mut repo = MockUserRepo::new();
        repo.expect_update().never();

        let request = UpdateUserRequest {
            email: Some(format!("{}@example.com", "a".repeat(300))),
            ..Default::default()
        };
        let err = service(repo)
            .find_by_id_and_update(UserId::new(), request)
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_delete_returns_removed_user() {
        let user = stored_user("Ada", "ada@example.com");
        let id = user.id;

        let mut repo = MockUserRepo::new();
        repo.expect_delete()
            .with(eq(id))
            .times(1)
            .return_once(move |_| Ok(Some(user)));

        let deleted = service(repo).find_by_id_and_delete(id).await.unwrap().unwrap();
        assert_eq!(deleted.name, "Ada");
    }

    #[tokio::test]
    async fn test_delete_not_found() {
        let mut repo = MockUserRepo::new();
        repo.expect_delete().returning(|_| Ok(None));

        assert!(service(repo)
            .find_by_id_and_delete(UserId::new())
            .await
            .unwrap()
            .is_none());
    }
}
