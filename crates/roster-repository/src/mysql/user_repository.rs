//! MySQL user repository implementation.

use crate::{traits::UserRepository, DatabasePool};
use async_trait::async_trait;
use roster_core::{NewUser, RosterError, RosterResult, User, UserChanges, UserId};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

const SELECT_USER: &str = "SELECT id, name, email, password_hash FROM users";

/// MySQL user repository implementation.
#[derive(Clone)]
pub struct MySqlUserRepository {
    pool: Arc<DatabasePool>,
}

impl MySqlUserRepository {
    /// Creates a new MySQL user repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: String, // MySQL stores UUID as CHAR(36)
    name: String,
    email: String,
    password_hash: Option<String>,
}

impl TryFrom<UserRow> for User {
    type Error = RosterError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = UserId::parse(&row.id)
            .map_err(|e| RosterError::Internal(format!("Invalid UUID in database: {e}")))?;

        Ok(User {
            id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn save(&self, user: NewUser) -> RosterResult<User> {
        let id = UserId::new();
        debug!("Saving new user: {}", id);

        sqlx::query("INSERT INTO users (id, name, email, password_hash) VALUES (?, ?, ?, ?)")
            .bind(id.to_string())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .execute(self.pool.inner())
            .await?;

        Ok(User::from_new(id, user))
    }

    async fn find_all(&self) -> RosterResult<Vec<User>> {
        debug!("Finding all users");

        let rows = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} ORDER BY seq"))
            .fetch_all(self.pool.inner())
            .await?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(User::try_from).transpose()
    }

    async fn update(&self, id: UserId, changes: UserChanges) -> RosterResult<Option<User>> {
        debug!("Updating user: {}", id);

        if changes.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut tx = self.pool.inner().begin().await?;

        // MySQL has no RETURNING, so update then select in one transaction
        sqlx::query(
            r"
            UPDATE users
            SET name = COALESCE(?, name),
                email = COALESCE(?, email),
                password_hash = COALESCE(?, password_hash)
            WHERE id = ?
            ",
        )
        .bind(&changes.name)
        .bind(&changes.email)
        .bind(&changes.password_hash)
        .bind(id.to_string())
        .execute(&mut *tx)
        .await?;

        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;

        row.map(User::try_from).transpose()
    }

    async fn delete(&self, id: UserId) -> RosterResult<Option<User>> {
        debug!("Deleting user: {}", id);

        let mut tx = self.pool.inner().begin().await?;

        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE id = ? FOR UPDATE"))
            .bind(id.to_string())
            .fetch_optional(&mut *tx)
            .await?;

        let Some(row) = row else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        User::try_from(row).map(Some)
    }
}

impl std::fmt::Debug for MySqlUserRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlUserRepository").finish_non_exhaustive()
    }
}
