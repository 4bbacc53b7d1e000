//! In-memory user repository.

use crate::traits::UserRepository;
use async_trait::async_trait;
use parking_lot::RwLock;
use roster_core::{HealthCheck, HealthStatus, NewUser, RosterResult, User, UserChanges, UserId};
use tracing::debug;

/// Process-local user repository backed by a `Vec`, kept in insertion order.
///
/// Used for `memory://` URLs in development and by tests. The lock is never
/// held across an `.await`.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    /// Returns true if no users are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: NewUser) -> RosterResult<User> {
        let user = User::from_new(UserId::new(), user);
        debug!("Saving new user: {}", user.id);
        self.users.write().push(user.clone());
        Ok(user)
    }

    async fn find_all(&self) -> RosterResult<Vec<User>> {
        Ok(self.users.read().clone())
    }

    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<User>> {
        Ok(self.users.read().iter().find(|u| u.id == id).cloned())
    }

    async fn update(&self, id: UserId, changes: UserChanges) -> RosterResult<Option<User>> {
        debug!("Updating user: {}", id);
        let mut users = self.users.write();
        Ok(users.iter_mut().find(|u| u.id == id).map(|user| {
            user.apply(changes);
            user.clone()
        }))
    }

    async fn delete(&self, id: UserId) -> RosterResult<Option<User>> {
        debug!("Deleting user: {}", id);
        let mut users = self.users.write();
        Ok(users
            .iter()
            .position(|u| u.id == id)
            .map(|index| users.remove(index)))
    }
}

#[async_trait]
impl HealthCheck for InMemoryUserRepository {
    fn name(&self) -> &str {
        "memory"
    }

    async fn check(&self) -> HealthStatus {
        HealthStatus::Healthy
    }
}
