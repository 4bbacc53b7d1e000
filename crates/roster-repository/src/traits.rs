//! Repository trait definitions.

use async_trait::async_trait;
use roster_core::{NewUser, RosterResult, User, UserChanges, UserId};

/// User repository trait.
///
/// The repository is the only source of truth for users. It assigns ids on
/// insert and reports absence as `Ok(None)` rather than an error.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user and returns it with its assigned id.
    async fn save(&self, user: NewUser) -> RosterResult<User>;

    /// Returns every stored user in insertion order.
    async fn find_all(&self) -> RosterResult<Vec<User>>;

    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<User>>;

    /// Applies `changes` and returns the updated user.
    async fn update(&self, id: UserId, changes: UserChanges) -> RosterResult<Option<User>>;

    /// Deletes a user by ID and returns the removed user.
    async fn delete(&self, id: UserId) -> RosterResult<Option<User>>;
}
