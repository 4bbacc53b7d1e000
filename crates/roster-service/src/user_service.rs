//! User service trait definition.

use crate::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use async_trait::async_trait;
use roster_core::{RosterResult, UserId};

/// User service trait.
///
/// Validates requests before any repository call. Absence is reported as
/// `Ok(None)`; callers decide how to surface it.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Creates a new user.
    async fn create(&self, request: CreateUserRequest) -> RosterResult<UserResponse>;

    /// Lists every user in insertion order.
    async fn find_all(&self) -> RosterResult<Vec<UserResponse>>;

    /// Gets a user by ID.
    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<UserResponse>>;

    /// Updates the supplied fields and returns the updated user.
    async fn find_by_id_and_update(
        &self,
        id: UserId,
        request: UpdateUserRequest,
    ) -> RosterResult<Option<UserResponse>>;

    /// Deletes a user and returns it.
    async fn find_by_id_and_delete(&self, id: UserId) -> RosterResult<Option<UserResponse>>;
}
