//! User management controller.

use crate::{
    extractors::ApiJson,
    responses::{created, ok, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use roster_core::{RosterError, UserId};
use roster_service::{CreateUserRequest, UpdateUserRequest, UserEnvelope, UserListResponse};
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// List all users.
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "All users in insertion order", body = UserListResponse),
        (status = 500, description = "Persistence failure", body = roster_core::ErrorResponse)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> ApiResult<UserListResponse> {
    debug!("List users request");

    let users = state.user_service.find_all().await?;
    ok(users.into())
}

/// Create a new user.
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserEnvelope),
        (status = 400, description = "Invalid request body", body = roster_core::ErrorResponse),
        (status = 500, description = "Persistence failure", body = roster_core::ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserEnvelope>), AppError> {
    debug!("Create user request: {}", request.email);

    let user = state.user_service.create(request).await?;
    Ok(created(user.into()))
}

/// Get a user by ID.
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserEnvelope),
        (status = 400, description = "Malformed user ID", body = roster_core::ErrorResponse),
        (status = 404, description = "No such user")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<UserEnvelope> {
    debug!("Get user request: {}", id);

    let user_id = parse_user_id(&id)?;
    let user = state
        .user_service
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| user_not_found(user_id))?;

    ok(user.into())
}

/// Update the supplied fields of a user.
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserEnvelope),
        (status = 400, description = "Malformed user ID or body", body = roster_core::ErrorResponse),
        (status = 404, description = "No such user")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateUserRequest>,
) -> ApiResult<UserEnvelope> {
    debug!("Update user request: {}", id);

    let user_id = parse_user_id(&id)?;
    let user = state
        .user_service
        .find_by_id_and_update(user_id, request)
        .await?
        .ok_or_else(|| user_not_found(user_id))?;

    ok(user.into())
}

/// Delete a user, returning the removed record.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Deleted user", body = UserEnvelope),
        (status = 400, description = "Malformed user ID", body = roster_core::ErrorResponse),
        (status = 404, description = "No such user")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<UserEnvelope> {
    debug!("Delete user request: {}", id);

    let user_id = parse_user_id(&id)?;
    let user = state
        .user_service
        .find_by_id_and_delete(user_id)
        .await?
        .ok_or_else(|| user_not_found(user_id))?;

    ok(user.into())
}

/// Helper to parse user ID from path parameter.
fn parse_user_id(id: &str) -> Result<UserId, AppError> {
    UserId::parse(id).map_err(|_| AppError(RosterError::validation(format!("Invalid user ID: {id}"))))
}

fn user_not_found(id: UserId) -> AppError {
    AppError(RosterError::not_found("User", id))
}
