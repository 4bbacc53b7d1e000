//! OpenAPI documentation configuration.

use crate::controllers::{HealthResponse, ReadinessResponse};
use roster_core::{ErrorResponse, FieldError};
use roster_service::{
    CreateUserRequest, UpdateUserRequest, UserEnvelope, UserListResponse, UserResponse,
};
use utoipa::OpenApi;

/// OpenAPI documentation for the Roster API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roster API",
        version = "1.0.0",
        description = "CRUD API for user records"
    ),
    paths(
        // User endpoints
        crate::controllers::user_controller::list_users,
        crate::controllers::user_controller::create_user,
        crate::controllers::user_controller::get_user,
        crate::controllers::user_controller::update_user,
        crate::controllers::user_controller::delete_user,
        // Health endpoints
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            ErrorResponse,
            FieldError,
            CreateUserRequest,
            UpdateUserRequest,
            UserResponse,
            UserEnvelope,
            UserListResponse,
            HealthResponse,
            ReadinessResponse,
        )
    ),
    tags(
        (name = "users", description = "User management endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Builds the document with the users paths moved under `api_prefix`.
    ///
    /// Health paths stay at the root, where the router serves them.
    pub fn with_prefix(api_prefix: &str) -> utoipa::openapi::OpenApi {
        let mut doc = Self::openapi();
        let prefix = api_prefix.trim_end_matches('/');
        if prefix.is_empty() {
            return doc;
        }

        let paths = std::mem::take(&mut doc.paths.paths);
        doc.paths.paths = paths
            .into_iter()
            .map(|(path, item)| {
                if path.starts_with("/users") {
                    (format!("{prefix}{path}"), item)
                } else {
                    (path, item)
                }
            })
            .collect();
        doc
    }
}
