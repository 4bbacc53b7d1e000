//! Main application router.

use crate::{
    controllers::{health_controller, user_controller},
    middleware::logging_middleware,
    openapi::ApiDoc,
    state::AppState,
};
use axum::{extract::DefaultBodyLimit, http::HeaderValue, middleware, Router};
use roster_config::ServerConfig;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use utoipa_swagger_ui::SwaggerUi;

/// Creates the main application router.
///
/// Users routes are nested under `{api_prefix}/users`; health checks and the
/// Swagger UI stay at the root.
pub fn create_router(state: AppState, server_config: &ServerConfig) -> Router {
    let users_path = users_mount_path(&server_config.api_prefix);

    let api_router = Router::new()
        .nest(&users_path, user_controller::router())
        .merge(health_controller::router())
        .with_state(state);

    let router = Router::new()
        .merge(api_router)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", ApiDoc::with_prefix(&server_config.api_prefix)),
        )
        .layer(DefaultBodyLimit::max(server_config.max_body_size))
        .layer(CompressionLayer::new())
        .layer(create_cors_layer(server_config))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware));

    info!(
        users = %users_path,
        "Router created with REST endpoints and Swagger UI at /swagger-ui"
    );
    router
}

/// Joins the configured prefix and `/users`, tolerating a trailing slash.
fn users_mount_path(api_prefix: &str) -> String {
    format!("{}/users", api_prefix.trim_end_matches('/'))
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }

    if server_config.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = server_config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}
