//! JSON body extractor with the API's error shape.
//!
//! Axum's stock `Json` extractor answers malformed bodies with plain-text
//! 400/415/422 responses. `ApiJson<T>` reports every syntax error, type
//! mismatch, or missing content type as a 400 with the standard
//! `{"error", "code"}` body instead. Oversized bodies keep their 413.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    response::{IntoResponse, Response},
    Json,
};
use roster_core::RosterError;
use serde::de::DeserializeOwned;

/// JSON extractor that maps rejections onto [`AppError`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

/// Converts a JSON rejection into the API error response.
fn rejection_response(rejection: JsonRejection) -> Response {
    match rejection {
        JsonRejection::BytesRejection(inner) => inner.into_response(),
        other => AppError(RosterError::validation(other.body_text())).into_response(),
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_response)?;

        Ok(ApiJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, routing::post, Router};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use serde_json::Value;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize)]
    struct Payload {
        name: String,
    }

    async fn echo(ApiJson(payload): ApiJson<Payload>) -> String {
        payload.name
    }

    async fn send(content_type: Option<&str>, body: &'static str) -> (StatusCode, Vec<u8>) {
        let app = Router::new().route("/", post(echo));

        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        let response = app
            .oneshot(builder.body(Body::from(body)).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_valid_body() {
        let (status, body) = send(Some("application/json"), r#"{"name":"Ada"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"Ada");
    }

    #[tokio::test]
    async fn test_syntax_error_is_400_with_error_body() {
        let (status, body) = send(Some("application/json"), r#"{"name":"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_type_mismatch_is_400() {
        let (status, _) = send(Some("application/json"), r#"{"name":5}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_400() {
        let (status, _) = send(None, r#"{"name":"Ada"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
