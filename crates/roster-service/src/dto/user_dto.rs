//! User-related DTOs.

use roster_core::{User, UserId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to create a new user.
///
/// Missing `name` or `email` deserialize as empty strings so they are
/// reported by field validation rather than as a parse failure. Both are
/// capped at 255 characters, the width of the `users` columns.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "name is required and must be at most 255 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "email is required and must be at most 255 characters"))]
    pub email: String,

    #[validate(length(min = 1, message = "password cannot be empty"))]
    pub password: Option<String>,
}

/// Request to update a user. Only supplied fields change.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 255, message = "name must be 1 to 255 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 255, message = "email must be 1 to 255 characters"))]
    pub email: Option<String>,

    #[validate(length(min = 1, message = "password cannot be empty"))]
    pub password: Option<String>,
}

/// User response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(value_type = String, format = Uuid)]
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Envelope for a single user: `{"user": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserEnvelope {
    pub user: UserResponse,
}

impl From<UserResponse> for UserEnvelope {
    fn from(user: UserResponse) -> Self {
        Self { user }
    }
}

/// Envelope for the user list: `{"users": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
}

impl From<Vec<UserResponse>> for UserListResponse {
    fn from(users: Vec<UserResponse>) -> Self {
        Self { users }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::NewUser;
    use serde_json::json;

    fn create_request(name: &str, email: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: None,
        }
    }

    #[test]
    fn test_create_user_request_valid() {
        assert!(create_request("Ada", "ada@example.com").validate().is_ok());
    }

    #[test]
    fn test_create_user_request_missing_fields() {
        let request: CreateUserRequest = serde_json::from_value(json!({})).unwrap();
        let errors = request.validate().unwrap_err();

        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn test_create_user_request_empty_password() {
        let request = CreateUserRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: Some(String::new()),
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_user_request_ignores_unknown_fields_and_id() {
        let request: CreateUserRequest = serde_json::from_value(json!({
            "id": "0190a1b2-c3d4-7e5f-8a9b-0c1d2e3f4a5b",
            "name": "Ada",
            "email": "ada@example.com",
            "role": "admin"
        }))
        .unwrap();

        assert_eq!(request.name, "Ada");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_user_request_rejects_wrong_type() {
        let result = serde_json::from_value::<CreateUserRequest>(json!({
            "name": 5,
            "email": "ada@example.com"
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_update_user_request_partial() {
        let request: UpdateUserRequest = serde_json::from_value(json!({"name": "X"})).unwrap();

        assert_eq!(request.name.as_deref(), Some("X"));
        assert!(request.email.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_user_request_rejects_overlong_fields() {
        let request = create_request(&"n".repeat(256), &format!("{}@example.com", "e".repeat(250)));
        let errors = request.validate().unwrap_err();

        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn test_create_user_request_accepts_column_width() {
        let request = create_request(&"n".repeat(255), "ada@example.com");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_user_request_rejects_overlong_name() {
        let request = UpdateUserRequest {
            name: Some("n".repeat(300)),
            ..Default::default()
        };

        assert!(request.validate().unwrap_err().field_errors().contains_key("name"));
    }

    #[test]
    fn test_update_user_request_empty_value_invalid() {
        let request = UpdateUserRequest {
            email: Some(String::new()),
            ..Default::default()
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_empty_update_request_is_valid() {
        let request: UpdateUserRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.name.is_none() && request.email.is_none() && request.password.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_user_response_from_user_hides_password() {
        let user = User::from_new(
            UserId::new(),
            NewUser::new("Ada", "ada@example.com").with_password_hash("$argon2id$secret"),
        );
        let id = user.id;

        let response = UserResponse::from(user);
        let json = serde_json::to_value(UserEnvelope::from(response)).unwrap();

        assert_eq!(
            json,
            json!({"user": {"id": id.to_string(), "name": "Ada", "email": "ada@example.com"}})
        );
    }

    #[test]
    fn test_user_list_response_shape() {
        let json = serde_json::to_value(UserListResponse::from(Vec::new())).unwrap();
        assert_eq!(json, json!({"users": []}));
    }
}
