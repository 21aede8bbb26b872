//! User management controller.

use crate::{
    extractors::AuthenticatedUser,
    responses::{created, ok, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use rolodex_core::{ErrorResponse, RolodexError, UserId};
use rolodex_service::dto::{
    BatchCreateResponse, CreateUserRequest, CreatedUserResponse, MessageResponse,
    UpdatedUserResponse, UserResponse,
};
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/batch", post(create_users_batch))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/user", get(current_user))
}

/// List all users.
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "All users, newest first", body = [UserResponse])
    )
)]
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<UserResponse>> {
    debug!("List users request");

    let response = state.user_service.list_users().await?;
    ok(response)
}

/// Create a new user.
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = CreatedUserResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreatedUserResponse>), AppError> {
    debug!("Create user request");

    let response = state.user_service.create_user(request).await?;
    Ok(created(CreatedUserResponse::new(response)))
}

/// Create a batch of users.
///
/// Every record must pass validation before anything is written; the
/// first invalid record rejects the whole batch.
#[utoipa::path(
    post,
    path = "/users/batch",
    tag = "users",
    request_body = [CreateUserRequest],
    responses(
        (status = 201, description = "All users created", body = BatchCreateResponse),
        (status = 422, description = "A record failed validation", body = ErrorResponse)
    )
)]
pub async fn create_users_batch(
    State(state): State<AppState>,
    Json(requests): Json<Vec<CreateUserRequest>>,
) -> Result<(StatusCode, Json<BatchCreateResponse>), AppError> {
    debug!("Batch create request with {} records", requests.len());

    let count = state.user_service.create_users_batch(requests).await?;
    Ok(created(BatchCreateResponse::new(count)))
}

/// Get a user by ID.
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<UserResponse> {
    debug!("Get user request: {}", id);

    let user_id = parse_user_id(&id)?;
    let response = state.user_service.get_user(user_id).await?;
    ok(response)
}

/// Replace a user's record.
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UpdatedUserResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CreateUserRequest>,
) -> ApiResult<UpdatedUserResponse> {
    debug!("Update user request: {}", id);

    let user_id = parse_user_id(&id)?;
    let response = state.user_service.update_user(user_id, request).await?;
    ok(UpdatedUserResponse::new(response))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<MessageResponse> {
    debug!("Delete user request: {}", id);

    let user_id = parse_user_id(&id)?;
    state.user_service.delete_user(user_id).await?;
    ok(MessageResponse::new("User deleted successfully"))
}

/// Get the authenticated user's own record.
#[utoipa::path(
    get,
    path = "/user",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The authenticated user", body = UserResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
pub async fn current_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<UserResponse> {
    debug!("Current user request: {}", user.sub);

    let user_id = user
        .user_id()
        .ok_or_else(|| AppError(RolodexError::unauthorized("Malformed token subject")))?;

    let response = state.user_service.get_user(user_id).await?;
    ok(response)
}

/// Helper to parse a user ID from a path parameter.
///
/// An unparseable ID cannot match any user, so it is a 404 rather than a
/// validation error.
fn parse_user_id(id: &str) -> Result<UserId, AppError> {
    UserId::parse(id).map_err(|_| AppError(RolodexError::not_found(id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::create_router;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, HeaderValue, Request, StatusCode};
    use http_body_util::BodyExt;
    use rolodex_config::{SecurityConfig, ServerConfig};
    use rolodex_core::{RolodexResult, User};
    use rolodex_security::TokenProvider;
    use rolodex_service::UserService;
    use serde_json::{json, Value};
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    /// In-memory mock service mirroring the service-layer contract.
    struct MockUserService {
        users: Mutex<Vec<User>>,
    }

    impl MockUserService {
        fn new() -> Self {
            Self {
                users: Mutex::new(Vec::new()),
            }
        }

        fn with_users(users: Vec<User>) -> Self {
            Self {
                users: Mutex::new(users),
            }
        }
    }

    #[async_trait]
    impl UserService for MockUserService {
        async fn create_user(&self, request: CreateUserRequest) -> RolodexResult<UserResponse> {
            let record = request.validate().map_err(RolodexError::validation)?;
            let mut users = self.users.lock().unwrap();
            if users.iter().any(|u| u.email == record.email) {
                return Err(RolodexError::DuplicateEmail(record.email.to_string()));
            }
            let user = User::new(record, None);
            users.push(user.clone());
            Ok(user.into())
        }

        async fn create_users_batch(
            &self,
            requests: Vec<CreateUserRequest>,
        ) -> RolodexResult<usize> {
            let mut records = Vec::new();
            let mut seen = HashSet::new();
            for (index, request) in requests.iter().enumerate() {
                let record = request
                    .validate()
                    .map_err(|errors| RolodexError::invalid_record(index, errors))?;
                if !seen.insert(record.email.clone()) {
                    return Err(RolodexError::invalid_record(
                        index,
                        vec![rolodex_core::validation::rules::email_taken()],
                    ));
                }
                records.push(record);
            }
            let mut users = self.users.lock().unwrap();
            let count = records.len();
            for record in records {
                users.push(User::new(record, None));
            }
            Ok(count)
        }

        async fn list_users(&self) -> RolodexResult<Vec<UserResponse>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .map(UserResponse::from)
                .collect())
        }

        async fn get_user(&self, id: UserId) -> RolodexResult<UserResponse> {
            self.users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.id == id)
                .map(UserResponse::from)
                .ok_or_else(|| RolodexError::not_found(id))
        }

        async fn update_user(
            &self,
            id: UserId,
            request: CreateUserRequest,
        ) -> RolodexResult<UserResponse> {
            let record = request.validate().map_err(|errors| {
                RolodexError::InvalidRecord {
                    index: None,
                    errors,
                }
            })?;
            let mut users = self.users.lock().unwrap();
            let user = users
                .iter_mut()
                .find(|u| u.id == id)
                .ok_or_else(|| RolodexError::not_found(id))?;
            user.apply_update(record, None);
            Ok(UserResponse::from(&*user))
        }

        async fn delete_user(&self, id: UserId) -> RolodexResult<()> {
            let mut users = self.users.lock().unwrap();
            let before = users.len();
            users.retain(|u| u.id != id);
            if users.len() == before {
                return Err(RolodexError::not_found(id));
            }
            Ok(())
        }
    }

    fn security_config() -> Arc<SecurityConfig> {
        Arc::new(SecurityConfig {
            jwt_secret: "test-secret-key-for-testing-only".to_string(),
            jwt_access_expiration_secs: 3600,
            jwt_issuer: "rolodex".to_string(),
            jwt_audience: "rolodex-api".to_string(),
        })
    }

    fn app_with(service: MockUserService) -> axum::Router {
        let state = AppState::new(Arc::new(service));
        let token_provider = Arc::new(TokenProvider::new(security_config()));
        create_router(state, token_provider, &ServerConfig::default())
    }

    fn valid_body(email: &str) -> Value {
        json!({
            "email": email,
            "last_name": "Doe",
            "first_name": "Jane",
            "phone": "+33612345678",
            "verified": true
        })
    }

    fn stored_user(email: &str) -> User {
        let request: CreateUserRequest = serde_json::from_value(valid_body(email)).unwrap();
        User::new(request.validate().unwrap(), None)
    }

    async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_user_returns_201() {
        let app = app_with(MockUserService::new());

        let (status, body) = send(app, post_json("/api/users", &valid_body("jane@example.com"))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "User created successfully");
        assert_eq!(body["user"]["email"], "jane@example.com");
        assert_eq!(body["user"]["name"], "Jane Doe");
        assert!(body["user"].get("password").is_none());
        assert!(body["user"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_create_user_validation_returns_400() {
        let app = app_with(MockUserService::new());

        let (status, body) = send(app, post_json("/api/users", &json!({"email": "nope"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert!(body["errors"].as_array().unwrap().len() >= 4);
        assert!(body.get("record").is_none());
    }

    #[tokio::test]
    async fn test_create_user_duplicate_returns_409() {
        let app = app_with(MockUserService::with_users(vec![stored_user(
            "jane@example.com",
        )]));

        let (status, body) = send(app, post_json("/api/users", &valid_body("jane@example.com"))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "DUPLICATE_EMAIL");
    }

    #[tokio::test]
    async fn test_batch_create_returns_201_with_count() {
        let app = app_with(MockUserService::new());

        let batch = json!([valid_body("a@example.com"), valid_body("b@example.com")]);
        let (status, body) = send(app, post_json("/api/users/batch", &batch)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["created"], 2);
        assert_eq!(body["message"], "Users created successfully");
    }

    #[tokio::test]
    async fn test_batch_create_invalid_record_returns_422_with_index() {
        let app = app_with(MockUserService::new());

        let batch = json!([valid_body("a@example.com"), {"email": "broken"}]);
        let (status, body) = send(app, post_json("/api/users/batch", &batch)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "INVALID_RECORD");
        assert_eq!(body["record"], 1);
        assert!(body["errors"].is_array());
    }

    #[tokio::test]
    async fn test_list_users_returns_200() {
        let app = app_with(MockUserService::with_users(vec![
            stored_user("a@example.com"),
            stored_user("b@example.com"),
        ]));

        let request = Request::builder()
            .uri("/api/users")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_get_user_returns_200() {
        let user = stored_user("jane@example.com");
        let id = user.id;
        let app = app_with(MockUserService::with_users(vec![user]));

        let request = Request::builder()
            .uri(format!("/api/users/{}", id))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "jane@example.com");
    }

    #[tokio::test]
    async fn test_get_unknown_user_returns_404() {
        let app = app_with(MockUserService::new());

        let request = Request::builder()
            .uri(format!("/api/users/{}", UserId::new()))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_get_user_malformed_id_returns_404() {
        let app = app_with(MockUserService::new());

        let request = Request::builder()
            .uri("/api/users/not-a-uuid")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(app, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_user_returns_200() {
        let user = stored_user("jane@example.com");
        let id = user.id;
        let app = app_with(MockUserService::with_users(vec![user]));

        let mut body = valid_body("jane@example.com");
        body["first_name"] = json!("Janet");
        let request = Request::builder()
            .method("PUT")
            .uri(format!("/api/users/{}", id))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "User updated successfully");
        assert_eq!(body["user"]["name"], "Janet Doe");
    }

    #[tokio::test]
    async fn test_update_user_invalid_body_returns_422_without_index() {
        let user = stored_user("jane@example.com");
        let id = user.id;
        let app = app_with(MockUserService::with_users(vec![user]));

        let request = Request::builder()
            .method("PUT")
            .uri(format!("/api/users/{}", id))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"email": "broken"}).to_string()))
            .unwrap();
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "INVALID_RECORD");
        assert!(body.get("record").is_none());
    }

    #[tokio::test]
    async fn test_delete_user_returns_message() {
        let user = stored_user("jane@example.com");
        let id = user.id;
        let app = app_with(MockUserService::with_users(vec![user]));

        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/api/users/{}", id))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "User deleted successfully");
    }

    #[tokio::test]
    async fn test_current_user_without_token_returns_401() {
        let app = app_with(MockUserService::new());

        let request = Request::builder()
            .uri("/api/user")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_current_user_with_token_returns_200() {
        let user = stored_user("jane@example.com");
        let id = user.id;
        let app = app_with(MockUserService::with_users(vec![user]));

        let provider = TokenProvider::new(security_config());
        let token = provider.generate_access_token(id, "jane@example.com").unwrap();

        let request = Request::builder()
            .uri("/api/user")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "jane@example.com");
    }

    #[tokio::test]
    async fn test_current_user_with_garbage_token_returns_401() {
        let app = app_with(MockUserService::new());

        let request = Request::builder()
            .uri("/api/user")
            .header(header::AUTHORIZATION, "Bearer not-a-jwt")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(app, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_cors_honors_configured_origins() {
        let state = AppState::new(Arc::new(MockUserService::new()));
        let token_provider = Arc::new(TokenProvider::new(security_config()));
        let server_config = ServerConfig {
            cors_origins: vec!["https://app.example.com".to_string()],
            ..ServerConfig::default()
        };
        let app = create_router(state, token_provider, &server_config);

        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "https://app.example.com")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("https://app.example.com"))
        );

        // Origins outside the configured list get no CORS grant.
        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "https://elsewhere.example.com")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = app_with(MockUserService::new());

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }
}
