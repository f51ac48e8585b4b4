/// Login endpoint
///
/// # Endpoints
///
/// - `POST /login` - Exchange a username and password for an access token

use crate::{app::AppState, error::ApiResult, routes::ValidatedJson};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::jwt,
    models::{user::User, Id, Role},
    services::UserService,
};
use validator::Validate;

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    /// Password
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Public part of the authenticated user
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginUser {
    pub id: Id,
    pub username: String,
    pub role: Role,
}

impl From<User> for LoginUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
        }
    }
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Access token
    pub token: String,

    /// Who the token was issued for
    pub user: LoginUser,
}

/// Login endpoint
///
/// # Endpoint
///
/// ```text
/// POST /login
/// Content-Type: application/json
///
/// {
///   "username": "user",
///   "password": "user123"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "token": "eyJ...",
///   "user": { "id": 2, "username": "user", "role": "user" }
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Malformed body
/// - `401 Unauthorized`: Invalid credentials
/// - `422 Unprocessable Entity`: Empty username or password
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user = UserService::new(&state.store)
        .authenticate(&req.username, &req.password)
        .await?;

    let claims = jwt::Claims::with_expiration(user.id, user.role, state.token_lifetime());
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    tracing::info!(user_id = user.id, "user logged in");

    Ok(Json(LoginResponse {
        token,
        user: user.into(),
    }))
}
