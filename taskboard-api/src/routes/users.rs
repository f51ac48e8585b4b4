/// User account endpoints
///
/// # Endpoints
///
/// - `POST /api/users` - Register (public; admins may create admins)
/// - `GET /api/users` - List users (admin)
/// - `GET /api/users/:id` - Get a user (self or admin)
/// - `GET /api/users/username/:username` - Get a user by name (self or admin)
/// - `PUT /api/users/:id` - Update a user (self or admin; role changes admin only)
/// - `DELETE /api/users/:id` - Delete a user (admin)
///
/// Password hashes never leave the server: `User` skips the field when
/// serializing.

use crate::{
    app::AppState,
    error::ApiResult,
    routes::{ApiPath, ValidatedJson},
};
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;
use taskboard_shared::{
    auth::{context::AuthContext, middleware::authenticate_bearer},
    models::{
        user::{CreateUser, UpdateUser, User},
        Id, Role,
    },
    services::UserService,
};
use validator::{Validate, ValidationError};

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 64, message = "Username must be 1-64 characters"))]
    pub username: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Defaults to `user`
    pub role: Option<Role>,
}

/// Update request
///
/// An omitted or empty password keeps the current one; an omitted role keeps
/// the current role.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 64, message = "Username must be 1-64 characters"))]
    pub username: String,

    #[serde(default)]
    #[validate(custom(function = "validate_new_password"))]
    pub password: String,

    pub role: Option<Role>,
}

fn validate_new_password(password: &str) -> Result<(), ValidationError> {
    if !password.is_empty() && password.len() < 8 {
        let mut err = ValidationError::new("length");
        err.message = Some("Password must be at least 8 characters".into());
        return Err(err);
    }
    Ok(())
}

/// Registers a new account
///
/// A valid bearer token is optional. Without one, only `user` accounts can
/// be created.
///
/// # Errors
///
/// - `401 Unauthorized`: A token was sent but is invalid
/// - `403 Forbidden`: Requested `admin` without an admin token
/// - `409 Conflict`: Username already exists
/// - `422 Unprocessable Entity`: Validation failed
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let data = CreateUser {
        username: req.username,
        password: req.password,
        role: req.role.unwrap_or(Role::User),
    };

    let users = UserService::new(&state.store);
    let user = match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) => {
            let auth = authenticate_bearer(value, state.jwt_secret())?;
            users.register_as(&auth, data).await?
        }
        None => users.register(data).await?,
    };

    Ok((StatusCode::CREATED, Json(user)))
}

/// Lists all users (admin)
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthContext,
) -> ApiResult<Json<Vec<User>>> {
    let users = UserService::new(&state.store).list(&auth).await?;
    Ok(Json(users))
}

pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath(id): ApiPath<Id>,
) -> ApiResult<Json<User>> {
    let user = UserService::new(&state.store).get(&auth, id).await?;
    Ok(Json(user))
}

pub async fn get_user_by_username(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath(username): ApiPath<String>,
) -> ApiResult<Json<User>> {
    let user = UserService::new(&state.store)
        .get_by_username(&auth, &username)
        .await?;
    Ok(Json(user))
}

/// Updates an account
///
/// # Errors
///
/// - `403 Forbidden`: Not self and not admin, or a non-admin changing a role
/// - `404 Not Found`: No such user
/// - `409 Conflict`: Username already exists
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath(id): ApiPath<Id>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<User>> {
    let data = UpdateUser {
        username: req.username,
        password: req.password,
        role: req.role,
    };
    let user = UserService::new(&state.store)
        .update(&auth, id, data)
        .await?;

    Ok(Json(user))
}

/// Deletes an account (admin); the user's todos are left in place
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath(id): ApiPath<Id>,
) -> ApiResult<StatusCode> {
    UserService::new(&state.store).delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
