/// Todo endpoints
///
/// All routes require a JWT. Non-admins see and modify only their own live
/// todos; admins see every todo, deleted ones included.
///
/// # Endpoints
///
/// - `POST /api/todos` - Create a todo owned by the caller
/// - `GET /api/todos` - List visible todos
/// - `GET /api/todos/:id` - Get a todo
/// - `PUT /api/todos/:id` - Replace title and description
/// - `DELETE /api/todos/:id` - Soft-delete a todo

use crate::{
    app::AppState,
    error::ApiResult,
    routes::{ApiPath, ValidatedJson},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use taskboard_shared::{
    auth::context::AuthContext,
    models::{todo::Todo, Id},
    services::{NewTodo, TodoChanges, TodoService},
};
use validator::Validate;

/// Create/update request
///
/// `completion_pct` and the owner are not accepted from callers.
#[derive(Debug, Deserialize, Validate)]
pub struct TodoRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[serde(default)]
    pub description: String,
}

/// Creates a todo
///
/// # Response
///
/// `201 Created` with the todo; `completion_pct` starts at 0.
pub async fn create_todo(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedJson(req): ValidatedJson<TodoRequest>,
) -> ApiResult<(StatusCode, Json<Todo>)> {
    let todo = TodoService::new(&state.store)
        .create(
            &auth,
            NewTodo {
                title: req.title,
                description: req.description,
            },
        )
        .await;

    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn list_todos(State(state): State<AppState>, auth: AuthContext) -> Json<Vec<Todo>> {
    Json(TodoService::new(&state.store).list(&auth).await)
}

/// Gets a todo
///
/// # Errors
///
/// - `403 Forbidden`: Owned by another user
/// - `404 Not Found`: No such todo (or deleted, for non-admins)
pub async fn get_todo(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath(id): ApiPath<Id>,
) -> ApiResult<Json<Todo>> {
    let todo = TodoService::new(&state.store).get(&auth, id).await?;
    Ok(Json(todo))
}

/// Replaces title and description
///
/// # Errors
///
/// - `403 Forbidden`, `404 Not Found`: as for `GET`
/// - `409 Conflict`: Todo is deleted (admins only get this far)
pub async fn update_todo(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath(id): ApiPath<Id>,
    ValidatedJson(req): ValidatedJson<TodoRequest>,
) -> ApiResult<Json<Todo>> {
    let todo = TodoService::new(&state.store)
        .update(
            &auth,
            id,
            TodoChanges {
                title: req.title,
                description: req.description,
            },
        )
        .await?;

    Ok(Json(todo))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath(id): ApiPath<Id>,
) -> ApiResult<StatusCode> {
    TodoService::new(&state.store).delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
