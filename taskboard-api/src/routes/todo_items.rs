/// Todo item endpoints
///
/// Access to an item is decided by its parent todo. Every mutation
/// recomputes the parent's `completion_pct`.
///
/// # Endpoints
///
/// - `POST /api/todos/items/:todo_id` - Add an item
/// - `GET /api/todos/items/:todo_id` - List a todo's items
/// - `PUT /api/todos/items/:todo_id/:item_id` - Partially update an item
/// - `DELETE /api/todos/items/:todo_id/:item_id` - Soft-delete an item

use crate::{
    app::AppState,
    error::ApiResult,
    routes::{ApiPath, ValidatedJson},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use taskboard_shared::{
    auth::context::AuthContext,
    models::{todo_item::TodoItem, Id},
    services::{NewTodoItem, TodoItemChanges, TodoItemService},
};
use validator::Validate;

/// Create request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateItemRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub completed: bool,
}

/// Update request; omitted fields keep their value
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateItemRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub completed: Option<bool>,
}

/// Adds an item to a todo
///
/// The item belongs to the todo's owner even when an admin adds it.
pub async fn create_item(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath(todo_id): ApiPath<Id>,
    ValidatedJson(req): ValidatedJson<CreateItemRequest>,
) -> ApiResult<(StatusCode, Json<TodoItem>)> {
    let item = TodoItemService::new(&state.store)
        .create(
            &auth,
            todo_id,
            NewTodoItem {
                title: req.title,
                description: req.description,
                completed: req.completed,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn list_items(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath(todo_id): ApiPath<Id>,
) -> ApiResult<Json<Vec<TodoItem>>> {
    let items = TodoItemService::new(&state.store)
        .list(&auth, todo_id)
        .await?;
    Ok(Json(items))
}

/// Updates an item
///
/// # Errors
///
/// - `403 Forbidden`: Parent todo owned by another user
/// - `404 Not Found`: No such todo, or the item is not under it
/// - `409 Conflict`: Item is deleted
pub async fn update_item(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath((todo_id, item_id)): ApiPath<(Id, Id)>,
    ValidatedJson(req): ValidatedJson<UpdateItemRequest>,
) -> ApiResult<Json<TodoItem>> {
    let item = TodoItemService::new(&state.store)
        .update(
            &auth,
            todo_id,
            item_id,
            TodoItemChanges {
                title: req.title,
                description: req.description,
                completed: req.completed,
            },
        )
        .await?;

    Ok(Json(item))
}

pub async fn delete_item(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath((todo_id, item_id)): ApiPath<(Id, Id)>,
) -> ApiResult<StatusCode> {
    TodoItemService::new(&state.store)
        .delete(&auth, todo_id, item_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
