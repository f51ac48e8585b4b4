/// Health check endpoint
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "users": 2,
///   "todos": 2,
///   "items": 2
/// }
/// ```

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Application version
    pub version: String,

    /// Number of users
    pub users: usize,

    /// Number of live todos
    pub todos: usize,

    /// Number of live items
    pub items: usize,
}

/// Health check handler
///
/// Counts only live records; the store never purges soft-deleted ones.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = &state.store;

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        users: store.users.count().await,
        todos: store.todos.get_all().await.len(),
        items: store.items.get_all().await.len(),
    })
}
