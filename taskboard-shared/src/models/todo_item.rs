/// Todo item model
///
/// Items hang off a todo by `todo_id`. `user_id` is a denormalized copy of
/// the parent todo's owner, set by whoever creates the item.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Id;

/// Single entry of a todo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Sequential item id
    pub id: Id,

    pub title: String,

    pub description: String,

    pub completed: bool,

    /// Parent todo
    pub todo_id: Id,

    /// Owner of the parent todo at creation time
    pub user_id: Id,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    /// Soft-delete marker; `None` while the item is live
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl TodoItem {
    /// True while the item has not been soft-deleted
    pub fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// Input for creating an item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodoItem {
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub todo_id: Id,
    pub user_id: Id,
}
