/// Todo model
///
/// A todo belongs to one user and owns any number of items. Its
/// `completion_pct` is derived: the share of live items marked completed,
/// recomputed by [`crate::store::TodoRepository::recompute_completion`].
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Id;

/// Todo list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    /// Sequential todo id
    pub id: Id,

    pub title: String,

    pub description: String,

    /// Owning user
    pub user_id: Id,

    /// Percentage of live items completed, in [0, 100]
    pub completion_pct: f64,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    /// Soft-delete marker; `None` while the todo is live
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Todo {
    /// True while the todo has not been soft-deleted
    pub fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// Input for creating a todo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub title: String,
    pub description: String,
    pub user_id: Id,
}
