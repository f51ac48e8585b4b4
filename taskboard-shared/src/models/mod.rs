/// Data models for Taskboard
///
/// Plain records held by the repositories in [`crate::store`]. Records are
/// cloned out of the store; no reference into a locked collection escapes.
///
/// # Models
///
/// - `user`: Accounts with a role and an opaque password hash (hard-deleted)
/// - `todo`: Todo lists owned by a user, with a derived completion percentage
/// - `todo_item`: Items belonging to a todo (soft-deleted like todos)
///
/// # Example
///
/// ```
/// use taskboard_shared::models::{Role, todo::CreateTodo};
///
/// let new_todo = CreateTodo {
///     title: "Groceries".to_string(),
///     description: "Weekly shopping".to_string(),
///     user_id: 1,
/// };
/// assert_eq!(Role::Admin.as_str(), "admin");
/// # let _ = new_todo;
/// ```

pub mod todo;
pub mod todo_item;
pub mod user;

pub use user::Role;

/// Identifier type shared by every repository
///
/// Allocated sequentially from 1 and never reused.
pub type Id = u64;
