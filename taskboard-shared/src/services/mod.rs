/// Authorized access to the store
///
/// Services are what request handlers call. Each operation takes the
/// resolved caller first and applies the same rule:
///
/// 1. Admins read through the including-deleted accessors, everyone else
///    through the live ones. A miss is `NotFound`.
/// 2. The record's owner is compared to the caller (admins bypass). A
///    mismatch on an existing record is `Forbidden`.
/// 3. Item membership changes recompute the parent todo's completion.
///
/// Services borrow a [`Store`](crate::store::Store) and are cheap to build
/// per request.

mod todo_item_service;
mod todo_service;
mod user_service;

pub use todo_item_service::{NewTodoItem, TodoItemChanges, TodoItemService};
pub use todo_service::{NewTodo, TodoChanges, TodoService};
pub use user_service::UserService;
