/// In-memory repositories
///
/// Each repository owns one reader/writer lock guarding its whole keyed
/// collection and its id counter. Reads take the shared mode; create, update,
/// delete and recompute take the exclusive mode. Validation and mutation
/// happen inside the same critical section, so a failed call leaves the
/// collection untouched.
///
/// There is no cross-repository transaction. The todo repository reads the
/// item repository only through [`LiveItems`] while recomputing completion,
/// and the item repository never calls back, so lock order is always
/// todo then item.
///
/// # Example
///
/// ```
/// use taskboard_shared::store::Store;
/// use taskboard_shared::auth::password::Argon2Hasher;
/// use taskboard_shared::models::todo::CreateTodo;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Store::new(Argon2Hasher::with_params(8, 1, 1));
///
/// let todo = store.todos.create(CreateTodo {
///     title: "Groceries".to_string(),
///     description: String::new(),
///     user_id: 1,
/// }).await;
///
/// let todo = store.todos.recompute_completion(todo.id, store.items.as_ref()).await?;
/// assert_eq!(todo.completion_pct, 0.0);
/// # Ok(())
/// # }
/// ```

mod todo_item_repo;
mod todo_repo;
mod user_repo;

use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::password::CredentialHasher;
use crate::models::{todo_item::TodoItem, Id};

pub use todo_item_repo::TodoItemRepository;
pub use todo_repo::TodoRepository;
pub use user_repo::UserRepository;

/// Read-only view of the live items of a todo
///
/// This is the only capability the todo repository needs from the item
/// repository.
#[async_trait]
pub trait LiveItems: Send + Sync {
    /// Returns the non-deleted items whose parent is `todo_id`
    async fn live_items_of(&self, todo_id: Id) -> Vec<TodoItem>;
}

/// The three repositories, shared behind `Arc`s
#[derive(Clone)]
pub struct Store {
    pub users: Arc<UserRepository>,
    pub todos: Arc<TodoRepository>,
    pub items: Arc<TodoItemRepository>,
}

impl Store {
    /// Creates an empty store using `hasher` for user credentials
    pub fn new(hasher: impl CredentialHasher + 'static) -> Self {
        Self {
            users: Arc::new(UserRepository::new(Arc::new(hasher))),
            todos: Arc::new(TodoRepository::new()),
            items: Arc::new(TodoItemRepository::new()),
        }
    }
}

/// Percentage of completed items, or 0 when there are none
pub(crate) fn completion_percentage(items: &[TodoItem]) -> f64 {
    if items.is_empty() {
        return 0.0;
    }

    let completed = items.iter().filter(|item| item.completed).count();
    completed as f64 / items.len() as f64 * 100.0
}
