use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;

use super::{completion_percentage, LiveItems};
use crate::error::{StoreError, StoreResult};
use crate::models::todo::{CreateTodo, Todo};
use crate::models::Id;

const ENTITY: &str = "todo";

#[derive(Debug)]
struct TodoTable {
    rows: HashMap<Id, Todo>,
    next_id: Id,
}

/// Lock-guarded collection of todos
///
/// Soft-deleted todos stay in the collection forever and are only visible
/// through the `*_including_deleted` accessors.
#[derive(Debug)]
pub struct TodoRepository {
    table: RwLock<TodoTable>,
}

impl Default for TodoRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(TodoTable {
                rows: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Inserts a todo with the next id and `completion_pct = 0`
    pub async fn create(&self, data: CreateTodo) -> Todo {
        let mut table = self.table.write().await;

        let id = table.next_id;
        table.next_id += 1;

        let now = Utc::now();
        let todo = Todo {
            id,
            title: data.title,
            description: data.description,
            user_id: data.user_id,
            completion_pct: 0.0,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        table.rows.insert(id, todo.clone());

        tracing::debug!(todo_id = id, user_id = todo.user_id, "todo created");
        todo
    }

    /// Fetches a live todo
    pub async fn get_by_id(&self, id: Id) -> StoreResult<Todo> {
        let table = self.table.read().await;
        table
            .rows
            .get(&id)
            .filter(|todo| todo.is_live())
            .cloned()
            .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }

    /// Fetches a todo whether or not it was soft-deleted
    pub async fn get_by_id_including_deleted(&self, id: Id) -> StoreResult<Todo> {
        let table = self.table.read().await;
        table
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }

    /// All live todos across every owner
    pub async fn get_all(&self) -> Vec<Todo> {
        self.select(|todo| todo.is_live()).await
    }

    /// Every todo, soft-deleted ones included
    pub async fn get_all_including_deleted(&self) -> Vec<Todo> {
        self.select(|_| true).await
    }

    /// Live todos of one owner
    pub async fn get_by_owner(&self, owner_id: Id) -> Vec<Todo> {
        self.select(|todo| todo.user_id == owner_id && todo.is_live()).await
    }

    /// All todos of one owner, soft-deleted ones included
    pub async fn get_by_owner_including_deleted(&self, owner_id: Id) -> Vec<Todo> {
        self.select(|todo| todo.user_id == owner_id).await
    }

    /// Replaces a live todo with `todo` and refreshes `updated_at`
    ///
    /// `completion_pct`, `created_at` and `deleted_at` are owned by the
    /// repository and keep their stored values.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the id was never allocated
    /// - `InvalidState` if the todo is soft-deleted
    pub async fn update(&self, mut todo: Todo) -> StoreResult<Todo> {
        let mut table = self.table.write().await;

        let existing = table
            .rows
            .get_mut(&todo.id)
            .ok_or_else(|| StoreError::not_found(ENTITY, todo.id))?;
        if !existing.is_live() {
            return Err(StoreError::InvalidState(format!(
                "todo {} is deleted",
                todo.id
            )));
        }

        todo.completion_pct = existing.completion_pct;
        todo.created_at = existing.created_at;
        todo.deleted_at = None;
        todo.updated_at = Utc::now();
        *existing = todo.clone();

        tracing::debug!(todo_id = todo.id, "todo updated");
        Ok(todo)
    }

    /// Soft-deletes a live todo
    ///
    /// # Errors
    ///
    /// - `NotFound` if the id was never allocated
    /// - `InvalidState` if the todo was already deleted
    pub async fn delete(&self, id: Id) -> StoreResult<()> {
        let mut table = self.table.write().await;

        let todo = table
            .rows
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(ENTITY, id))?;
        if !todo.is_live() {
            return Err(StoreError::InvalidState(format!(
                "todo {} is already deleted",
                id
            )));
        }

        todo.deleted_at = Some(Utc::now());

        tracing::debug!(todo_id = id, "todo soft-deleted");
        Ok(())
    }

    /// Recomputes `completion_pct` from the todo's live items
    ///
    /// Holds this repository's write lock while reading `items` under its own
    /// read lock. Soft-deleted todos are recomputed too.
    ///
    /// # Errors
    ///
    /// `NotFound` if the todo id was never allocated
    pub async fn recompute_completion(
        &self,
        todo_id: Id,
        items: &dyn LiveItems,
    ) -> StoreResult<Todo> {
        let mut table = self.table.write().await;

        let todo = table
            .rows
            .get_mut(&todo_id)
            .ok_or_else(|| StoreError::not_found(ENTITY, todo_id))?;

        let live = items.live_items_of(todo_id).await;
        todo.completion_pct = completion_percentage(&live);
        todo.updated_at = Utc::now();

        tracing::debug!(
            todo_id,
            live_items = live.len(),
            completion_pct = todo.completion_pct,
            "completion recomputed"
        );
        Ok(todo.clone())
    }

    /// Number of stored todos, soft-deleted ones included
    pub async fn count(&self) -> usize {
        self.table.read().await.rows.len()
    }

    async fn select(&self, predicate: impl Fn(&Todo) -> bool) -> Vec<Todo> {
        let table = self.table.read().await;
        table
            .rows
            .values()
            .filter(|todo| predicate(todo))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TodoItemRepository;

    fn new_todo(user_id: Id) -> CreateTodo {
        CreateTodo {
            title: "Todo".to_string(),
            description: "Description".to_string(),
            user_id,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = TodoRepository::new();

        let first = repo.create(new_todo(1)).await;
        let second = repo.create(new_todo(1)).await;

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.completion_pct, 0.0);
        assert_eq!(first.created_at, first.updated_at);
        assert!(first.deleted_at.is_none());
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = TodoRepository::new();
        let mut todo = repo.create(new_todo(1)).await;
        todo.id = 99;

        assert!(repo.update(todo).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_update_deleted_is_invalid_state() {
        let repo = TodoRepository::new();
        let todo = repo.create(new_todo(1)).await;
        repo.delete(todo.id).await.unwrap();

        let result = repo.update(todo).await;
        assert!(matches!(result, Err(StoreError::InvalidState(_))));
    }

    #[tokio::test]
    async fn test_update_keeps_repository_owned_fields() {
        let repo = TodoRepository::new();
        let items = TodoItemRepository::new();
        let todo = repo.create(new_todo(1)).await;

        let mut stale = repo.get_by_id(todo.id).await.unwrap();
        items
            .create(crate::models::todo_item::CreateTodoItem {
                title: "done".to_string(),
                description: String::new(),
                completed: true,
                todo_id: todo.id,
                user_id: 1,
            })
            .await;
        repo.recompute_completion(todo.id, &items).await.unwrap();

        stale.title = "Renamed".to_string();
        stale.completion_pct = 12.5;
        let updated = repo.update(stale).await.unwrap();

        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.completion_pct, 100.0);
        assert_eq!(updated.created_at, todo.created_at);
        assert!(updated.updated_at >= todo.updated_at);
    }

    #[tokio::test]
    async fn test_double_delete_rejected() {
        let repo = TodoRepository::new();
        let todo = repo.create(new_todo(1)).await;

        repo.delete(todo.id).await.unwrap();
        assert!(matches!(
            repo.delete(todo.id).await,
            Err(StoreError::InvalidState(_))
        ));
        assert!(repo.delete(42).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_recompute_missing_todo_is_not_found() {
        let repo = TodoRepository::new();
        let items = TodoItemRepository::new();

        let result = repo.recompute_completion(1, &items).await;
        assert!(result.unwrap_err().is_not_found());
    }
}
