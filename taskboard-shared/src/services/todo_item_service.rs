use serde::{Deserialize, Serialize};

use super::TodoService;
use crate::auth::context::AuthContext;
use crate::error::{StoreError, StoreResult};
use crate::models::todo::Todo;
use crate::models::todo_item::{CreateTodoItem, TodoItem};
use crate::models::Id;
use crate::store::Store;

/// Caller-supplied fields of a new item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTodoItem {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

/// Partial update of an item; `None` keeps the stored value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TodoItemChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

/// Item operations scoped to a caller
///
/// Access to an item is decided by its parent todo.
#[derive(Clone, Copy)]
pub struct TodoItemService<'a> {
    store: &'a Store,
}

impl<'a> TodoItemService<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Adds an item to a todo and recomputes the todo's completion
    ///
    /// The item is owned by the todo's owner, even when an admin creates it.
    pub async fn create(
        &self,
        auth: &AuthContext,
        todo_id: Id,
        data: NewTodoItem,
    ) -> StoreResult<TodoItem> {
        let todo = self.parent(auth, todo_id).await?;

        let item = self
            .store
            .items
            .create(CreateTodoItem {
                title: data.title,
                description: data.description,
                completed: data.completed,
                todo_id: todo.id,
                user_id: todo.user_id,
            })
            .await;

        self.recompute(todo.id).await?;
        Ok(item)
    }

    /// Items of a todo; admins also see deleted ones
    pub async fn list(&self, auth: &AuthContext, todo_id: Id) -> StoreResult<Vec<TodoItem>> {
        let todo = self.parent(auth, todo_id).await?;

        let mut items = if auth.is_admin() {
            self.store.items.get_by_parent_including_deleted(todo.id).await
        } else {
            self.store.items.get_by_parent(todo.id).await
        };

        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    /// Applies the present fields and recomputes the todo's completion
    pub async fn update(
        &self,
        auth: &AuthContext,
        todo_id: Id,
        item_id: Id,
        changes: TodoItemChanges,
    ) -> StoreResult<TodoItem> {
        let mut item = self.load(auth, todo_id, item_id).await?;

        if let Some(title) = changes.title {
            item.title = title;
        }
        if let Some(description) = changes.description {
            item.description = description;
        }
        if let Some(completed) = changes.completed {
            item.completed = completed;
        }

        let item = self.store.items.update(item).await?;
        self.recompute(todo_id).await?;
        Ok(item)
    }

    /// Soft-deletes an item and recomputes the todo's completion
    pub async fn delete(&self, auth: &AuthContext, todo_id: Id, item_id: Id) -> StoreResult<()> {
        let item = self.load(auth, todo_id, item_id).await?;

        self.store.items.delete(item.id).await?;
        self.recompute(todo_id).await?;
        Ok(())
    }

    async fn parent(&self, auth: &AuthContext, todo_id: Id) -> StoreResult<Todo> {
        TodoService::new(self.store).get(auth, todo_id).await
    }

    async fn load(&self, auth: &AuthContext, todo_id: Id, item_id: Id) -> StoreResult<TodoItem> {
        self.parent(auth, todo_id).await?;

        let item = if auth.is_admin() {
            self.store.items.get_by_id_including_deleted(item_id).await?
        } else {
            self.store.items.get_by_id(item_id).await?
        };

        // An item addressed through the wrong todo does not exist there
        if item.todo_id != todo_id {
            return Err(StoreError::not_found("todo item", item_id));
        }

        Ok(item)
    }

    async fn recompute(&self, todo_id: Id) -> StoreResult<Todo> {
        self.store
            .todos
            .recompute_completion(todo_id, self.store.items.as_ref())
            .await
    }
}
