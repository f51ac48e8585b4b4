use serde::{Deserialize, Serialize};

use crate::auth::authorization::require_owner_or_admin;
use crate::auth::context::AuthContext;
use crate::error::StoreResult;
use crate::models::todo::{CreateTodo, Todo};
use crate::models::Id;
use crate::store::Store;

/// Caller-supplied fields of a new todo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
}

/// Caller-owned fields of an existing todo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoChanges {
    pub title: String,
    pub description: String,
}

/// Todo operations scoped to a caller
#[derive(Clone, Copy)]
pub struct TodoService<'a> {
    store: &'a Store,
}

impl<'a> TodoService<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Creates a todo owned by the caller
    pub async fn create(&self, auth: &AuthContext, data: NewTodo) -> Todo {
        self.store
            .todos
            .create(CreateTodo {
                title: data.title,
                description: data.description,
                user_id: auth.user_id,
            })
            .await
    }

    /// Loads a todo the caller may see
    ///
    /// # Errors
    ///
    /// - `NotFound` if absent (or soft-deleted, for non-admins)
    /// - `Forbidden` if owned by someone else and the caller is not an admin
    pub async fn get(&self, auth: &AuthContext, id: Id) -> StoreResult<Todo> {
        let todo = if auth.is_admin() {
            self.store.todos.get_by_id_including_deleted(id).await?
        } else {
            self.store.todos.get_by_id(id).await?
        };

        require_owner_or_admin(auth, todo.user_id)?;
        Ok(todo)
    }

    /// Admins see every todo including deleted ones; users see their live todos
    pub async fn list(&self, auth: &AuthContext) -> Vec<Todo> {
        let mut todos = if auth.is_admin() {
            self.store.todos.get_all_including_deleted().await
        } else {
            self.store.todos.get_by_owner(auth.user_id).await
        };

        todos.sort_by_key(|todo| todo.id);
        todos
    }

    /// Overwrites title and description
    pub async fn update(
        &self,
        auth: &AuthContext,
        id: Id,
        changes: TodoChanges,
    ) -> StoreResult<Todo> {
        let mut todo = self.get(auth, id).await?;
        todo.title = changes.title;
        todo.description = changes.description;

        self.store.todos.update(todo).await
    }

    /// Soft-deletes a todo
    pub async fn delete(&self, auth: &AuthContext, id: Id) -> StoreResult<()> {
        let todo = self.get(auth, id).await?;
        self.store.todos.delete(todo.id).await
    }
}
