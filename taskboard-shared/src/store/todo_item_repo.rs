use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::LiveItems;
use crate::error::{StoreError, StoreResult};
use crate::models::todo_item::{CreateTodoItem, TodoItem};
use crate::models::Id;

const ENTITY: &str = "todo item";

#[derive(Debug)]
struct ItemTable {
    rows: HashMap<Id, TodoItem>,
    next_id: Id,
}

/// Lock-guarded collection of todo items
///
/// Same shape as [`TodoRepository`](super::TodoRepository), scoped by parent
/// todo instead of owner.
#[derive(Debug)]
pub struct TodoItemRepository {
    table: RwLock<ItemTable>,
}

impl Default for TodoItemRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoItemRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(ItemTable {
                rows: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Inserts an item with the next id
    ///
    /// The caller is responsible for `user_id` matching the parent todo's
    /// owner.
    pub async fn create(&self, data: CreateTodoItem) -> TodoItem {
        let mut table = self.table.write().await;

        let id = table.next_id;
        table.next_id += 1;

        let now = Utc::now();
        let item = TodoItem {
            id,
            title: data.title,
            description: data.description,
            completed: data.completed,
            todo_id: data.todo_id,
            user_id: data.user_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        table.rows.insert(id, item.clone());

        tracing::debug!(item_id = id, todo_id = item.todo_id, "todo item created");
        item
    }

    /// Fetches a live item
    pub async fn get_by_id(&self, id: Id) -> StoreResult<TodoItem> {
        let table = self.table.read().await;
        table
            .rows
            .get(&id)
            .filter(|item| item.is_live())
            .cloned()
            .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }

    /// Fetches an item whether or not it was soft-deleted
    pub async fn get_by_id_including_deleted(&self, id: Id) -> StoreResult<TodoItem> {
        let table = self.table.read().await;
        table
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }

    /// Live items of one todo
    pub async fn get_by_parent(&self, todo_id: Id) -> Vec<TodoItem> {
        self.select(|item| item.todo_id == todo_id && item.is_live()).await
    }

    /// All items of one todo, soft-deleted ones included
    pub async fn get_by_parent_including_deleted(&self, todo_id: Id) -> Vec<TodoItem> {
        self.select(|item| item.todo_id == todo_id).await
    }

    /// All live items
    pub async fn get_all(&self) -> Vec<TodoItem> {
        self.select(|item| item.is_live()).await
    }

    /// Every item, soft-deleted ones included
    pub async fn get_all_including_deleted(&self) -> Vec<TodoItem> {
        self.select(|_| true).await
    }

    /// Replaces a live item with `item` and refreshes `updated_at`
    ///
    /// `created_at` and `deleted_at` keep their stored values.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the id was never allocated
    /// - `InvalidState` if the item is soft-deleted
    pub async fn update(&self, mut item: TodoItem) -> StoreResult<TodoItem> {
        let mut table = self.table.write().await;

        let existing = table
            .rows
            .get_mut(&item.id)
            .ok_or_else(|| StoreError::not_found(ENTITY, item.id))?;
        if !existing.is_live() {
            return Err(StoreError::InvalidState(format!(
                "todo item {} is deleted",
                item.id
            )));
        }

        item.created_at = existing.created_at;
        item.deleted_at = None;
        item.updated_at = Utc::now();
        *existing = item.clone();

        tracing::debug!(item_id = item.id, completed = item.completed, "todo item updated");
        Ok(item)
    }

    /// Soft-deletes a live item
    ///
    /// # Errors
    ///
    /// - `NotFound` if the id was never allocated
    /// - `InvalidState` if the item was already deleted
    pub async fn delete(&self, id: Id) -> StoreResult<()> {
        let mut table = self.table.write().await;

        let item = table
            .rows
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(ENTITY, id))?;
        if !item.is_live() {
            return Err(StoreError::InvalidState(format!(
                "todo item {} is already deleted",
                id
            )));
        }

        item.deleted_at = Some(Utc::now());

        tracing::debug!(item_id = id, "todo item soft-deleted");
        Ok(())
    }

    /// Number of stored items, soft-deleted ones included
    pub async fn count(&self) -> usize {
        self.table.read().await.rows.len()
    }

    async fn select(&self, predicate: impl Fn(&TodoItem) -> bool) -> Vec<TodoItem> {
        let table = self.table.read().await;
        table
            .rows
            .values()
            .filter(|item| predicate(item))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl LiveItems for TodoItemRepository {
    async fn live_items_of(&self, todo_id: Id) -> Vec<TodoItem> {
        self.get_by_parent(todo_id).await
    }
}
