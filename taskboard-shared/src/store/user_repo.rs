use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::auth::password::CredentialHasher;
use crate::error::{StoreError, StoreResult};
use crate::models::user::{CreateUser, UpdateUser, User};
use crate::models::Id;

const ENTITY: &str = "user";

struct UserTable {
    rows: HashMap<Id, User>,
    next_id: Id,
}

impl UserTable {
    fn username_taken(&self, username: &str, except: Option<Id>) -> bool {
        self.rows
            .values()
            .any(|user| user.username == username && Some(user.id) != except)
    }
}

/// Lock-guarded collection of users
///
/// Usernames are unique (exact, case-sensitive match). The uniqueness check
/// and the insert happen under one write lock. Plaintext passwords are
/// hashed before the lock is taken and never stored.
pub struct UserRepository {
    table: RwLock<UserTable>,
    hasher: Arc<dyn CredentialHasher>,
}

impl UserRepository {
    pub fn new(hasher: Arc<dyn CredentialHasher>) -> Self {
        Self {
            table: RwLock::new(UserTable {
                rows: HashMap::new(),
                next_id: 1,
            }),
            hasher,
        }
    }

    /// Creates a user, storing a hash of `data.password`
    ///
    /// # Errors
    ///
    /// - `DuplicateUsername` if a user with this exact username exists
    /// - `Credential` if hashing fails
    pub async fn create(&self, data: CreateUser) -> StoreResult<User> {
        let password_hash = self.hasher.hash(&data.password)?;

        let mut table = self.table.write().await;
        if table.username_taken(&data.username, None) {
            return Err(StoreError::DuplicateUsername(data.username));
        }

        let id = table.next_id;
        table.next_id += 1;

        let now = Utc::now();
        let user = User {
            id,
            username: data.username,
            password_hash,
            role: data.role,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(id, user.clone());

        tracing::info!(user_id = id, username = %user.username, role = %user.role, "user created");
        Ok(user)
    }

    pub async fn get_by_id(&self, id: Id) -> StoreResult<User> {
        let table = self.table.read().await;
        table
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }

    pub async fn get_by_username(&self, username: &str) -> StoreResult<User> {
        let table = self.table.read().await;
        table
            .rows
            .values()
            .find(|user| user.username == username)
            .cloned()
            .ok_or_else(|| StoreError::not_found(ENTITY, username))
    }

    /// All users, in no particular order
    pub async fn get_all(&self) -> Vec<User> {
        let table = self.table.read().await;
        table.rows.values().cloned().collect()
    }

    /// Overwrites username and role; re-hashes the password if one is given
    ///
    /// # Errors
    ///
    /// - `NotFound` if the id is absent
    /// - `DuplicateUsername` if the new username belongs to another user
    /// - `Credential` if hashing fails
    pub async fn update(&self, id: Id, data: UpdateUser) -> StoreResult<User> {
        let password_hash = if data.password.is_empty() {
            None
        } else {
            Some(self.hasher.hash(&data.password)?)
        };

        let mut table = self.table.write().await;
        if !table.rows.contains_key(&id) {
            return Err(StoreError::not_found(ENTITY, id));
        }
        if table.username_taken(&data.username, Some(id)) {
            return Err(StoreError::DuplicateUsername(data.username));
        }

        let user = table
            .rows
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(ENTITY, id))?;
        user.username = data.username;
        if let Some(role) = data.role {
            user.role = role;
        }
        if let Some(hash) = password_hash {
            user.password_hash = hash;
        }
        user.updated_at = Utc::now();

        tracing::debug!(user_id = id, "user updated");
        Ok(user.clone())
    }

    /// Physically removes a user
    ///
    /// Todos and items owned by the user are left in place.
    pub async fn delete(&self, id: Id) -> StoreResult<()> {
        let mut table = self.table.write().await;
        table
            .rows
            .remove(&id)
            .ok_or_else(|| StoreError::not_found(ENTITY, id))?;

        tracing::info!(user_id = id, "user deleted");
        Ok(())
    }

    /// Checks a plaintext password against the user's stored hash
    pub fn check_password(&self, user: &User, password: &str) -> StoreResult<bool> {
        Ok(self.hasher.verify(password, &user.password_hash)?)
    }

    pub async fn count(&self) -> usize {
        self.table.read().await.rows.len()
    }
}
