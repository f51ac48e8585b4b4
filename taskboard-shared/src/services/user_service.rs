use crate::auth::authorization::{require_admin, require_owner_or_admin, AuthzError};
use crate::auth::context::AuthContext;
use crate::error::{StoreError, StoreResult};
use crate::models::user::{CreateUser, UpdateUser, User};
use crate::models::{Id, Role};
use crate::store::Store;

/// Account operations
///
/// Users may read and edit their own account; listing, deleting and role
/// changes are admin-only. Registration is public but cannot create admins.
#[derive(Clone, Copy)]
pub struct UserService<'a> {
    store: &'a Store,
}

impl<'a> UserService<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Public registration
    ///
    /// # Errors
    ///
    /// - `Forbidden` if `data.role` is `Admin`
    /// - `DuplicateUsername` if the username is taken
    pub async fn register(&self, data: CreateUser) -> StoreResult<User> {
        if data.role == Role::Admin {
            return Err(AuthzError::AdminRequired.into());
        }

        self.store.users.create(data).await
    }

    /// Registration by an authenticated caller; admins may create admins
    pub async fn register_as(&self, auth: &AuthContext, data: CreateUser) -> StoreResult<User> {
        if data.role == Role::Admin {
            require_admin(auth)?;
        }

        self.store.users.create(data).await
    }

    /// Resolves a username/password pair to a user
    ///
    /// Unknown usernames and wrong passwords both yield `InvalidCredentials`.
    pub async fn authenticate(&self, username: &str, password: &str) -> StoreResult<User> {
        let user = match self.store.users.get_by_username(username).await {
            Ok(user) => user,
            Err(StoreError::NotFound { .. }) => {
                tracing::warn!(username, "login for unknown user");
                return Err(StoreError::InvalidCredentials);
            }
            Err(e) => return Err(e),
        };

        if !self.store.users.check_password(&user, password)? {
            tracing::warn!(user_id = user.id, "login with wrong password");
            return Err(StoreError::InvalidCredentials);
        }

        Ok(user)
    }

    pub async fn get(&self, auth: &AuthContext, id: Id) -> StoreResult<User> {
        let user = self.store.users.get_by_id(id).await?;
        require_owner_or_admin(auth, user.id)?;
        Ok(user)
    }

    pub async fn get_by_username(&self, auth: &AuthContext, username: &str) -> StoreResult<User> {
        let user = self.store.users.get_by_username(username).await?;
        require_owner_or_admin(auth, user.id)?;
        Ok(user)
    }

    /// All users sorted by id (admin only)
    pub async fn list(&self, auth: &AuthContext) -> StoreResult<Vec<User>> {
        require_admin(auth)?;

        let mut users = self.store.users.get_all().await;
        users.sort_by_key(|user| user.id);
        Ok(users)
    }

    /// Updates an account; only admins may change a role
    ///
    /// A non-admin may resend the role they already hold. The role is only
    /// written for admin callers.
    pub async fn update(
        &self,
        auth: &AuthContext,
        id: Id,
        mut data: UpdateUser,
    ) -> StoreResult<User> {
        let existing = self.get(auth, id).await?;
        if !auth.is_admin() {
            if matches!(data.role, Some(role) if role != existing.role) {
                require_admin(auth)?;
            }
            data.role = None;
        }

        self.store.users.update(id, data).await
    }

    /// Hard-deletes an account (admin only); owned todos are not touched
    pub async fn delete(&self, auth: &AuthContext, id: Id) -> StoreResult<()> {
        require_admin(auth)?;
        self.store.users.delete(id).await
    }
}
