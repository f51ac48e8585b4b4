/// Authorization helpers
///
/// One rule applies to every todo and item: an admin bypasses ownership, a
/// non-admin may only touch records whose `user_id` equals their own id.
/// Existence is checked by the caller first so that "does not exist"
/// (`NotFound`) and "exists but not yours" (`Forbidden`) stay distinguishable.
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::authorization::require_owner_or_admin;
/// use taskboard_shared::auth::context::AuthContext;
/// use taskboard_shared::models::Role;
///
/// let alice = AuthContext::new(1, Role::User);
/// assert!(require_owner_or_admin(&alice, 1).is_ok());
/// assert!(require_owner_or_admin(&alice, 2).is_err());
///
/// let admin = AuthContext::new(9, Role::Admin);
/// assert!(require_owner_or_admin(&admin, 2).is_ok());
/// ```

use super::context::AuthContext;
use crate::models::Id;

/// Error type for authorization checks
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthzError {
    /// Caller neither owns the resource nor is an admin
    #[error("Not authorized to access this resource")]
    NotOwner,

    /// Operation is restricted to admins
    #[error("Admin access required")]
    AdminRequired,
}

/// Checks that the caller owns the resource or is an admin
pub fn require_owner_or_admin(auth: &AuthContext, resource_owner_id: Id) -> Result<(), AuthzError> {
    if auth.is_admin() || auth.user_id == resource_owner_id {
        return Ok(());
    }

    tracing::warn!(
        user_id = auth.user_id,
        owner_id = resource_owner_id,
        "ownership check failed"
    );
    Err(AuthzError::NotOwner)
}

/// Checks that the caller is an admin
pub fn require_admin(auth: &AuthContext) -> Result<(), AuthzError> {
    if auth.is_admin() {
        return Ok(());
    }

    tracing::warn!(user_id = auth.user_id, "admin check failed");
    Err(AuthzError::AdminRequired)
}
