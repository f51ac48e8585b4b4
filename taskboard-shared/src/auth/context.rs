/// Resolved caller identity
///
/// Everything downstream of authentication (authorization checks and the
/// services) reasons about this pair only, never about token structure or
/// HTTP headers. The HTTP side builds it in [`super::middleware`].

use serde::{Deserialize, Serialize};

use super::jwt::Claims;
use crate::models::{Id, Role};

/// Caller identity handed to every service operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: Id,

    /// Role carried by the token
    pub role: Role,
}

impl AuthContext {
    /// Creates a context for an explicit identity
    pub fn new(user_id: Id, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Creates auth context from validated JWT claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self::new(claims.sub, claims.role)
    }

    /// True when ownership checks are bypassed
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
