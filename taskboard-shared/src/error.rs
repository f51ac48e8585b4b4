/// Error taxonomy for the data store and the services built on it
///
/// Every failure is returned synchronously to the immediate caller and leaves
/// the repositories exactly as they were before the call.
///
/// # Variants
///
/// - `NotFound`: id absent, or filtered out by soft-delete scoping
/// - `Forbidden`: record exists but the caller lacks rights to it
/// - `DuplicateUsername`: uniqueness violation on user create/update
/// - `InvalidState`: mutation of a soft-deleted record (including double delete)
/// - `InvalidCredentials`: username/password pair did not verify
/// - `Credential`: the hashing capability itself failed
use crate::auth::authorization::AuthzError;
use crate::auth::password::PasswordError;

/// Result alias used by repositories and services
pub type StoreResult<T> = Result<T, StoreError>;

/// Store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Entity does not exist (or is hidden from the requested view)
    #[error("{entity} {key} not found")]
    NotFound {
        /// Entity kind, e.g. "todo"
        entity: &'static str,
        /// Lookup key (id or username)
        key: String,
    },

    /// Entity exists but the caller may not access it
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Another live user already has this username
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    /// Entity is in a state that does not allow the operation
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Authentication failed
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Password hashing or verification failed
    #[error(transparent)]
    Credential(#[from] PasswordError),
}

impl StoreError {
    pub(crate) fn not_found(entity: &'static str, key: impl ToString) -> Self {
        StoreError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// True for `NotFound`
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// True for `Forbidden`
    pub fn is_forbidden(&self) -> bool {
        matches!(self, StoreError::Forbidden(_))
    }
}

impl From<AuthzError> for StoreError {
    fn from(err: AuthzError) -> Self {
        StoreError::Forbidden(err.to_string())
    }
}
