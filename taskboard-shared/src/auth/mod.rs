/// Authentication and authorization utilities
///
/// # Modules
///
/// - [`password`]: Argon2id credential hashing behind the `CredentialHasher` trait
/// - [`jwt`]: JWT token generation and validation
/// - [`context`]: `AuthContext`, the resolved caller identity
/// - [`middleware`]: Bearer-token middleware and the `AuthContext` extractor
/// - [`authorization`]: Ownership-or-admin checks
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::auth::password::{hash_password, verify_password};
/// use taskboard_shared::auth::jwt::{create_token, Claims};
/// use taskboard_shared::models::Role;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let token = create_token(&Claims::new(1, Role::User), "secret-key")?;
/// # Ok(())
/// # }
/// ```

pub mod authorization;
pub mod context;
pub mod jwt;
pub mod middleware;
pub mod password;
