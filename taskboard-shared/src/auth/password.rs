/// Password hashing module using Argon2id
///
/// Credentials are an opaque capability to the rest of the crate: the user
/// repository only ever sees the [`CredentialHasher`] trait. [`Argon2Hasher`]
/// is the production implementation.
///
/// # Security
///
/// - **Algorithm**: Argon2id (hybrid of Argon2i and Argon2d)
/// - **Memory**: 64 MB (65536 KB) by default
/// - **Iterations**: 3 passes by default
/// - **Parallelism**: 4 lanes by default
/// - **Output**: 32-byte hash in PHC string format
///
/// Verification is constant-time; that guarantee comes from the scheme, not
/// from the callers.
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("super_secret_password_123")?;
/// assert!(verify_password("super_secret_password_123", &hash)?);
/// assert!(!verify_password("wrong_password", &hash)?);
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder, Version,
};

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    /// Invalid password hash format
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

/// Hash-and-compare capability consumed by the user repository
pub trait CredentialHasher: Send + Sync {
    /// Derives a storable credential from a plaintext password
    fn hash(&self, password: &str) -> Result<String, PasswordError>;

    /// Returns `Ok(true)` iff `password` matches `hash`
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError>;
}

/// Argon2id implementation of [`CredentialHasher`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Hasher {
    m_cost: u32,
    t_cost: u32,
    p_cost: u32,
}

impl Argon2Hasher {
    /// Memory cost in KiB used by [`Argon2Hasher::default`]
    pub const DEFAULT_M_COST: u32 = 65536;
    /// Iterations used by [`Argon2Hasher::default`]
    pub const DEFAULT_T_COST: u32 = 3;
    /// Lanes used by [`Argon2Hasher::default`]
    pub const DEFAULT_P_COST: u32 = 4;

    /// Creates a hasher with explicit cost parameters
    ///
    /// Parameters are checked when hashing; Argon2 requires
    /// `m_cost >= 8 * p_cost`.
    ///
    /// # Example
    ///
    /// ```
    /// use taskboard_shared::auth::password::{Argon2Hasher, CredentialHasher};
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// // Cheap parameters for tests
    /// let hasher = Argon2Hasher::with_params(8, 1, 1);
    /// let hash = hasher.hash("pw")?;
    /// assert!(hasher.verify("pw", &hash)?);
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_params(m_cost: u32, t_cost: u32, p_cost: u32) -> Self {
        Self {
            m_cost,
            t_cost,
            p_cost,
        }
    }

    /// Like [`Argon2Hasher::with_params`], but rejects costs argon2 would
    /// refuse at hashing time
    ///
    /// # Errors
    ///
    /// Returns `PasswordError::HashError` naming the invalid parameter
    pub fn try_with_params(m_cost: u32, t_cost: u32, p_cost: u32) -> Result<Self, PasswordError> {
        let hasher = Self::with_params(m_cost, t_cost, p_cost);
        hasher.argon2()?;
        Ok(hasher)
    }

    fn argon2(&self) -> Result<Argon2<'static>, PasswordError> {
        let params = ParamsBuilder::new()
            .m_cost(self.m_cost)
            .t_cost(self.t_cost)
            .p_cost(self.p_cost)
            .output_len(32)
            .build()
            .map_err(|e| PasswordError::HashError(format!("Invalid parameters: {}", e)))?;

        Ok(Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self::with_params(
            Self::DEFAULT_M_COST,
            Self::DEFAULT_T_COST,
            Self::DEFAULT_P_COST,
        )
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = self
            .argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

        Ok(password_hash.to_string())
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| PasswordError::InvalidHash(format!("Failed to parse hash: {}", e)))?;

        // Parameters are embedded in the hash
        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(_) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordError::VerifyError(format!("Verification failed: {}", e))),
        }
    }
}

/// Hashes a password with the default Argon2id parameters
///
/// # Errors
///
/// Returns `PasswordError::HashError` if hashing fails
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    Argon2Hasher::default().hash(password)
}

/// Verifies a password against a PHC hash
///
/// # Errors
///
/// Returns `PasswordError::InvalidHash` if the stored hash cannot be parsed
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    Argon2Hasher::default().verify(password, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> Argon2Hasher {
        Argon2Hasher::with_params(8, 1, 1)
    }

    #[test]
    fn test_hash_password() {
        let hash = hash_password("test_password_123").expect("Hash should succeed");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("v=19"));
        assert!(hash.contains("m=65536"));
        assert!(hash.contains("t=3"));
        assert!(hash.contains("p=4"));
    }

    #[test]
    fn test_hash_produces_different_salts() {
        let hasher = cheap();
        let hash1 = hasher.hash("same_password").expect("Hash 1 should succeed");
        let hash2 = hasher.hash("same_password").expect("Hash 2 should succeed");

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_correct_and_incorrect() {
        let hasher = cheap();
        let hash = hasher
            .hash("correct_password")
            .expect("Hash should succeed");

        assert!(hasher.verify("correct_password", &hash).unwrap());
        assert!(!hasher.verify("wrong_password", &hash).unwrap());
        assert!(!hasher.verify("", &hash).unwrap());
    }

    #[test]
    fn test_verify_is_case_sensitive() {
        let hasher = cheap();
        let hash = hasher.hash("Secret").unwrap();

        assert!(!hasher.verify("secret", &hash).unwrap());
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = cheap();
        assert!(hasher.verify("password", "invalid_hash").is_err());
        assert!(hasher.verify("password", "$argon2id$invalid").is_err());
    }

    #[test]
    fn test_invalid_params_fail_on_hash() {
        // m_cost below 8 * p_cost is rejected by argon2
        let hasher = Argon2Hasher::with_params(1, 1, 4);
        let result = hasher.hash("password");
        assert!(matches!(result, Err(PasswordError::HashError(_))));
    }

    #[test]
    fn test_try_with_params() {
        assert!(Argon2Hasher::try_with_params(8, 1, 1).is_ok());
        assert!(matches!(
            Argon2Hasher::try_with_params(1, 1, 4),
            Err(PasswordError::HashError(_))
        ));
        assert!(Argon2Hasher::try_with_params(65536, 0, 4).is_err());
    }

    #[test]
    fn test_default_verify_accepts_cheap_hash() {
        let hash = cheap().hash("unicode-密码-パスワード").unwrap();
        assert!(verify_password("unicode-密码-パスワード", &hash).unwrap());
    }
}
