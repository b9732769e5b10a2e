//! Password hashing via bcrypt.

use super::AuthError;

/// bcrypt cost factor.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Cost range accepted by bcrypt.
pub const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

/// One-way password digest.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a storable digest.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Check a plaintext candidate against a stored digest.
    fn verify(&self, password: &str, digest: &str) -> Result<bool, AuthError>;
}

/// bcrypt-backed [`PasswordHasher`].
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| AuthError::Internal(format!("bcrypt hash: {e}")))
    }

    fn verify(&self, password: &str, digest: &str) -> Result<bool, AuthError> {
        bcrypt::verify(password, digest)
            .map_err(|e| AuthError::Internal(format!("bcrypt verify: {e}")))
    }
}
