/// Password encoding
use crate::error::{Result, ServerError};

/// Hashes and verifies credentials
///
/// The directories only ever see this trait, so the hashing scheme can be
/// swapped without touching them.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordEncoder: Send + Sync {
    /// Hash a raw password
    fn encode(&self, raw: &str) -> Result<String>;

    /// Check a raw password against a stored hash
    fn matches(&self, raw: &str, hash: &str) -> Result<bool>;
}

/// bcrypt-backed [`PasswordEncoder`]
#[derive(Debug, Clone)]
pub struct BcryptPasswordEncoder {
    cost: u32,
}

impl BcryptPasswordEncoder {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordEncoder {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordEncoder for BcryptPasswordEncoder {
    fn encode(&self, raw: &str) -> Result<String> {
        bcrypt::hash(raw, self.cost).map_err(ServerError::from)
    }

    fn matches(&self, raw: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(raw, hash).map_err(ServerError::from)
    }
}
