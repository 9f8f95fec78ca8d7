//! Password digests.
//!
//! The engine only ever sees the [`PasswordHasher`] seam; [`Bcrypt`] is the
//! implementation wired in by the binaries.

use std::fmt::Debug;

use crate::{EngineError, ResultEngine};

/// One-way password hashing.
pub trait PasswordHasher: Debug + Send + Sync {
    /// Produce a salted digest of `password`.
    fn hash(&self, password: &str) -> ResultEngine<String>;

    /// Check `password` against a digest produced by [`PasswordHasher::hash`].
    fn verify(&self, password: &str, digest: &str) -> ResultEngine<bool>;
}

/// bcrypt with a configurable work factor.
#[derive(Clone, Copy, Debug)]
pub struct Bcrypt {
    cost: u32,
}

impl Bcrypt {
    pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

    /// `cost` increases the rounds of hashing and therefore the time needed
    /// to verify a password. Tests use the minimum (4).
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for Bcrypt {
    fn default() -> Self {
        Self::new(Self::DEFAULT_COST)
    }
}

impl PasswordHasher for Bcrypt {
    fn hash(&self, password: &str) -> ResultEngine<String> {
        bcrypt::hash(password, self.cost)
            .map_err(|err| EngineError::Internal(format!("failed to hash password: {err}")))
    }

    fn verify(&self, password: &str, digest: &str) -> ResultEngine<bool> {
        bcrypt::verify(password, digest)
            .map_err(|err| EngineError::Internal(format!("failed to verify password: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_verifies_only_the_original_password() {
        let hasher = Bcrypt::new(4);
        let digest = hasher.hash("correct horse").unwrap();

        assert_ne!(digest, "correct horse");
        assert!(hasher.verify("correct horse", &digest).unwrap());
        assert!(!hasher.verify("battery staple", &digest).unwrap());
    }

    #[test]
    fn same_password_gets_a_fresh_salt() {
        let hasher = Bcrypt::new(4);
        let first = hasher.hash("hunter2").unwrap();
        let second = hasher.hash("hunter2").unwrap();
        assert_ne!(first, second);
    }
}
