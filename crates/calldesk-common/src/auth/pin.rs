//! Elevated-action PIN verification
//!
//! A secondary shared operator secret required for destructive admin actions
//! (pausing tenants), distinct from login credentials. The PIN is configured
//! as an Argon2 hash and verified the same way passwords are; the plaintext
//! never lives in configuration or code.

use crate::auth::password::{hash_password, verify_password};
use crate::error::AppError;

/// Holder for the configured elevated-action PIN hash
#[derive(Clone)]
pub struct ElevatedPin {
    hash: String,
}

impl ElevatedPin {
    /// Wrap an Argon2 PHC string loaded from configuration
    #[must_use]
    pub fn from_phc(hash: String) -> Self {
        Self { hash }
    }

    /// Hash a plaintext PIN for provisioning (ops tooling, tests)
    ///
    /// # Errors
    /// Returns an error if hashing fails
    pub fn hash_pin(pin: &str) -> Result<String, AppError> {
        hash_password(pin)
    }

    /// Verify a submitted PIN
    ///
    /// # Errors
    /// Returns an error if the stored hash is malformed
    pub fn verify(&self, pin: &str) -> Result<bool, AppError> {
        verify_password(pin, &self.hash)
    }

    /// Verify a submitted PIN, failing with `Forbidden` on mismatch
    ///
    /// # Errors
    /// Returns `AppError::Forbidden` if the PIN doesn't match
    pub fn verify_or_forbidden(&self, pin: &str) -> Result<(), AppError> {
        if self.verify(pin)? {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

impl std::fmt::Debug for ElevatedPin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElevatedPin").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_pin() {
        let hash = ElevatedPin::hash_pin("4821").unwrap();
        let pin = ElevatedPin::from_phc(hash);

        assert!(pin.verify("4821").unwrap());
        assert!(!pin.verify("0000").unwrap());
    }

    #[test]
    fn test_verify_or_forbidden() {
        let hash = ElevatedPin::hash_pin("4821").unwrap();
        let pin = ElevatedPin::from_phc(hash);

        assert!(pin.verify_or_forbidden("4821").is_ok());
        assert!(matches!(
            pin.verify_or_forbidden("1234"),
            Err(AppError::Forbidden)
        ));
    }
}
