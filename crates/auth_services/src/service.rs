use bcrypt::{DEFAULT_COST, hash, verify};

use crate::types::AuthError;

/// Stateless helpers for credential handling. Hashing embeds a random salt,
/// so the same plaintext yields different hash strings on every call.
pub struct AuthService;

impl AuthService {
    /// Hashes a plaintext password with bcrypt at the default cost.
    pub fn hash_password(plain: &str) -> Result<String, AuthError> {
        Ok(hash(plain, DEFAULT_COST)?)
    }

    /// Verifies a plaintext password against a stored hash, recomputing with
    /// the salt and parameters embedded in the hash string.
    pub fn verify_password(plain: &str, hashed: &str) -> Result<bool, AuthError> {
        Ok(verify(plain, hashed)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_password_hashes_differently_and_both_verify() {
        let first = AuthService::hash_password("secret").unwrap();
        let second = AuthService::hash_password("secret").unwrap();

        assert_ne!(first, second);
        assert!(AuthService::verify_password("secret", &first).unwrap());
        assert!(AuthService::verify_password("secret", &second).unwrap());
    }

    #[test]
    fn wrong_password_is_rejected() {
        let hashed = AuthService::hash_password("secret").unwrap();
        assert!(!AuthService::verify_password("wrong", &hashed).unwrap());
    }
}
