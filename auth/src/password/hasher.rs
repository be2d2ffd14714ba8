use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

const ARGON2_PREFIX: &str = "$argon2";
const ARGON2ID_PREFIX: &str = "$argon2id$";
const BCRYPT_PREFIX: &str = "$2";

/// Password hashing implementation.
///
/// New hashes are Argon2id. Verification also accepts bcrypt hashes so
/// credential tables produced by older tooling keep working.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password securely.
    ///
    /// Uses Argon2id with random salt generation, so hashing the same
    /// password twice yields two different strings.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// The hash family is detected from its prefix. A malformed, empty or
    /// unrecognised hash never matches.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored hash (Argon2 PHC string or bcrypt)
    ///
    /// # Returns
    /// True if password matches, false otherwise
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        if hash.starts_with(ARGON2_PREFIX) {
            Self::verify_argon2(password, hash)
        } else if hash.starts_with(BCRYPT_PREFIX) {
            Self::verify_bcrypt(password, hash)
        } else {
            tracing::warn!("Unrecognised password hash format");
            false
        }
    }

    /// Whether a stored hash should be replaced by a fresh Argon2id hash.
    pub fn needs_rehash(&self, hash: &str) -> bool {
        !hash.starts_with(ARGON2ID_PREFIX)
    }

    fn verify_argon2(password: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed_hash) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok(),
            Err(e) => {
                tracing::warn!(error = %e, "Malformed argon2 password hash");
                false
            }
        }
    }

    fn verify_bcrypt(password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Malformed bcrypt password hash");
            false
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");
        assert!(hash.starts_with(ARGON2ID_PREFIX));

        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("ehab123").expect("Failed to hash password");
        let second = hasher.hash("ehab123").expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(hasher.verify("ehab123", &first));
        assert!(hasher.verify("ehab123", &second));
    }

    #[test]
    fn test_verify_bcrypt_hash() {
        let hasher = PasswordHasher::new();
        let hash = bcrypt::hash("ehab123", 4).expect("Failed to hash with bcrypt");

        assert!(hasher.verify("ehab123", &hash));
        assert!(!hasher.verify("ehab124", &hash));
        assert!(hasher.needs_rehash(&hash));
    }

    #[test]
    fn test_verify_malformed_hash_returns_false() {
        let hasher = PasswordHasher::new();

        assert!(!hasher.verify("password", "invalid_hash"));
        assert!(!hasher.verify("password", ""));
        assert!(!hasher.verify("password", "$argon2id$garbage"));
        assert!(!hasher.verify("password", "$2b$12$tooshort"));
    }

    #[test]
    fn test_needs_rehash() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("password").expect("Failed to hash password");

        assert!(!hasher.needs_rehash(&hash));
        assert!(hasher.needs_rehash("$2b$12$4ulnQhnvgnW3kg3PdxbwuunLgngvEvRqwGj0MIST9CHHTWJzxo1yu"));
    }
}
