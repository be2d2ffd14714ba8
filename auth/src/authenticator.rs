use std::sync::Arc;
use std::sync::OnceLock;

use crate::directory::AuthenticatedUser;
use crate::directory::DirectoryError;
use crate::directory::UserDirectory;
use crate::password::PasswordHasher;

/// Verifies username/password pairs against a user directory.
pub struct Authenticator<D>
where
    D: UserDirectory,
{
    directory: Arc<D>,
    password_hasher: PasswordHasher,
    dummy_hash: OnceLock<String>,
}

/// Password hashed for unknown usernames so that a miss costs one verification.
const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-users";

/// Authentication operation errors.
///
/// `UserNotFound` and `BadCredentials` are kept apart for logging only;
/// callers facing clients must report both the same way.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    #[error("User not found")]
    UserNotFound,

    #[error("Invalid credentials")]
    BadCredentials,

    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),
}

impl AuthenticationError {
    /// True for failures caused by the presented credentials.
    pub fn is_credential_failure(&self) -> bool {
        matches!(
            self,
            AuthenticationError::UserNotFound | AuthenticationError::BadCredentials
        )
    }
}

impl<D> Authenticator<D>
where
    D: UserDirectory,
{
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `directory` - Source of stored credentials
    pub fn new(directory: Arc<D>) -> Self {
        Self {
            directory,
            password_hasher: PasswordHasher::new(),
            dummy_hash: OnceLock::new(),
        }
    }

    fn dummy_hash(&self) -> &str {
        self.dummy_hash.get_or_init(|| {
            self.password_hasher
                .hash(DUMMY_PASSWORD)
                .unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "Failed to hash dummy password");
                    String::new()
                })
        })
    }

    /// Verify credentials and return the matching account.
    ///
    /// Password verification is CPU-bound; async callers should run this on
    /// a blocking thread.
    ///
    /// # Arguments
    /// * `username` - Username presented by the client
    /// * `password` - Plaintext password presented by the client
    ///
    /// # Returns
    /// The account, without its password hash
    ///
    /// # Errors
    /// * `UserNotFound` - No account with this username
    /// * `BadCredentials` - Password does not match
    /// * `Directory` - Credential lookup failed
    pub fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, AuthenticationError> {
        let Some(record) = self.directory.find_by_username(username)? else {
            // Burn one verification so unknown users cost as much as wrong passwords.
            let _ = self.password_hasher.verify(password, self.dummy_hash());
            tracing::debug!(username, "Authentication failed: unknown user");
            return Err(AuthenticationError::UserNotFound);
        };

        if !self.password_hasher.verify(password, &record.hashed_password) {
            tracing::debug!(username, "Authentication failed: password mismatch");
            return Err(AuthenticationError::BadCredentials);
        }

        if self.password_hasher.needs_rehash(&record.hashed_password) {
            tracing::info!(username, "Stored password hash uses a legacy scheme");
        }

        Ok(record.into())
    }
}
