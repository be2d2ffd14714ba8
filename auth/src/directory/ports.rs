use super::errors::DirectoryError;
use super::models::CredentialRecord;

/// Lookup of stored credentials by username.
///
/// Lookups are synchronous. A networked backend blocks on its own client.
pub trait UserDirectory: Send + Sync + 'static {
    /// Retrieve credentials by username.
    ///
    /// # Arguments
    /// * `username` - Username to search for
    ///
    /// # Returns
    /// Optional credential record (None if not found)
    ///
    /// # Errors
    /// * `Unavailable` - Backend could not be queried
    fn find_by_username(&self, username: &str) -> Result<Option<CredentialRecord>, DirectoryError>;
}
