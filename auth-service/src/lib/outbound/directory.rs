use std::collections::HashMap;

use auth::CredentialRecord;
use auth::DirectoryError;
use auth::UserDirectory;

use crate::config::DirectoryConfig;

/// User directory backed by a map loaded once at startup.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: HashMap<String, CredentialRecord>,
}

impl InMemoryUserDirectory {
    /// Build a directory from credential records.
    ///
    /// A later record replaces an earlier one with the same username.
    pub fn new(records: impl IntoIterator<Item = CredentialRecord>) -> Self {
        let users = records
            .into_iter()
            .map(|record| (record.username.clone(), record))
            .collect();

        Self { users }
    }

    pub fn from_config(config: &DirectoryConfig) -> Self {
        Self::new(config.users.iter().cloned())
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn find_by_username(&self, username: &str) -> Result<Option<CredentialRecord>, DirectoryError> {
        Ok(self.users.get(username).cloned())
    }
}
