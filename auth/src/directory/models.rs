use serde::Deserialize;
use serde::Serialize;

/// Stored credentials for one account, as held by a user directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CredentialRecord {
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub hashed_password: String,
    #[serde(default)]
    pub disabled: bool,
}

/// Public view of an account.
///
/// Carries no password material, so it is safe to hand back to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub disabled: bool,
}

impl From<&CredentialRecord> for AuthenticatedUser {
    fn from(record: &CredentialRecord) -> Self {
        Self {
            username: record.username.clone(),
            email: record.email.clone(),
            full_name: record.full_name.clone(),
            disabled: record.disabled,
        }
    }
}

impl From<CredentialRecord> for AuthenticatedUser {
    fn from(record: CredentialRecord) -> Self {
        Self {
            username: record.username,
            email: record.email,
            full_name: record.full_name,
            disabled: record.disabled,
        }
    }
}
