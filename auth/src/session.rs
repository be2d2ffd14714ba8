use std::sync::Arc;

use chrono::Duration;
use serde::Deserialize;
use serde::Serialize;

use crate::directory::AuthenticatedUser;
use crate::directory::DirectoryError;
use crate::directory::UserDirectory;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;

/// Lifetime of issued access tokens unless configured otherwise.
pub const ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 30;

/// Token type reported alongside every access token.
pub const BEARER_TOKEN_TYPE: &str = "bearer";

/// Access token handed to a client after a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
}

impl AccessToken {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: BEARER_TOKEN_TYPE.to_string(),
        }
    }
}

/// Errors raised while resolving a bearer token to an account.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Could not validate credentials")]
    Unauthorized,

    #[error("Inactive user")]
    InactiveAccount,

    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),
}

/// Issues access tokens for authenticated users.
pub struct SessionIssuer {
    jwt_handler: Arc<JwtHandler>,
    ttl: Duration,
}

impl SessionIssuer {
    /// Create an issuer with the standard 30 minute token lifetime.
    pub fn new(jwt_handler: Arc<JwtHandler>) -> Self {
        Self::with_ttl(jwt_handler, Duration::minutes(ACCESS_TOKEN_EXPIRE_MINUTES))
    }

    pub fn with_ttl(jwt_handler: Arc<JwtHandler>, ttl: Duration) -> Self {
        Self { jwt_handler, ttl }
    }

    /// Issue a bearer token whose subject is the user's username.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(&self, user: &AuthenticatedUser) -> Result<AccessToken, JwtError> {
        let claims = Claims::for_subject(&user.username);
        let access_token = self.jwt_handler.encode(&claims, Some(self.ttl))?;

        tracing::debug!(username = %user.username, "Access token issued");

        Ok(AccessToken::bearer(access_token))
    }
}

/// Resolves bearer tokens back to the accounts they were issued for.
pub struct SessionResolver<D>
where
    D: UserDirectory,
{
    jwt_handler: Arc<JwtHandler>,
    directory: Arc<D>,
}

impl<D> SessionResolver<D>
where
    D: UserDirectory,
{
    pub fn new(jwt_handler: Arc<JwtHandler>, directory: Arc<D>) -> Self {
        Self {
            jwt_handler,
            directory,
        }
    }

    /// Resolve a token to the account named by its subject.
    ///
    /// The returned account may be disabled; see [`Self::resolve_active`].
    ///
    /// # Errors
    /// * `Unauthorized` - Token is invalid or expired, has no subject, or
    ///   the subject is unknown
    /// * `Directory` - Credential lookup failed
    pub fn resolve(&self, token: &str) -> Result<AuthenticatedUser, SessionError> {
        let claims = self.jwt_handler.decode(token).map_err(|e| {
            tracing::warn!(error = %e, "Token validation failed");
            SessionError::Unauthorized
        })?;

        let subject = claims.subject().ok_or_else(|| {
            tracing::warn!("Missing 'sub' claim in token");
            SessionError::Unauthorized
        })?;

        let record = self
            .directory
            .find_by_username(subject)?
            .ok_or_else(|| {
                tracing::warn!(username = subject, "Token subject not found");
                SessionError::Unauthorized
            })?;

        Ok(record.into())
    }

    /// Resolve a token and require the account to be enabled.
    ///
    /// # Errors
    /// * `Unauthorized` - As for [`Self::resolve`]
    /// * `InactiveAccount` - Token is valid but the account is disabled
    /// * `Directory` - Credential lookup failed
    pub fn resolve_active(&self, token: &str) -> Result<AuthenticatedUser, SessionError> {
        let user = self.resolve(token)?;

        if user.disabled {
            tracing::warn!(username = %user.username, "Rejected token for disabled account");
            return Err(SessionError::InactiveAccount);
        }

        Ok(user)
    }
}
