//! Authentication core.
//!
//! Provides the token lifecycle for a bearer-token service:
//! - Password hashing (Argon2id, with bcrypt verification for legacy hashes)
//! - JWT encoding and validation with a fixed shared secret
//! - A [`UserDirectory`] port for credential lookup
//! - Login ([`Authenticator`]), token issuance ([`SessionIssuer`]) and
//!   token resolution ([`SessionResolver`])
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{Algorithm, Claims, JwtHandler};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!", Algorithm::HS256).unwrap();
//! let token = handler.encode(&Claims::for_subject("user123"), None).unwrap();
//! let decoded = handler.decode(&token).unwrap();
//! assert_eq!(decoded.subject(), Some("user123"));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! use auth::{
//!     Algorithm, Authenticator, CredentialRecord, DirectoryError, JwtHandler, PasswordHasher,
//!     SessionIssuer, SessionResolver, UserDirectory,
//! };
//!
//! struct Users(HashMap<String, CredentialRecord>);
//!
//! impl UserDirectory for Users {
//!     fn find_by_username(&self, username: &str) -> Result<Option<CredentialRecord>, DirectoryError> {
//!         Ok(self.0.get(username).cloned())
//!     }
//! }
//!
//! let record = CredentialRecord {
//!     username: "ehab".to_string(),
//!     full_name: None,
//!     email: None,
//!     hashed_password: PasswordHasher::new().hash("ehab123").unwrap(),
//!     disabled: false,
//! };
//! let directory = Arc::new(Users(HashMap::from([("ehab".to_string(), record)])));
//! let jwt = Arc::new(JwtHandler::new(b"secret_key_at_least_32_bytes_long!", Algorithm::HS256).unwrap());
//!
//! // Login: verify credentials and issue a token
//! let user = Authenticator::new(Arc::clone(&directory)).authenticate("ehab", "ehab123").unwrap();
//! let token = SessionIssuer::new(Arc::clone(&jwt)).issue(&user).unwrap();
//!
//! // Later request: resolve the bearer token
//! let current = SessionResolver::new(jwt, directory).resolve_active(&token.access_token).unwrap();
//! assert_eq!(current.username, "ehab");
//! ```

pub mod authenticator;
pub mod directory;
pub mod jwt;
pub mod password;
pub mod session;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use directory::AuthenticatedUser;
pub use directory::CredentialRecord;
pub use directory::DirectoryError;
pub use directory::UserDirectory;
pub use jwt::Algorithm;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use session::AccessToken;
pub use session::SessionError;
pub use session::SessionIssuer;
pub use session::SessionResolver;
