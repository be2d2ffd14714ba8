use std::collections::HashSet;
use std::env;

use auth::CredentialRecord;
use auth::JwtHandler;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: String,
    #[serde(default = "default_access_token_expire_minutes")]
    pub access_token_expire_minutes: i64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DirectoryConfig {
    #[serde(default)]
    pub users: Vec<CredentialRecord>,
}

/// Longest accepted access token lifetime: one year.
pub const MAX_ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 60 * 24 * 365;

fn default_access_token_expire_minutes() -> i64 {
    auth::session::ACCESS_TOKEN_EXPIRE_MINUTES
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. `SECRET_KEY` and `ALGORITHM` environment variables
    /// 2. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 3. Environment-specific config file (config/{environment}.toml)
    /// 4. Default config file (config/default.toml)
    ///
    /// The result is validated before it is returned, so a missing secret or
    /// unusable algorithm stops the service at startup.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .set_override_option("jwt.secret", env::var("SECRET_KEY").ok())?
            .set_override_option("jwt.algorithm", env::var("ALGORITHM").ok())?
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Check the values that deserialization alone cannot.
    ///
    /// # Errors
    /// * `Message` - Secret is empty, algorithm is unknown or not HMAC,
    ///   token lifetime is out of range, or a username is listed twice
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.jwt.jwt_handler()?;
        self.jwt.access_token_ttl()?;

        let mut seen = HashSet::new();
        for user in &self.directory.users {
            if !seen.insert(user.username.as_str()) {
                return Err(ConfigError::Message(format!(
                    "directory.users contains duplicate username: {}",
                    user.username
                )));
            }
        }

        Ok(())
    }
}

impl JwtConfig {
    /// Build the token codec described by this section.
    ///
    /// # Errors
    /// * `Message` - Secret is empty or algorithm is not a supported HMAC algorithm
    pub fn jwt_handler(&self) -> Result<JwtHandler, ConfigError> {
        let algorithm = JwtHandler::parse_algorithm(&self.algorithm)
            .map_err(|e| ConfigError::Message(format!("jwt.algorithm: {}", e)))?;

        JwtHandler::new(self.secret.as_bytes(), algorithm)
            .map_err(|e| ConfigError::Message(format!("jwt: {}", e)))
    }

    /// Access token lifetime.
    ///
    /// # Errors
    /// * `Message` - Lifetime is not between one minute and
    ///   [`MAX_ACCESS_TOKEN_EXPIRE_MINUTES`]
    pub fn access_token_ttl(&self) -> Result<Duration, ConfigError> {
        let minutes = self.access_token_expire_minutes;

        if !(1..=MAX_ACCESS_TOKEN_EXPIRE_MINUTES).contains(&minutes) {
            return Err(ConfigError::Message(format!(
                "jwt.access_token_expire_minutes must be between 1 and {}, got {}",
                MAX_ACCESS_TOKEN_EXPIRE_MINUTES, minutes
            )));
        }

        Duration::try_minutes(minutes).ok_or_else(|| {
            ConfigError::Message(format!(
                "jwt.access_token_expire_minutes is out of range: {}",
                minutes
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn parse(toml: &str) -> Result<Config, ConfigError> {
        ConfigBuilder::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    const VALID: &str = r#"
        [server]
        http_port = 8000

        [jwt]
        secret = "test-secret-key-for-jwt-signing-at-least-32-bytes"
        algorithm = "HS256"

        [[directory.users]]
        username = "ehab"
        full_name = "batman"
        email = "e4ehap@gmail.com"
        hashed_password = "$2b$12$4ulnQhnvgnW3kg3PdxbwuunLgngvEvRqwGj0MIST9CHHTWJzxo1yu"
        disabled = false

        [[directory.users]]
        username = "bruce"
        hashed_password = "$2b$12$4ulnQhnvgnW3kg3PdxbwuunLgngvEvRqwGj0MIST9CHHTWJzxo1yu"
        disabled = true
    "#;

    #[test]
    fn test_parse_valid_config() {
        let config = parse(VALID).expect("Failed to parse config");

        assert!(config.validate().is_ok());
        assert_eq!(config.server.http_port, 8000);
        assert_eq!(config.jwt.access_token_expire_minutes, 30);
        assert_eq!(config.jwt.access_token_ttl().unwrap(), Duration::minutes(30));
        assert_eq!(config.directory.users.len(), 2);
        assert_eq!(config.directory.users[0].full_name.as_deref(), Some("batman"));
        assert_eq!(config.directory.users[1].email, None);
        assert!(config.directory.users[1].disabled);
    }

    #[test]
    fn test_missing_secret_is_rejected() {
        let toml = r#"
            [server]
            http_port = 8000

            [jwt]
            algorithm = "HS256"
        "#;

        assert!(parse(toml).is_err());
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        let mut config = parse(VALID).unwrap();
        config.jwt.secret = String::new();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_algorithm_is_rejected() {
        let mut config = parse(VALID).unwrap();
        config.jwt.algorithm = "none".to_string();
        assert!(config.validate().is_err());

        config.jwt.algorithm = "RS256".to_string();
        assert!(config.validate().is_err());

        config.jwt.algorithm = "HS512".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_positive_ttl_is_rejected() {
        let mut config = parse(VALID).unwrap();
        config.jwt.access_token_expire_minutes = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_ttl_is_rejected() {
        let mut config = parse(VALID).unwrap();

        config.jwt.access_token_expire_minutes = 1_000_000_000_000;
        assert!(config.validate().is_err());
        assert!(config.jwt.access_token_ttl().is_err());

        config.jwt.access_token_expire_minutes = i64::MAX;
        assert!(config.validate().is_err());

        config.jwt.access_token_expire_minutes = MAX_ACCESS_TOKEN_EXPIRE_MINUTES;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_duplicate_usernames_are_rejected() {
        let mut config = parse(VALID).unwrap();
        let duplicate = config.directory.users[0].clone();
        config.directory.users.push(duplicate);

        assert!(config.validate().is_err());
    }
}
