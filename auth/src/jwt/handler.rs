use std::str::FromStr;

use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use uuid::Uuid;

use super::claims::Claims;
use super::errors::JwtError;

/// Token lifetime used when the caller does not supply one.
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 15;

/// JWT token handler for encoding and decoding tokens.
///
/// Holds the shared secret and signing algorithm. Both are fixed at
/// construction; the handler is immutable afterwards and safe to share
/// across threads.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler.
    ///
    /// # Arguments
    /// * `secret` - Shared secret used to sign and verify tokens
    /// * `algorithm` - HMAC algorithm (HS256, HS384 or HS512)
    ///
    /// # Errors
    /// * `InvalidKey` - Secret is empty
    /// * `UnsupportedAlgorithm` - Algorithm is not a shared-secret algorithm
    ///
    /// # Security Notes
    /// - The secret should be at least as long as the hash output (32 bytes for HS256)
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8], algorithm: Algorithm) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::InvalidKey("secret must not be empty".to_string()));
        }

        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(JwtError::UnsupportedAlgorithm(format!("{:?}", algorithm)));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
        })
    }

    /// Parse an algorithm identifier such as `"HS256"`.
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - Unknown identifier
    pub fn parse_algorithm(name: &str) -> Result<Algorithm, JwtError> {
        Algorithm::from_str(name.trim())
            .map_err(|_| JwtError::UnsupportedAlgorithm(name.to_string()))
    }

    /// Encode claims into a signed, expiring JWT.
    ///
    /// Works on a copy of `claims`: `exp` becomes now + `ttl`, `iat` becomes
    /// now, and a random `jti` is added if none is set.
    ///
    /// # Arguments
    /// * `claims` - Claims to encode
    /// * `ttl` - Token lifetime, [`DEFAULT_TOKEN_TTL_MINUTES`] when `None`
    ///
    /// # Returns
    /// JWT token string
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed or `now + ttl` is out of range
    pub fn encode(&self, claims: &Claims, ttl: Option<Duration>) -> Result<String, JwtError> {
        let now = Utc::now();
        let ttl = ttl.unwrap_or_else(|| Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES));

        let expiration = now.checked_add_signed(ttl).ok_or_else(|| {
            JwtError::EncodingFailed("token lifetime overflows the expiry timestamp".to_string())
        })?;

        let mut to_encode = claims.clone();
        to_encode.exp = Some(expiration.timestamp());
        to_encode.iat = Some(now.timestamp());
        if to_encode.jti.is_none() {
            to_encode.jti = Some(Uuid::new_v4().to_string());
        }

        let header = Header::new(self.algorithm);

        encode(&header, &to_encode, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a JWT token.
    ///
    /// Signature, structure and expiry are checked together; no claims are
    /// returned unless all of them pass.
    ///
    /// # Errors
    /// * `TokenExpired` - Current time is at or past the `exp` claim
    /// * `InvalidToken` - Signature, algorithm or structure is invalid, or `exp` is missing
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                    _ => JwtError::InvalidToken(e.to_string()),
                }
            })?;

        // The library still accepts a token in its exact expiry second.
        if token_data.claims.is_expired(Utc::now().timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(token_data.claims)
    }
}
