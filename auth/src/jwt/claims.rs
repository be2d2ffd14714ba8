use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

/// JWT claims carried by access tokens.
///
/// `exp`, `iat` and `jti` are filled in by [`JwtHandler::encode`]; callers
/// normally only set the subject and any custom fields.
///
/// [`JwtHandler::encode`]: super::JwtHandler::encode
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (username)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// JWT ID (unique token identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    /// Additional custom fields (flattened into token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims asserting the given subject.
    pub fn for_subject(subject: impl ToString) -> Self {
        Self::new().with_subject(subject)
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Add a custom field.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }

    /// Subject as a string slice, if present and non-empty.
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref().filter(|sub| !sub.is_empty())
    }

    /// Check if token is expired.
    ///
    /// A token is expired from the exact second of its `exp` claim onwards.
    /// Claims without `exp` never count as expired here; the codec rejects
    /// them separately.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(false, |exp| current_timestamp >= exp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_subject() {
        let claims = Claims::for_subject("ehab");
        assert_eq!(claims.subject(), Some("ehab"));
        assert!(claims.exp.is_none());
        assert!(claims.jti.is_none());
    }

    #[test]
    fn test_empty_subject_is_absent() {
        let claims = Claims::for_subject("");
        assert_eq!(claims.subject(), None);
        assert_eq!(Claims::new().subject(), None);
    }

    #[test]
    fn test_builder_pattern() {
        let claims = Claims::new()
            .with_subject("user123")
            .with_expiration(1234567890)
            .with_extra("role", "admin");

        assert_eq!(claims.sub, Some("user123".to_string()));
        assert_eq!(claims.exp, Some(1234567890));
        assert_eq!(claims.extra.get("role").unwrap().as_str(), Some("admin"));
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims::new().with_expiration(1000);

        assert!(!claims.is_expired(999));
        assert!(claims.is_expired(1000));
        assert!(claims.is_expired(1001));
    }

    #[test]
    fn test_is_expired_no_exp_claim() {
        let claims = Claims::new();
        assert!(!claims.is_expired(9999999999));
    }

    #[test]
    fn test_extra_fields_are_flattened() {
        let claims = Claims::for_subject("ehab").with_extra("scope", "me");
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json["sub"], "ehab");
        assert_eq!(json["scope"], "me");
        assert!(json.get("exp").is_none());
    }
}
