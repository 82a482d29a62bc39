use serde::Deserialize;
use serde::Serialize;

/// Identity claims carried by a session token.
///
/// Serialized field names (`id`, `email`, `iat`, `exp`) are the wire format
/// and must stay stable for previously issued tokens to keep verifying.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubjectClaims {
    /// Subject identity key
    pub id: String,

    /// Subject email
    pub email: String,

    /// Issued at (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration time (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl SubjectClaims {
    /// Create claims for a subject without timestamps.
    pub fn new(id: impl ToString, email: impl ToString) -> Self {
        Self {
            id: id.to_string(),
            email: email.to_string(),
            iat: None,
            exp: None,
        }
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }
}
