use std::fmt;

use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::SubjectClaims;
use super::errors::ConfigurationError;
use super::errors::TokenError;
use super::policy::ExpirationPolicy;

/// Issues and verifies signed session tokens.
///
/// Uses HS256 (HMAC with SHA-256). Signature checks compare in constant time.
/// The same secret signs and verifies for the lifetime of the instance; there is
/// no key rotation.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    policy: ExpirationPolicy,
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("algorithm", &self.algorithm)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Create a new token issuer with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    /// * `policy` - Lifetime policy for issued tokens
    ///
    /// # Errors
    /// * `MissingSigningKey` - Secret is empty or whitespace only
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - There is no fallback key; callers must refuse to start without one
    pub fn new(secret: &[u8], policy: ExpirationPolicy) -> Result<Self, ConfigurationError> {
        if secret.iter().all(u8::is_ascii_whitespace) {
            return Err(ConfigurationError::MissingSigningKey);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            policy,
        })
    }

    /// Build claims for a subject, stamped with the current time.
    ///
    /// Sets `exp` only when the policy is `ExpiresAfter`.
    pub fn claims_for(&self, id: impl ToString, email: impl ToString) -> SubjectClaims {
        let now = Utc::now();
        let claims = SubjectClaims::new(id, email).with_issued_at(now.timestamp());

        match self.policy {
            ExpirationPolicy::NonExpiring => claims,
            ExpirationPolicy::ExpiresAfter(lifetime) => {
                claims.with_expiration((now + lifetime).timestamp())
            }
        }
    }

    /// Sign claims into a compact token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, claims: &SubjectClaims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    /// * `Expired` - The `exp` claim is in the past
    /// * `InvalidToken` - Signature mismatch, malformed structure or undecodable
    ///   segments, or a missing `exp` under an expiring policy
    pub fn verify(&self, token: &str) -> Result<SubjectClaims, TokenError> {
        let token_data =
            decode::<SubjectClaims>(token, &self.decoding_key, &self.validation()).map_err(
                |e| match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::InvalidToken(e.to_string()),
                },
            )?;

        Ok(token_data.claims)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        if self.policy.requires_expiry() {
            validation.set_required_spec_claims(&["exp"]);
        } else {
            validation.required_spec_claims.clear();
        }
        validation
    }
}
