use std::sync::Arc;

use crate::gate::AuthorizationGate;
use crate::jwt::ConfigurationError;
use crate::jwt::ExpirationPolicy;
use crate::jwt::SubjectClaims;
use crate::jwt::TokenError;
use crate::jwt::TokenIssuer;
use crate::password::CredentialHasher;
use crate::password::PasswordError;
use crate::password::StoredCredential;

/// Authentication coordinator combining credential digests and token issuance.
///
/// Holds no mutable state. Built once at startup and shared behind an `Arc`.
#[derive(Debug)]
pub struct Authenticator {
    hasher: CredentialHasher,
    issuer: Arc<TokenIssuer>,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed session token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `secret` - Secret key for token signing
    /// * `policy` - Lifetime policy for issued tokens
    ///
    /// # Errors
    /// * `MissingSigningKey` - No usable secret was supplied
    pub fn new(secret: &[u8], policy: ExpirationPolicy) -> Result<Self, ConfigurationError> {
        Ok(Self {
            hasher: CredentialHasher::new(),
            issuer: Arc::new(TokenIssuer::new(secret, policy)?),
        })
    }

    /// Hash a password for storage under a fresh salt.
    pub fn hash_password(&self, password: &str) -> Result<StoredCredential, PasswordError> {
        self.hasher.hash(password)
    }

    /// Check a password against a stored credential.
    pub fn verify_password(
        &self,
        password: &str,
        stored: &StoredCredential,
    ) -> Result<bool, PasswordError> {
        self.hasher.verify(password, &stored.salt, &stored.digest)
    }

    /// Verify credentials and issue a token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored` - Stored digest and salt
    /// * `claims` - Claims to encode in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Digest could not be derived
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored: &StoredCredential,
        claims: &SubjectClaims,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.verify_password(password, stored)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issuer.issue(claims)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Build claims for a subject under the configured expiration policy.
    pub fn claims_for(&self, id: impl ToString, email: impl ToString) -> SubjectClaims {
        self.issuer.claims_for(id, email)
    }

    /// Issue a token without password verification.
    pub fn issue_token(&self, claims: &SubjectClaims) -> Result<String, TokenError> {
        self.issuer.issue(claims)
    }

    /// Validate a token and return its claims.
    pub fn validate_token(&self, token: &str) -> Result<SubjectClaims, TokenError> {
        self.issuer.verify(token)
    }

    /// Gate sharing this authenticator's signing key.
    pub fn gate(&self) -> AuthorizationGate {
        AuthorizationGate::new(Arc::clone(&self.issuer))
    }
}
