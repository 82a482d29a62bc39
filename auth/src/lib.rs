//! Credential and session token library
//!
//! Provides the authentication core shared by services:
//! - Salted credential digests (HMAC-SHA256)
//! - Signed session token issuance and verification (HS256 JWT)
//! - Per-request identity resolution
//!
//! Everything here is synchronous and free of shared mutable state; storage
//! and transport belong to the calling service.
//!
//! # Examples
//!
//! ## Credential Digests
//! ```
//! use auth::CredentialHasher;
//!
//! let hasher = CredentialHasher::new();
//! let stored = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &stored.salt, &stored.digest).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{ExpirationPolicy, TokenIssuer};
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!", ExpirationPolicy::NonExpiring).unwrap();
//! let claims = issuer.claims_for("user123", "ada@x.com");
//! let token = issuer.issue(&claims).unwrap();
//! assert_eq!(issuer.verify(&token).unwrap(), claims);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{AuthorizationContext, Authenticator, ExpirationPolicy};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", ExpirationPolicy::NonExpiring).unwrap();
//!
//! // Register: digest the password under a fresh salt
//! let stored = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue a token
//! let claims = auth.claims_for("user123", "ada@x.com");
//! let result = auth.authenticate("password123", &stored, &claims).unwrap();
//!
//! // Request: resolve the bearer token
//! let context = auth.gate().resolve(Some(&result.access_token));
//! assert_eq!(context, AuthorizationContext::Authenticated(claims));
//! assert_eq!(auth.gate().resolve(None), AuthorizationContext::Unauthenticated);
//! ```

pub mod authenticator;
pub mod gate;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use gate::AuthorizationContext;
pub use gate::AuthorizationGate;
pub use jwt::ConfigurationError;
pub use jwt::ExpirationPolicy;
pub use jwt::SubjectClaims;
pub use jwt::TokenError;
pub use jwt::TokenIssuer;
pub use password::CredentialHasher;
pub use password::PasswordError;
pub use password::StoredCredential;
