use std::sync::Arc;

use crate::jwt::SubjectClaims;
use crate::jwt::TokenIssuer;

/// Identity resolved for a single inbound request.
///
/// Built fresh per request and dropped with it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthorizationContext {
    Authenticated(SubjectClaims),
    #[default]
    Unauthenticated,
}

impl AuthorizationContext {
    pub fn subject(&self) -> Option<&SubjectClaims> {
        match self {
            AuthorizationContext::Authenticated(claims) => Some(claims),
            AuthorizationContext::Unauthenticated => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.subject().is_some()
    }
}

/// Resolves bearer credentials into an [`AuthorizationContext`].
///
/// The gate never rejects a request. A missing or invalid token resolves to
/// `Unauthenticated` and each operation decides whether that is acceptable.
/// Claims are trusted as signed; the subject is not looked up in storage.
#[derive(Debug, Clone)]
pub struct AuthorizationGate {
    issuer: Arc<TokenIssuer>,
}

impl AuthorizationGate {
    pub fn new(issuer: Arc<TokenIssuer>) -> Self {
        Self { issuer }
    }

    /// Resolve the identity behind an optional bearer token.
    ///
    /// # Arguments
    /// * `bearer_token` - Raw token from the request, if any
    ///
    /// # Returns
    /// `Authenticated` with the verified claims, otherwise `Unauthenticated`
    pub fn resolve(&self, bearer_token: Option<&str>) -> AuthorizationContext {
        let Some(token) = bearer_token else {
            return AuthorizationContext::Unauthenticated;
        };

        match self.issuer.verify(token) {
            Ok(claims) => AuthorizationContext::Authenticated(claims),
            Err(e) => {
                tracing::warn!(error = %e, "Bearer token rejected, resolving as unauthenticated");
                AuthorizationContext::Unauthenticated
            }
        }
    }
}
