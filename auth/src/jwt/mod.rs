pub mod claims;
pub mod errors;
pub mod issuer;
pub mod policy;

pub use claims::SubjectClaims;
pub use errors::ConfigurationError;
pub use errors::TokenError;
pub use issuer::TokenIssuer;
pub use policy::ExpirationPolicy;
