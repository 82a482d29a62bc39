pub mod digest;
pub mod errors;

pub use digest::CredentialHasher;
pub use digest::StoredCredential;
pub use errors::PasswordError;
