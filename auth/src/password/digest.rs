use std::fmt;

use hmac::Hmac;
use hmac::Mac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::errors::PasswordError;

type HmacSha256 = Hmac<Sha256>;

/// Number of random bytes in a freshly generated salt (hex-encoded to 32 chars).
const SALT_BYTES: usize = 16;

/// Salted credential digest implementation.
///
/// Digests are HMAC-SHA256 keyed by the per-user salt, hex-encoded.
/// Stateless: a single instance can be shared across any number of requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialHasher;

/// Digest and salt as persisted for one user.
#[derive(Clone, PartialEq, Eq)]
pub struct StoredCredential {
    pub digest: String,
    pub salt: String,
}

impl fmt::Debug for StoredCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredCredential")
            .field("digest", &self.digest)
            .field("salt", &"<redacted>")
            .finish()
    }
}

impl CredentialHasher {
    /// Create a new credential hasher.
    pub fn new() -> Self {
        Self
    }

    /// Generate a fresh salt from the operating system CSPRNG.
    ///
    /// # Returns
    /// 16 random bytes as a 32 character lowercase hex string
    pub fn generate_salt(&self) -> String {
        let mut bytes = [0u8; SALT_BYTES];
        OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// Derive the digest of a plaintext credential under a salt.
    ///
    /// The salt string is the HMAC key and the plaintext is the message,
    /// so the output matches any other HMAC-SHA256 implementation given
    /// the same UTF-8 inputs.
    ///
    /// # Arguments
    /// * `plaintext` - Plaintext password
    /// * `salt` - Per-user salt
    ///
    /// # Returns
    /// 64 character lowercase hex digest
    ///
    /// # Errors
    /// * `DigestFailed` - MAC could not be keyed
    pub fn derive_digest(&self, plaintext: &str, salt: &str) -> Result<String, PasswordError> {
        let mut mac = HmacSha256::new_from_slice(salt.as_bytes())
            .map_err(|e| PasswordError::DigestFailed(e.to_string()))?;
        mac.update(plaintext.as_bytes());

        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Hash a plaintext password for storage under a new salt.
    ///
    /// # Errors
    /// * `DigestFailed` - MAC could not be keyed
    pub fn hash(&self, plaintext: &str) -> Result<StoredCredential, PasswordError> {
        let salt = self.generate_salt();
        let digest = self.derive_digest(plaintext, &salt)?;

        Ok(StoredCredential { digest, salt })
    }

    /// Verify a plaintext password against a stored digest.
    ///
    /// The comparison is constant-time in the digest contents.
    ///
    /// # Returns
    /// True if the password matches, false otherwise
    ///
    /// # Errors
    /// * `DigestFailed` - MAC could not be keyed
    pub fn verify(
        &self,
        plaintext: &str,
        salt: &str,
        stored_digest: &str,
    ) -> Result<bool, PasswordError> {
        let candidate = self.derive_digest(plaintext, salt)?;

        Ok(candidate.as_bytes().ct_eq(stored_digest.as_bytes()).into())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_derive_digest_matches_hmac_sha256_reference() {
        // RFC 4231, test case 2
        let hasher = CredentialHasher::new();
        let digest = hasher
            .derive_digest("what do ya want for nothing?", "Jefe")
            .expect("Failed to derive digest");

        assert_eq!(
            digest,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_derive_digest_is_deterministic() {
        let hasher = CredentialHasher::new();
        let salt = "00112233445566778899aabbccddeeff";

        let first = hasher.derive_digest("s3cret", salt).unwrap();
        let second = hasher.derive_digest("s3cret", salt).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            first,
            "dc6e4098ec529ea7f8ad846be36d58bd37ec6fb4494a5555836aacca60416c6d"
        );
    }

    #[test]
    fn test_same_password_different_salts() {
        let hasher = CredentialHasher::new();

        let first = hasher.hash("s3cret").unwrap();
        let second = hasher.hash("s3cret").unwrap();

        assert_ne!(first.salt, second.salt);
        assert_ne!(first.digest, second.digest);
    }

    #[test]
    fn test_generate_salt_shape_and_uniqueness() {
        let hasher = CredentialHasher::new();

        let salts: HashSet<String> = (0..256).map(|_| hasher.generate_salt()).collect();
        assert_eq!(salts.len(), 256);

        for salt in &salts {
            assert_eq!(salt.len(), 32);
            assert!(salt.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = CredentialHasher::new();
        let stored = hasher.hash("my_secure_password").unwrap();

        assert_eq!(stored.digest.len(), 64);
        assert!(hasher
            .verify("my_secure_password", &stored.salt, &stored.digest)
            .unwrap());
        assert!(!hasher
            .verify("wrong_password", &stored.salt, &stored.digest)
            .unwrap());
    }

    #[test]
    fn test_verify_rejects_truncated_digest() {
        let hasher = CredentialHasher::new();
        let stored = hasher.hash("password").unwrap();

        assert!(!hasher
            .verify("password", &stored.salt, &stored.digest[..32])
            .unwrap());
        assert!(!hasher.verify("password", &stored.salt, "").unwrap());
    }

    #[test]
    fn test_debug_redacts_salt() {
        let stored = StoredCredential {
            digest: "abc".to_string(),
            salt: "very-secret-salt".to_string(),
        };

        let printed = format!("{:?}", stored);
        assert!(!printed.contains("very-secret-salt"));
    }
}
