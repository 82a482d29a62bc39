use chrono::Duration;

use super::errors::ConfigurationError;

/// Lifetime policy applied to issued tokens.
///
/// `NonExpiring` tokens stay valid until the signing key changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpirationPolicy {
    #[default]
    NonExpiring,
    ExpiresAfter(Duration),
}

impl ExpirationPolicy {
    /// Build a policy from an optional lifetime in hours.
    ///
    /// # Errors
    /// * `InvalidExpiration` - Lifetime is zero or negative
    pub fn from_hours(hours: Option<i64>) -> Result<Self, ConfigurationError> {
        match hours {
            None => Ok(Self::NonExpiring),
            Some(h) if h > 0 => Ok(Self::ExpiresAfter(Duration::hours(h))),
            Some(h) => Err(ConfigurationError::InvalidExpiration(h)),
        }
    }

    pub fn requires_expiry(&self) -> bool {
        matches!(self, Self::ExpiresAfter(_))
    }
}
