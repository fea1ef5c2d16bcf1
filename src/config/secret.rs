//! Secure credential handling using the secrecy crate
//!
//! The Sailthru shared secret signs every request, so it lives in memory for
//! the whole run. Wrapping it in `Secret` zeroes it on drop, keeps it out of
//! `Debug` output (and therefore out of logs), and forces an explicit
//! `expose_secret()` at the single place it is used: request signing.
//!
//! # Example
//!
//! ```rust
//! use sluice::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let api_secret = secret_string("shared-secret".to_string());
//! assert_eq!(api_secret.expose_secret().as_ref(), "shared-secret");
//!
//! // Debug output is redacted
//! assert!(!format!("{api_secret:?}").contains("shared-secret"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Newtype wrapper for String that implements the required traits for Secret
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    /// Check if the secret value is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Type alias for a secret string
pub type SecretString = Secret<SecretValue>;

/// Helper function to create a SecretString from a String
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_secret_string_creation() {
        let secret = secret_string("api-secret".to_string());
        assert_eq!(secret.expose_secret(), "api-secret");
        assert!(!secret.expose_secret().is_empty());
    }

    #[test]
    fn test_secret_debug_redacted() {
        let secret = secret_string("sensitive-data".to_string());
        let debug_output = format!("{secret:?}");

        assert!(!debug_output.contains("sensitive-data"));
        assert!(debug_output.contains("REDACTED") || debug_output.contains("Secret"));
    }

    #[test]
    fn test_secret_deserializes_from_toml() {
        #[derive(Deserialize)]
        struct Credentials {
            api_secret: SecretString,
        }

        let parsed: Credentials = toml::from_str("api_secret = \"s3cr3t\"").unwrap();
        assert_eq!(parsed.api_secret.expose_secret().as_ref(), "s3cr3t");
    }
}
