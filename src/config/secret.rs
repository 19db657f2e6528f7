//! Secure credential handling using the secrecy crate
//!
//! Remote and database passwords are held in [`SecretString`] values. The
//! memory is zeroed on drop, `Debug` output is redacted, and reading the
//! value requires an explicit `expose_secret()` call.
//!
//! # Example
//!
//! ```rust
//! use emr_bootstrap::config::{SecretString, SecretValue};
//! use secrecy::{Secret, ExposeSecret};
//!
//! let password: SecretString = Secret::new(SecretValue::from("my-password".to_string()));
//! let password_str = password.expose_secret();
//!
//! // Debug output is redacted
//! println!("{:?}", password);
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Newtype wrapper for String that implements the required traits for Secret
#[derive(Clone, Zeroize)]
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

impl std::fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
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

    /// The value as text, for handing to an external program
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The raw bytes, used when the value has to be encoded for transmission
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
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
///
/// # Example
///
/// ```rust
/// use emr_bootstrap::config::secret_string;
///
/// let password = secret_string("my-password".to_string());
/// ```
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}
