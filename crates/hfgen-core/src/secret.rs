//! Type-safe secret handling that prevents accidental exposure
//!
//! [`Secret`] wraps credentials such as the inference API token so they cannot
//! leak through `Debug`, `Display` or serialized log fields.
//!
//! # Examples
//!
//! ```
//! use hfgen_core::SecretString;
//!
//! let token = SecretString::from_string("hf_abc123".to_string());
//!
//! // This is safe - won't leak the secret
//! assert_eq!(format!("{:?}", token), "[REDACTED]");
//!
//! // To use the secret, explicitly expose it
//! let value: &str = token.expose_as_str();
//! assert_eq!(value, "hf_abc123");
//! ```

use serde::{Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A secret value that cannot be accidentally exposed through logging or serialization
///
/// The inner value is zeroed when dropped and can only be read through
/// [`expose_secret()`](Secret::expose_secret).
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Secret<T: Zeroize> {
    inner: T,
}

impl<T: Zeroize> Secret<T> {
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }

    /// Expose the secret value for use
    ///
    /// The exposed value must never be logged or placed in error messages.
    pub fn expose_secret(&self) -> &T {
        &self.inner
    }
}

impl<T: Zeroize> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl<T: Zeroize> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

// Serialize as "[REDACTED]" to prevent secrets in JSON logs
impl<T: Zeroize> Serialize for Secret<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str("[REDACTED]")
    }
}

/// Type alias for String secrets (most common use case)
pub type SecretString = Secret<String>;

impl SecretString {
    pub fn from_string(s: String) -> Self {
        Secret::new(s)
    }

    /// Get the secret as a string slice
    pub fn expose_as_str(&self) -> &str {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_redacted_everywhere() {
        let secret = SecretString::from_string("hf_super_secret".to_string());

        assert_eq!(format!("{:?}", secret), "[REDACTED]");
        assert_eq!(format!("{}", secret), "[REDACTED]");
        assert_eq!(
            serde_json::to_string(&secret).unwrap(),
            "\"[REDACTED]\""
        );
        assert_eq!(secret.expose_as_str(), "hf_super_secret");
    }

    #[test]
    fn test_secret_in_struct_debug() {
        #[derive(Debug)]
        #[allow(dead_code)]
        struct Holder {
            token: SecretString,
        }

        let holder = Holder {
            token: SecretString::from_string("hf_123".to_string()),
        };
        let rendered = format!("{:?}", holder);
        assert!(!rendered.contains("hf_123"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
