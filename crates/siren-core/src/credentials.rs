//! Login credentials type.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::header::AuthHeader;

/// Login credentials for the dispatch API.
///
/// This type holds the username and password required to authenticate.
///
/// # Security
///
/// The password is never exposed in Debug output to prevent accidental
/// logging.
///
/// # Example
///
/// ```
/// use siren_core::Credentials;
///
/// let creds = Credentials::new("alice", "secret");
/// assert_eq!(creds.username(), "alice");
/// ```
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Derive the Basic authorization header for these credentials.
    ///
    /// The derivation is deterministic: the same username/password pair
    /// always yields the same header value. No nonce, no salt - the header
    /// is exactly `Basic base64(username:password)`, recomputed on every
    /// login attempt.
    pub fn basic_header(&self) -> AuthHeader {
        let encoded = BASE64.encode(format!("{}:{}", self.username, self.password));
        AuthHeader::new(format!("Basic {}", encoded))
    }
}

// Intentionally hide password in Debug output
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

// Clone is intentionally derived to allow credentials to be reused,
// but the type is not Copy to make credential passing explicit.
impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}
