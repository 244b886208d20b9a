//! Authorization header value type.

use std::fmt;

/// An opaque `Authorization` header value.
///
/// Holds the exact string carried on authenticated requests. The value
/// embeds the user's credentials, so it is never exposed in Debug output.
///
/// An `AuthHeader` can only be obtained from
/// [`Credentials::basic_header`](crate::Credentials::basic_header); holding
/// one means a login derived it.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthHeader(String);

impl AuthHeader {
    pub(crate) fn new(value: String) -> Self {
        Self(value)
    }

    /// Returns the header value as sent on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Intentionally hide the value in Debug output
impl fmt::Debug for AuthHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AuthHeader").field(&"[REDACTED]").finish()
    }
}
