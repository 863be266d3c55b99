//! Authentication for the Bitbucket Server REST API
//!
//! The server accepts HTTP Basic credentials on every call.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Username/password pair used for Basic authentication
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account username
    pub username: String,
    password: String,
}

impl Credentials {
    /// Create credentials
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Value for the `Authorization` header
    pub fn basic_header(&self) -> String {
        let token = STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {token}")
    }
}

// Keep the password out of debug logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
