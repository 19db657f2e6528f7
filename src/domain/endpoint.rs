//! Remote seed provider endpoint

use crate::config::SecretString;
use std::fmt;

/// A remote URL together with the credentials used to access it
///
/// Credentials are kept in cleartext form (wrapped in a secret) until the
/// fetcher Base64-encodes them for transmission.
#[derive(Clone)]
pub struct RemoteEndpoint {
    url: String,
    username: String,
    password: SecretString,
}

impl RemoteEndpoint {
    /// Creates a new endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is blank
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: SecretString,
    ) -> Result<Self, String> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err("Remote URL cannot be empty".to_string());
        }
        Ok(Self {
            url,
            username: username.into(),
            password,
        })
    }

    /// The remote URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The username, in cleartext
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The password
    pub fn password(&self) -> &SecretString {
        &self.password
    }
}

impl fmt::Debug for RemoteEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteEndpoint")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    #[test]
    fn test_endpoint_creation() {
        let endpoint =
            RemoteEndpoint::new("http://stub/seed", "alice", secret_string("pw".to_string()))
                .unwrap();
        assert_eq!(endpoint.url(), "http://stub/seed");
        assert_eq!(endpoint.username(), "alice");
    }

    #[test]
    fn test_endpoint_empty_url() {
        let result = RemoteEndpoint::new(" ", "alice", secret_string("pw".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_endpoint_debug_redacts_password() {
        let endpoint = RemoteEndpoint::new(
            "http://stub/seed",
            "alice",
            secret_string("topsecret".to_string()),
        )
        .unwrap();
        assert!(!format!("{endpoint:?}").contains("topsecret"));
    }
}
