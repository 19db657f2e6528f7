//! Reachability probing
//!
//! The installer uses a probe to gate remote work: it needs a yes/no answer,
//! so every failure is logged and folded into `false`.

use super::http::{build_client, DEFAULT_CONNECT_TIMEOUT};
use crate::domain::Result;
use reqwest::Client;
use std::time::Duration;

/// Tests whether a URL can be contacted and its content retrieved
#[derive(Debug, Clone)]
pub struct ReachabilityProber {
    client: Client,
}

impl ReachabilityProber {
    /// Create a prober with the given connect timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed
    pub fn new(connect_timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(connect_timeout)?,
        })
    }

    /// Create a prober with the default 15 second connect timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed
    pub fn with_default_timeout() -> Result<Self> {
        Self::new(DEFAULT_CONNECT_TIMEOUT)
    }

    /// Returns true if a GET against `url` completes and its body can be read
    ///
    /// HTTP status codes are not inspected; only transport viability counts.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use emr_bootstrap::adapters::remote::ReachabilityProber;
    ///
    /// # async fn example() -> emr_bootstrap::domain::Result<()> {
    /// let prober = ReachabilityProber::with_default_timeout()?;
    /// if !prober.probe("https://seed.example.org/").await {
    ///     eprintln!("Seed server unreachable");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn probe(&self, url: &str) -> bool {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(url = %url, error = %e, "Error generated while testing connection");
                return false;
            }
        };

        let status = response.status().as_u16();
        match response.bytes().await {
            Ok(body) => {
                tracing::debug!(
                    url = %url,
                    status = status,
                    bytes = body.len(),
                    "Connection test succeeded"
                );
                true
            }
            Err(e) => {
                tracing::error!(url = %url, error = %e, "Error generated while reading content");
                false
            }
        }
    }
}
