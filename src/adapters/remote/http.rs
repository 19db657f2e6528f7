//! Shared HTTP client construction for the remote adapters

use crate::domain::{BootstrapError, Result};
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, PRAGMA};
use reqwest::{redirect, Client, ClientBuilder};
use std::time::Duration;

/// Connect timeout applied when none is configured
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Builds a client with a connect timeout, caching disabled and no redirect following
///
/// Only the connect phase is bounded; reads are left unbounded.
pub(crate) fn build_client(connect_timeout: Duration) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

    ClientBuilder::new()
        .connect_timeout(connect_timeout)
        .default_headers(headers)
        .redirect(redirect::Policy::none())
        .user_agent(concat!("emr-bootstrap/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| BootstrapError::Configuration(format!("Failed to build HTTP client: {e}")))
}
