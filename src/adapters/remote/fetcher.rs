//! Authenticated retrieval of seed resources
//!
//! The fetcher POSTs Base64-encoded credentials to the remote server and
//! classifies the outcome so the caller can react differently to a rejected
//! login, a failing server, and a local network problem.

use super::http::{build_client, DEFAULT_CONNECT_TIMEOUT};
use super::stream::ArchiveStream;
use crate::config::SecretString;
use crate::domain::{RemoteEndpoint, RemoteResourceError, Result};
use base64::{engine::general_purpose, Engine as _};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use std::time::Duration;
use url::Url;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Opens authenticated streams against the remote seed provider
#[derive(Debug, Clone)]
pub struct RemoteFetcher {
    client: Client,
}

impl RemoteFetcher {
    /// Create a fetcher with the given connect timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed
    pub fn new(connect_timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(connect_timeout)?,
        })
    }

    /// Create a fetcher with the default 15 second connect timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed
    pub fn with_default_timeout() -> Result<Self> {
        Self::new(DEFAULT_CONNECT_TIMEOUT)
    }

    /// Fetch the resource behind an endpoint
    ///
    /// # Errors
    ///
    /// See [`RemoteFetcher::fetch`].
    pub async fn fetch_endpoint(
        &self,
        endpoint: &RemoteEndpoint,
    ) -> std::result::Result<ArchiveStream, RemoteResourceError> {
        self.fetch(endpoint.url(), endpoint.username(), endpoint.password())
            .await
    }

    /// POST the credentials to `url` and return the response body as a stream
    ///
    /// # Errors
    ///
    /// - [`RemoteResourceError::AuthFailure`] on HTTP 401
    /// - [`RemoteResourceError::RemoteError`] on HTTP 500
    /// - [`RemoteResourceError::TransportFailure`] on a malformed URL, a network
    ///   failure, or any other error status
    ///
    /// # Example
    ///
    /// ```no_run
    /// use emr_bootstrap::adapters::remote::RemoteFetcher;
    /// use emr_bootstrap::config::secret_string;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let fetcher = RemoteFetcher::with_default_timeout()?;
    /// let password = secret_string("pw".to_string());
    /// let stream = fetcher.fetch("https://seed.example.org/modules", "alice", &password).await?;
    /// let body = stream.into_bytes().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn fetch(
        &self,
        url: &str,
        username: &str,
        password: &SecretString,
    ) -> std::result::Result<ArchiveStream, RemoteResourceError> {
        let url = Url::parse(url).map_err(|e| {
            RemoteResourceError::TransportFailure(format!("Malformed URL '{url}': {e}"))
        })?;

        let body = encode_credentials(username, password);

        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| RemoteResourceError::TransportFailure(e.to_string()))?;

        let status = response.status();
        tracing::info!(
            url = %url,
            code = status.as_u16(),
            message = status.canonical_reason().unwrap_or(""),
            "Http response received"
        );

        classify(response)
    }
}

/// Builds the form body `username=<b64>&password=<b64>`
///
/// Both values are standard Base64 over their UTF-8 bytes and are written
/// verbatim, without percent-encoding.
pub fn encode_credentials(username: &str, password: &SecretString) -> String {
    let username = general_purpose::STANDARD.encode(username.as_bytes());
    let password = general_purpose::STANDARD.encode(password.expose_secret().as_bytes());
    format!("username={username}&password={password}")
}

fn classify(
    response: reqwest::Response,
) -> std::result::Result<ArchiveStream, RemoteResourceError> {
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED {
        return Err(RemoteResourceError::AuthFailure(
            "Invalid username or password".to_string(),
        ));
    }

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        return Err(RemoteResourceError::RemoteError(
            "An error occurred on the production server".to_string(),
        ));
    }

    if status.is_client_error() || status.is_server_error() {
        return Err(RemoteResourceError::TransportFailure(format!(
            "Server returned HTTP response code: {}",
            status.as_u16()
        )));
    }

    if status.is_redirection() {
        let location = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        tracing::warn!(
            code = status.as_u16(),
            location = %location,
            "Redirect not followed, returning redirect body as the resource stream"
        );
    }

    Ok(ArchiveStream::from_response(response))
}
