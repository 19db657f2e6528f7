//! Response body exposed as a single-pass byte stream

use futures::TryStreamExt;
use std::fmt;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, AsyncReadExt, ReadBuf};
use tokio_util::io::StreamReader;

/// A readable, non-restartable stream over a remote response body
///
/// The caller owns the stream; dropping it closes the underlying connection.
pub struct ArchiveStream {
    status: u16,
    content_length: Option<u64>,
    reader: Pin<Box<dyn AsyncRead + Send>>,
}

impl ArchiveStream {
    pub(crate) fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let content_length = response.content_length();
        let body = response
            .bytes_stream()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e));

        Self {
            status,
            content_length,
            reader: Box::pin(StreamReader::new(body)),
        }
    }

    /// HTTP status of the response that produced this stream
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Declared body length, if the server sent one
    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    /// Reads the remaining body into memory
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails mid-body
    pub async fn into_bytes(mut self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.read_to_end(&mut buf).await?;
        Ok(buf)
    }
}

impl AsyncRead for ArchiveStream {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        self.reader.as_mut().poll_read(cx, buf)
    }
}

impl fmt::Debug for ArchiveStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveStream")
            .field("status", &self.status)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}
