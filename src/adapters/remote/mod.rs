//! Remote seed provider adapter
//!
//! This module provides the outbound side of the bootstrap: a reachability
//! probe, an authenticated fetcher, and the stream type the fetcher hands back.

mod http;
pub mod fetcher;
pub mod probe;
pub mod stream;

pub use fetcher::{encode_credentials, RemoteFetcher};
pub use http::DEFAULT_CONNECT_TIMEOUT;
pub use probe::ReachabilityProber;
pub use stream::ArchiveStream;
