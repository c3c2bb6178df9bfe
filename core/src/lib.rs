//! Remote feed loading core.
//!
//! # Overview
//! `RemoteFeedLoader` issues one GET through an injected `HttpClient`, maps
//! the response with `FeedItemMapper`, and reports the outcome once through a
//! callback. `UreqHttpClient` is the bundled network transport; tests and FFI
//! hosts supply their own.
//!
//! # Design
//! - The loader holds only its URL, its client and a liveness token; results
//!   for a dropped loader are discarded.
//! - Callers see two failure kinds: `Connectivity` (no response) and
//!   `InvalidData` (non-200 or undecodable body).
//! - Wire DTOs stay private to the mapper; `FeedItem` has no serde coupling.

pub mod error;
pub mod http;
pub mod loader;
pub mod mapper;
pub mod transport;
pub mod types;

pub use error::{LoadError, TransportError};
pub use http::{Completion, HttpClient, HttpClientResult, HttpRequest, HttpResponse};
pub use loader::{map_client_result, FeedLoader, LoadFeedResult, RemoteFeedLoader};
pub use mapper::FeedItemMapper;
pub use transport::UreqHttpClient;
pub use types::FeedItem;
pub use url::Url;
pub use uuid::Uuid;
