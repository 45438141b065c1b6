//! Transparent HTTP response cache for outgoing requests.
//!
//! This crate wraps a network transport with a caching interceptor:
//! requests that opt in (via a `cache: true` header or any non-empty
//! `Cache-Control` header) have their successful response bodies persisted,
//! and when the network later fails the persisted body is replayed as a
//! synthesized response marked with the HTTP/1.0 protocol version.
//!
//! ```no_run
//! use httpstash_client::{CachingInterceptor, Request, ReqwestTransport, TransportConfig};
//! use httpstash_core::{AppConfig, CacheStore};
//! use url::Url;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let store = CacheStore::open(&config.db_path).await?;
//! let transport = ReqwestTransport::new(TransportConfig::from(&config))?;
//! let interceptor = CachingInterceptor::new(transport, store);
//!
//! let request = Request::get(Url::parse("https://api.example.com/v1/geocoding")?)
//!     .header("cache", "true");
//! let response = interceptor.execute(&request).await?;
//!
//! if response.is_replay() {
//!     // served from the cache, not the network
//! }
//! # Ok(())
//! # }
//! ```

pub mod headers;
pub mod intercept;
pub mod policy;
pub mod request;
pub mod response;
pub mod transport;

pub use headers::Headers;
pub use intercept::CachingInterceptor;
pub use request::{Body, Request};
pub use response::Response;
pub use transport::{ReqwestTransport, Transport, TransportConfig, TransportError};
