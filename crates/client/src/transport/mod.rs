//! Network transport behind the interceptor.
//!
//! [`Transport`] is the proceed seam between cache logic and the wire: the
//! interceptor calls it for every live attempt and never talks to the
//! network any other way. [`ReqwestTransport`] is the shipped
//! implementation; tests substitute scripted fakes.

pub mod error;

pub use error::TransportError;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use httpstash_core::AppConfig;

use crate::headers::Headers;
use crate::request::{Body, Request};
use crate::response::Response;

/// A network transport that can perform a request.
///
/// Implementations own connection pooling, TLS, and redirect handling. The
/// body of a returned [`Response`] must be fully read from the wire exactly
/// once, so every downstream consumer shares the captured text.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the request against the network.
    async fn proceed(&self, request: &Request) -> Result<Response, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn proceed(&self, request: &Request) -> Result<Response, TransportError> {
        (**self).proceed(request).await
    }
}

/// Configuration for the reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// User agent string (default: "httpstash/0.1")
    pub user_agent: String,

    /// Request timeout (default: 20s)
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 5)
    pub max_redirects: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            user_agent: "httpstash/0.1".to_string(),
            timeout: Duration::from_millis(20_000),
            max_redirects: 5,
        }
    }
}

impl From<&AppConfig> for TransportConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            timeout: config.timeout(),
            max_redirects: config.max_redirects,
        }
    }
}

/// HTTP transport backed by a shared reqwest client.
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with the given configuration.
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| TransportError::ClientBuild(e.to_string()))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn proceed(&self, request: &Request) -> Result<Response, TransportError> {
        let mut outgoing = self.http.request(request.method().clone(), request.url().clone());

        for (name, value) in request.headers().iter() {
            outgoing = outgoing.header(name, value);
        }

        if let Body::Form(fields) = request.body() {
            outgoing = outgoing.form(fields);
        }

        let upstream = outgoing.send().await.map_err(TransportError::from)?;

        let status = upstream.status();
        let version = upstream.version();
        let mut headers = Headers::new();
        for (name, value) in upstream.headers() {
            headers.insert(name.as_str(), String::from_utf8_lossy(value.as_bytes()));
        }

        // The single read of the wire body.
        let body = upstream.text().await.map_err(TransportError::from)?;

        tracing::debug!("{} {} -> {} ({} bytes)", request.method(), request.url(), status, body.len());

        Ok(Response::new(status, version, headers, body))
    }
}
