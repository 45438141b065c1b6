//! Captured response representation.

use crate::headers::Headers;
use reqwest::{StatusCode, Version};

/// An HTTP response with its body already captured as text.
///
/// The transport reads the wire body exactly once; the cache write and the
/// caller both see this single captured value, so a body can never be
/// consumed twice.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    reason: String,
    version: Version,
    headers: Headers,
    body: String,
}

impl Response {
    /// Wrap a live response captured from the network.
    pub fn new(status: StatusCode, version: Version, headers: Headers, body: String) -> Self {
        let reason = status.canonical_reason().unwrap_or("").to_string();
        Self { status, reason, version, headers, body }
    }

    /// Synthesize a cache-replay response.
    ///
    /// Carries status 200, reason "OK", and the HTTP/1.0 protocol marker
    /// that distinguishes replayed payloads from live ones.
    pub fn replay(body: String) -> Self {
        Self {
            status: StatusCode::OK,
            reason: "OK".to_string(),
            version: Version::HTTP_10,
            headers: Headers::new(),
            body,
        }
    }

    /// HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Reason phrase ("OK", "Not Found", ...).
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Protocol version the payload arrived with.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Header map.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// The captured body text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Consume the response, yielding the captured body text.
    pub fn into_body(self) -> String {
        self.body
    }

    /// `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// `true` when this payload was served from the cache rather than the
    /// network.
    ///
    /// The marker is the protocol version, so a genuine HTTP/1.0 upstream
    /// would also read as a replay; live transports here negotiate 1.1 or 2.
    pub fn is_replay(&self) -> bool {
        self.version == Version::HTTP_10
    }
}
