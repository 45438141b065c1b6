//! Outgoing request representation.

use crate::headers::Headers;
use reqwest::Method;
use url::Url;

/// Request body shapes the cache understands.
///
/// Only a form-encoded body contributes to the fingerprint; a body in any
/// other shape is treated as an empty parameter list.
#[derive(Debug, Clone, Default)]
pub enum Body {
    /// No body.
    #[default]
    Empty,
    /// Ordered form fields, sent as `application/x-www-form-urlencoded`.
    Form(Vec<(String, String)>),
}

/// An outgoing HTTP request as seen by the interceptor.
///
/// Read-only to the cache core: the interceptor inspects the URL, headers,
/// and form parameters but never mutates a request.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: Url,
    headers: Headers,
    body: Body,
}

impl Request {
    /// Build a GET request for a URL.
    pub fn get(url: Url) -> Self {
        Self { method: Method::GET, url, headers: Headers::new(), body: Body::Empty }
    }

    /// Build a POST request with form fields, preserving field order.
    pub fn post_form<I, K, V>(url: Url, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let fields = fields.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self { method: Method::POST, url, headers: Headers::new(), body: Body::Form(fields) }
    }

    /// Appends a header entry, keeping any earlier entries for the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Request URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Header map.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Request body.
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Form parameters that participate in the cache fingerprint.
    ///
    /// Only a POST carrying a form body yields parameters; any other
    /// method or body shape yields an empty slice.
    pub fn form_params(&self) -> &[(String, String)] {
        match &self.body {
            Body::Form(fields) if self.method == Method::POST => fields,
            _ => &[],
        }
    }
}
