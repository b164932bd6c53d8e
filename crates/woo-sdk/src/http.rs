//! Snapshots of the HTTP exchange attached to errors.
//!
//! Response bodies can only be read from the transport once, so the
//! transport captures method, URI, headers and body bytes into these plain
//! values at the failure site. Everything derived later (parsed JSON, error
//! messages) works from the captured bytes.

use reqwest::header::HeaderMap;
use reqwest::Method;

/// An outgoing request as it was sent.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    method: Method,
    uri: String,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl HttpRequest {
    /// Create a request snapshot with no headers and an empty body.
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    /// Attach headers.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Attach a body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Capture a built reqwest request. Streaming bodies are recorded as empty.
    pub(crate) fn capture(request: &reqwest::Request) -> Self {
        let body = request
            .body()
            .and_then(|b| b.as_bytes())
            .map(<[u8]>::to_vec)
            .unwrap_or_default();

        Self {
            method: request.method().clone(),
            uri: request.url().to_string(),
            headers: request.headers().clone(),
            body,
        }
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Full request URI.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Request headers, including defaults and the signature.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw request body, empty when none was sent.
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// A response as it was received.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: u16,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl HttpResponse {
    /// Create a response snapshot with no headers and an empty body.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    /// Attach headers.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Attach a body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw response body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
