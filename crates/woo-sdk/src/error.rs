//! Error types for the WooCommerce SDK.
//!
//! [`Error`] covers everything that can go wrong before a request is sent
//! (configuration, transport construction). Every failed API call yields an
//! [`HttpError`] whose [`ErrorKind`] is decided by [`ErrorKind::from_status`]
//! or by the kind of transport failure.

use crate::http::{HttpRequest, HttpResponse};
use crate::message::ErrorMessage;
use reqwest::header::HeaderMap;
use reqwest::Method;
use serde_json::{json, Map, Value};
use std::fmt;
use std::sync::OnceLock;

/// Errors that can occur when setting up the SDK.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The underlying HTTP client could not be built.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A request could not be signed.
    #[error("Signing error: {0}")]
    Signing(String),
}

/// Code used when no response was received.
pub const UNKNOWN_ERROR_CODE: &str = "unknown_error";

/// Message used when no response was received and no message was given.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// Code used when the response body is not a recognizable API error.
pub const INVALID_RESPONSE_CODE: &str = "invalid_response";

/// Message used when the response body is not a recognizable API error.
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid response received from the API";

/// Classification of a failed API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// HTTP 400.
    BadRequest,
    /// HTTP 401.
    Unauthorized,
    /// HTTP 404.
    NotFound,
    /// HTTP 5xx, or a response body that is not valid JSON.
    InternalServerError,
    /// Any other 4xx, network failures and unexpected errors.
    Request,
}

impl ErrorKind {
    /// Classify an HTTP error status.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ErrorKind::BadRequest,
            401 => ErrorKind::Unauthorized,
            404 => ErrorKind::NotFound,
            500..=599 => ErrorKind::InternalServerError,
            _ => ErrorKind::Request,
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "bad request",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::NotFound => "not found",
            ErrorKind::InternalServerError => "internal server error",
            ErrorKind::Request => "request error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A failed API call.
///
/// Carries the request that was sent and, when the server answered, the
/// response that came back. JSON parsing of either body happens on first
/// access and is cached for the lifetime of the error.
#[derive(Debug)]
pub struct HttpError {
    kind: ErrorKind,
    request: HttpRequest,
    response: Option<HttpResponse>,
    message: String,
    source: Option<BoxError>,
    request_data: OnceLock<Option<Value>>,
    response_data: OnceLock<Option<Value>>,
    error_message: OnceLock<ErrorMessage>,
}

impl HttpError {
    /// Create a new error. `message` may be empty.
    pub fn new(
        kind: ErrorKind,
        request: HttpRequest,
        response: Option<HttpResponse>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            request,
            response,
            message: message.into(),
            source: None,
            request_data: OnceLock::new(),
            response_data: OnceLock::new(),
            error_message: OnceLock::new(),
        }
    }

    /// Attach the underlying cause.
    pub fn with_source(
        mut self,
        source: impl Into<BoxError>,
    ) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Classification of the failure.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Message given at construction, possibly empty.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The request that was sent, or a synthesized one when sending failed.
    pub fn request(&self) -> &HttpRequest {
        &self.request
    }

    /// HTTP method of the request.
    pub fn request_method(&self) -> &Method {
        self.request.method()
    }

    /// URI of the request.
    pub fn request_uri(&self) -> &str {
        self.request.uri()
    }

    /// Headers of the request.
    pub fn request_headers(&self) -> &HeaderMap {
        self.request.headers()
    }

    /// The request body decoded as JSON, or `None` if it was empty or not JSON.
    pub fn request_data(&self) -> Option<&Value> {
        self.request_data
            .get_or_init(|| decode_body(self.request.body()))
            .as_ref()
    }

    /// The response, if the server answered.
    pub fn response(&self) -> Option<&HttpResponse> {
        self.response.as_ref()
    }

    /// Whether the server answered.
    pub fn has_response(&self) -> bool {
        self.response.is_some()
    }

    /// HTTP status of the response, if any.
    pub fn response_status_code(&self) -> Option<u16> {
        self.response.as_ref().map(HttpResponse::status)
    }

    /// Response headers, empty when no response was received.
    pub fn response_headers(&self) -> HeaderMap {
        self.response
            .as_ref()
            .map(|r| r.headers().clone())
            .unwrap_or_default()
    }

    /// The response body decoded as JSON, or `None` if there was no response
    /// or the body was not JSON.
    pub fn response_data(&self) -> Option<&Value> {
        self.response_data
            .get_or_init(|| self.response.as_ref().and_then(|r| decode_body(r.body())))
            .as_ref()
    }

    /// The API error payload normalized into an [`ErrorMessage`].
    ///
    /// Falls back to `unknown_error` when there is no response and to
    /// `invalid_response` when the body is not a `{code, message}` object.
    pub fn error_message(&self) -> &ErrorMessage {
        self.error_message.get_or_init(|| self.derive_error_message())
    }

    fn derive_error_message(&self) -> ErrorMessage {
        let Some(response) = &self.response else {
            let message = if self.message.is_empty() {
                UNKNOWN_ERROR_MESSAGE
            } else {
                self.message.as_str()
            };
            return ErrorMessage::new(UNKNOWN_ERROR_CODE, message, status_data(0));
        };

        let payload = self.response_data().and_then(Value::as_object);
        let code = payload.and_then(|p| p.get("code")).and_then(Value::as_str);
        let message = payload.and_then(|p| p.get("message")).and_then(Value::as_str);

        match (code, message) {
            (Some(code), Some(message)) => {
                // An empty `data: []` is how PHP-backed stores encode an empty map.
                let data = match payload.and_then(|p| p.get("data")) {
                    Some(Value::Object(data)) => data.clone(),
                    Some(Value::Array(items)) if items.is_empty() => Map::new(),
                    _ => status_data(response.status()),
                };
                ErrorMessage::new(code, message, data)
            }
            _ => ErrorMessage::new(
                INVALID_RESPONSE_CODE,
                INVALID_RESPONSE_MESSAGE,
                status_data(response.status()),
            ),
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(status) = self.response_status_code() {
            write!(f, " (HTTP {status})")?;
        }
        write!(f, ": {} {}", self.request.method(), self.request.uri())?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for HttpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

fn decode_body(body: &[u8]) -> Option<Value> {
    if body.is_empty() {
        return None;
    }
    serde_json::from_slice(body).ok()
}

fn status_data(status: u16) -> Map<String, Value> {
    let mut data = Map::new();
    data.insert("status".into(), json!(status));
    data
}
