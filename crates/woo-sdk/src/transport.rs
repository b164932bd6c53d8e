//! HTTP transport for the WooCommerce REST API.

use crate::config::Configuration;
use crate::error::{ErrorKind, HttpError};
use crate::http::{HttpRequest, HttpResponse};
use crate::oauth::RequestSigner;
use crate::Error;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument, warn};

/// Message attached when a response body cannot be decoded.
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON response";

/// Signs, sends and classifies requests against one store.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    default_headers: HeaderMap,
    signer: Box<dyn RequestSigner>,
}

impl HttpTransport {
    /// Create a new HTTP transport.
    pub fn new(config: &Configuration, signer: Box<dyn RequestSigner>) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder();
        // Zero means no timeout.
        if !config.timeout().is_zero() {
            builder = builder.timeout(config.timeout());
        }
        let client = builder.build()?;

        let base_url = format!(
            "{}/{}",
            config.base_url().trim_end_matches('/'),
            config.api_version().path()
        );

        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_str(config.user_agent())
                .map_err(|e| Error::Config(format!("invalid user agent: {e}")))?,
        );
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self {
            client,
            base_url,
            default_headers,
            signer,
        })
    }

    /// Versioned API root, e.g. `https://shop.example.com/wp-json/wc/v3`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Send one request and decode its JSON body.
    ///
    /// `prepare` adds the query string or body to the request before the
    /// default headers are applied and the request is signed.
    #[instrument(skip(self, prepare))]
    pub async fn send<T, F>(&self, method: Method, endpoint: &str, prepare: F) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = self.endpoint_url(endpoint);

        let mut request = prepare(self.client.request(method.clone(), &url))
            .build()
            .map_err(|e| unexpected(&method, endpoint, e))?;

        for (name, value) in &self.default_headers {
            request
                .headers_mut()
                .entry(name)
                .or_insert_with(|| value.clone());
        }

        self.signer
            .sign(&mut request)
            .map_err(|e| unexpected(&method, endpoint, e))?;

        let sent = HttpRequest::capture(&request);

        debug!(url = %url, "sending request");

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| transport_failure(&method, endpoint, e))?;

        let status = response.status();
        let headers = response.headers().clone();
        let status_error = response.error_for_status_ref().err().map(|e| e.to_string());
        let body = response
            .bytes()
            .await
            .map_err(|e| transport_failure(&method, endpoint, e))?;

        let received = HttpResponse::new(status.as_u16())
            .with_headers(headers)
            .with_body(body.to_vec());

        if status.is_client_error() || status.is_server_error() {
            let kind = ErrorKind::from_status(status.as_u16());
            let message = match kind {
                ErrorKind::Request => status_error.unwrap_or_default(),
                _ => String::new(),
            };

            warn!(status = %status, kind = %kind, "API request failed");
            return Err(HttpError::new(kind, sent, Some(received), message));
        }

        let decoded = serde_json::from_slice::<T>(received.body());
        match decoded {
            Ok(value) => {
                debug!(status = %status, "request succeeded");
                Ok(value)
            }
            Err(e) => {
                warn!(status = %status, error = %e, "response body is not valid JSON");
                Err(HttpError::new(
                    ErrorKind::InternalServerError,
                    sent,
                    Some(received),
                    INVALID_JSON_MESSAGE,
                )
                .with_source(e))
            }
        }
    }
}

/// No response was received: connection refused, DNS failure, timeout or a
/// body that could not be read.
fn transport_failure(method: &Method, endpoint: &str, e: reqwest::Error) -> HttpError {
    if e.is_builder() {
        return unexpected(method, endpoint, e);
    }

    error!(error = %e, timeout = e.is_timeout(), connect = e.is_connect(), "request failed");
    HttpError::new(
        ErrorKind::Request,
        HttpRequest::new(method.clone(), endpoint),
        None,
        format!("Request failed: {e}"),
    )
    .with_source(e)
}

fn unexpected<E>(method: &Method, endpoint: &str, e: E) -> HttpError
where
    E: std::error::Error + Send + Sync + 'static,
{
    error!(error = %e, "unexpected error while dispatching request");
    HttpError::new(
        ErrorKind::Request,
        HttpRequest::new(method.clone(), endpoint),
        None,
        format!("Unexpected error: {e}"),
    )
    .with_source(e)
}
