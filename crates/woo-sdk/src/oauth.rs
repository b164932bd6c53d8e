//! Request signing.
//!
//! The transport hands every outgoing request to a [`RequestSigner`] right
//! before it is sent. [`OAuth1Signer`] applies two-legged OAuth 1.0a
//! (consumer key and secret, no token) with HMAC-SHA1 through the
//! `oauth1-request` crate, which is what the WooCommerce REST API expects
//! over plain HTTP.

use crate::Error;
use oauth1_request as oauth;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Method, Url};
use std::fmt;
use std::num::NonZeroU64;

/// Signs an outgoing request in place.
pub trait RequestSigner: Send + Sync {
    /// Add authentication to `request`, usually an `Authorization` header.
    fn sign(&self, request: &mut reqwest::Request) -> Result<(), Error>;
}

impl<F> RequestSigner for F
where
    F: Fn(&mut reqwest::Request) -> Result<(), Error> + Send + Sync,
{
    fn sign(&self, request: &mut reqwest::Request) -> Result<(), Error> {
        self(request)
    }
}

/// Two-legged OAuth 1.0a HMAC-SHA1 signer.
#[derive(Clone)]
pub struct OAuth1Signer {
    consumer_key: String,
    consumer_secret: String,
}

impl OAuth1Signer {
    /// Create a signer from REST API credentials.
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        }
    }

    /// Build the `Authorization` header value for a request.
    ///
    /// `None` lets the OAuth library generate a fresh nonce and use the
    /// current time.
    pub fn authorization(
        &self,
        method: &Method,
        url: &Url,
        nonce: Option<&str>,
        timestamp: Option<NonZeroU64>,
    ) -> String {
        // Query pairs are signed as request parameters, not as part of the URI.
        let mut endpoint = url.clone();
        endpoint.set_query(None);
        endpoint.set_fragment(None);

        let mut params: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        params.sort();

        let client = oauth::Credentials::new(self.consumer_key.as_str(), self.consumer_secret.as_str());
        let mut builder = oauth::Builder::<_, _>::new(client, oauth::HMAC_SHA1);
        builder.nonce(nonce).timestamp(timestamp).version(true);

        builder.authorize(
            method.as_str(),
            endpoint.as_str(),
            &oauth::ParameterList::new(params),
        )
    }
}

impl RequestSigner for OAuth1Signer {
    fn sign(&self, request: &mut reqwest::Request) -> Result<(), Error> {
        let header = self.authorization(request.method(), request.url(), None, None);
        let value = HeaderValue::from_str(&header).map_err(|e| Error::Signing(e.to_string()))?;
        request.headers_mut().insert(AUTHORIZATION, value);

        Ok(())
    }
}

impl fmt::Debug for OAuth1Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuth1Signer")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONCE: &str = "abc123";

    fn signer() -> OAuth1Signer {
        OAuth1Signer::new("ck_test", "cs_test")
    }

    fn timestamp() -> Option<NonZeroU64> {
        NonZeroU64::new(1_700_000_000)
    }

    fn field<'a>(header: &'a str, name: &str) -> Option<&'a str> {
        let prefix = format!("{name}=\"");
        header
            .trim_start_matches("OAuth ")
            .split(',')
            .map(str::trim)
            .find_map(|f| f.strip_prefix(prefix.as_str()))
            .and_then(|v| v.strip_suffix('"'))
    }

    fn signature_for(method: Method, url: &str) -> String {
        let url = Url::parse(url).unwrap();
        let header = signer().authorization(&method, &url, Some(NONCE), timestamp());
        field(&header, "oauth_signature").unwrap().to_string()
    }

    #[test]
    fn test_known_signatures() {
        // percent-encoded base64
        assert_eq!(
            signature_for(
                Method::GET,
                "https://example.com/wp-json/wc/v3/products?per_page=10&status=publish"
            ),
            "vDTAGaJqJjO54cXtivP%2BStJgoOY%3D"
        );
        assert_eq!(
            signature_for(Method::POST, "https://example.com/wp-json/wc/v3/products"),
            "03LQ9CJFg8w3cGN8ORR0DKqXJv4%3D"
        );
    }

    #[test]
    fn test_query_order_does_not_change_signature() {
        assert_eq!(
            signature_for(
                Method::GET,
                "https://example.com/wp-json/wc/v3/products?status=publish&per_page=10"
            ),
            "vDTAGaJqJjO54cXtivP%2BStJgoOY%3D"
        );
    }

    #[test]
    fn test_form_encoded_query_is_decoded_before_signing() {
        assert_eq!(
            signature_for(
                Method::GET,
                "https://example.com/wp-json/wc/v3/products?search=blue+hoodie"
            ),
            "tPdzpbiqkp2o5gnpicxD1GsKmC0%3D"
        );
    }

    #[test]
    fn test_default_port_does_not_change_signature() {
        assert_eq!(
            signature_for(Method::POST, "https://example.com:443/wp-json/wc/v3/products"),
            signature_for(Method::POST, "https://example.com/wp-json/wc/v3/products"),
        );
    }

    #[test]
    fn test_authorization_header_fields() {
        let url = Url::parse("https://example.com/wp-json/wc/v3/products").unwrap();
        let header = signer().authorization(&Method::DELETE, &url, Some("n0nce"), timestamp());

        assert!(header.starts_with("OAuth "));
        assert_eq!(field(&header, "oauth_consumer_key"), Some("ck_test"));
        assert_eq!(field(&header, "oauth_nonce"), Some("n0nce"));
        assert_eq!(field(&header, "oauth_signature_method"), Some("HMAC-SHA1"));
        assert_eq!(field(&header, "oauth_timestamp"), Some("1700000000"));
        assert_eq!(field(&header, "oauth_version"), Some("1.0"));
        assert_eq!(field(&header, "oauth_token"), None);
    }

    #[test]
    fn test_generated_nonces_differ() {
        let url = Url::parse("https://example.com/wp-json/wc/v3/products").unwrap();
        let first = signer().authorization(&Method::GET, &url, None, None);
        let second = signer().authorization(&Method::GET, &url, None, None);

        assert!(field(&first, "oauth_nonce").is_some());
        assert!(field(&first, "oauth_timestamp").is_some());
        assert_ne!(field(&first, "oauth_nonce"), field(&second, "oauth_nonce"));
    }

    #[test]
    fn test_sign_sets_authorization_header() {
        let mut request = reqwest::Client::new()
            .get("https://example.com/wp-json/wc/v3/orders")
            .build()
            .unwrap();

        signer().sign(&mut request).unwrap();

        let value = request.headers().get(AUTHORIZATION).unwrap();
        assert!(value.to_str().unwrap().starts_with("OAuth "));
        assert_eq!(request.url().query(), None);
    }

    #[test]
    fn test_closure_signer() {
        let custom = |request: &mut reqwest::Request| -> Result<(), Error> {
            request
                .headers_mut()
                .insert(AUTHORIZATION, HeaderValue::from_static("Bearer test"));
            Ok(())
        };
        let mut request = reqwest::Client::new()
            .get("https://example.com/")
            .build()
            .unwrap();

        RequestSigner::sign(&custom, &mut request).unwrap();

        assert_eq!(request.headers()[AUTHORIZATION], "Bearer test");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", OAuth1Signer::new("ck_test", "cs_hidden"));
        assert!(!rendered.contains("cs_hidden"));
    }
}
