//! WooCommerce client implementation.

use crate::config::Configuration;
use crate::error::HttpError;
use crate::oauth::{OAuth1Signer, RequestSigner};
use crate::transport::HttpTransport;
use crate::Error;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// WooCommerce REST API client.
///
/// Every request is signed with two-legged OAuth1 using the configured
/// consumer key and secret. Responses are decoded from JSON into any
/// `DeserializeOwned` type; use [`serde_json::Value`] for an untyped mapping.
///
/// # Example
///
/// ```rust,no_run
/// use woo_sdk::{ApiVersion, Client, Configuration, ErrorKind};
/// use serde_json::{json, Value};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = Configuration::builder("https://shop.example.com", "ck_xxx", "cs_xxx")
///         .api_version(ApiVersion::V3)
///         .build()?;
///     let client = Client::new(config)?;
///
///     let product: Value = client
///         .post("products", &json!({"name": "Hoodie", "regular_price": "45.00"}))
///         .await?;
///
///     match client.get::<Value>("products/999999").await {
///         Err(e) if e.kind() == ErrorKind::NotFound => {
///             println!("missing: {}", e.error_message().message());
///         }
///         other => println!("{other:?}"),
///     }
///
///     let _: Value = client.delete(&format!("products/{}", product["id"])).await?;
///     Ok(())
/// }
/// ```
pub struct Client {
    config: Configuration,
    transport: HttpTransport,
}

impl Client {
    /// Create a client that signs requests with OAuth1.
    pub fn new(config: Configuration) -> Result<Self, Error> {
        let signer = OAuth1Signer::new(config.consumer_key(), config.consumer_secret());
        Self::with_signer(config, signer)
    }

    /// Create a client with a custom request signer.
    pub fn with_signer(
        config: Configuration,
        signer: impl RequestSigner + 'static,
    ) -> Result<Self, Error> {
        let transport = HttpTransport::new(&config, Box::new(signer))?;
        Ok(Self { config, transport })
    }

    /// Get the client configuration.
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Versioned API root that endpoints are joined to.
    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Send a GET request.
    pub async fn get<T>(&self, endpoint: &str) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
    {
        self.transport.send(Method::GET, endpoint, |b| b).await
    }

    /// Send a GET request with query parameters.
    ///
    /// ```rust,no_run
    /// # use woo_sdk::Client;
    /// # async fn example(client: &Client) -> Result<(), woo_sdk::HttpError> {
    /// let orders: serde_json::Value = client
    ///     .get_with_query("orders", &[("status", "processing"), ("per_page", "50")])
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_with_query<T, Q>(&self, endpoint: &str, query: &Q) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.transport
            .send(Method::GET, endpoint, |b| b.query(query))
            .await
    }

    /// Send a POST request with a JSON body.
    pub async fn post<T, B>(&self, endpoint: &str, data: &B) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.transport
            .send(Method::POST, endpoint, |b| b.json(data))
            .await
    }

    /// Send a PUT request with a JSON body.
    pub async fn put<T, B>(&self, endpoint: &str, data: &B) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.transport
            .send(Method::PUT, endpoint, |b| b.json(data))
            .await
    }

    /// Send a DELETE request.
    pub async fn delete<T>(&self, endpoint: &str) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
    {
        self.transport.send(Method::DELETE, endpoint, |b| b).await
    }
}
