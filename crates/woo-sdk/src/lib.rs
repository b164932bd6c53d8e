//! WooCommerce REST API client for Rust.
//!
//! # Example
//!
//! ```rust,ignore
//! use woo_sdk::{Client, Configuration};
//! use serde_json::Value;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Configuration::builder("https://shop.example.com", "ck_xxx", "cs_xxx")
//!         .build()?;
//!     let client = Client::new(config)?;
//!
//!     let products: Value = client
//!         .get_with_query("products", &[("per_page", "10")])
//!         .await?;
//!     println!("{products}");
//!     Ok(())
//! }
//! ```
//!
//! Failed calls return an [`HttpError`]. Match on [`HttpError::kind`] for
//! status-specific handling and use [`HttpError::error_message`] for the
//! API's `{code, message, data}` payload.

mod client;
mod config;
mod error;
mod http;
mod message;
mod oauth;
mod transport;
mod types;

pub use client::Client;
pub use config::{
    Configuration, ConfigurationBuilder, DEFAULT_API_VERSION, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT,
};
pub use error::{
    Error, ErrorKind, HttpError, INVALID_RESPONSE_CODE, INVALID_RESPONSE_MESSAGE,
    UNKNOWN_ERROR_CODE, UNKNOWN_ERROR_MESSAGE,
};
pub use http::{HttpRequest, HttpResponse};
pub use message::ErrorMessage;
pub use oauth::{OAuth1Signer, RequestSigner};
pub use transport::INVALID_JSON_MESSAGE;
pub use types::ApiVersion;

pub use reqwest::{header, Method};
