//! Client configuration.

use crate::types::ApiVersion;
use std::fmt;
use std::time::Duration;

/// Default API version.
pub const DEFAULT_API_VERSION: ApiVersion = ApiVersion::V3;

/// Default `User-Agent` header value.
pub const DEFAULT_USER_AGENT: &str = concat!("woo-sdk/", env!("CARGO_PKG_VERSION"));

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// WooCommerce client configuration.
///
/// Immutable once built. A [`Client`](crate::Client) keeps its own copy for
/// its whole lifetime.
#[derive(Clone, PartialEq, Eq)]
pub struct Configuration {
    pub(crate) base_url: String,
    pub(crate) consumer_key: String,
    pub(crate) consumer_secret: String,
    pub(crate) api_version: ApiVersion,
    pub(crate) user_agent: String,
    pub(crate) timeout: Duration,
}

impl Configuration {
    /// Create a configuration from explicit values.
    ///
    /// No validation is performed; use [`Configuration::builder`] for
    /// defaults and checked construction. A `timeout_seconds` of 0 disables
    /// the request timeout.
    pub fn new(
        base_url: impl Into<String>,
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        api_version: ApiVersion,
        user_agent: impl Into<String>,
        timeout_seconds: u64,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            api_version,
            user_agent: user_agent.into(),
            timeout: Duration::from_secs(timeout_seconds),
        }
    }

    /// Create a new builder with the store URL and REST API credentials.
    pub fn builder(
        base_url: impl Into<String>,
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
    ) -> ConfigurationBuilder {
        ConfigurationBuilder::new(base_url, consumer_key, consumer_secret)
    }

    /// Get the store base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the consumer key.
    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    /// Get the consumer secret.
    pub fn consumer_secret(&self) -> &str {
        &self.consumer_secret
    }

    /// Get the API version.
    pub fn api_version(&self) -> ApiVersion {
        self.api_version
    }

    /// Get the `User-Agent` header value.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Get the request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("base_url", &self.base_url)
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Builder for [`Configuration`].
pub struct ConfigurationBuilder {
    base_url: String,
    consumer_key: String,
    consumer_secret: String,
    api_version: Option<ApiVersion>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl ConfigurationBuilder {
    /// Create a new builder with the store URL and REST API credentials.
    pub fn new(
        base_url: impl Into<String>,
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            api_version: None,
            user_agent: None,
            timeout: None,
        }
    }

    /// Set the API version.
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Set the `User-Agent` header value.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<Configuration, crate::Error> {
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err(crate::Error::Config("base_url cannot be empty".into()));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(crate::Error::Config(format!(
                "base_url must start with http:// or https://, got {base_url}"
            )));
        }
        if self.consumer_key.is_empty() {
            return Err(crate::Error::Config("consumer_key cannot be empty".into()));
        }
        if self.consumer_secret.is_empty() {
            return Err(crate::Error::Config(
                "consumer_secret cannot be empty".into(),
            ));
        }

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(crate::Error::Config("timeout must be positive".into()));
        }

        Ok(Configuration {
            base_url: base_url.to_string(),
            consumer_key: self.consumer_key,
            consumer_secret: self.consumer_secret,
            api_version: self.api_version.unwrap_or(DEFAULT_API_VERSION),
            user_agent: self
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.into()),
            timeout,
        })
    }
}

impl fmt::Debug for ConfigurationBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigurationBuilder")
            .field("base_url", &self.base_url)
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish()
    }
}
