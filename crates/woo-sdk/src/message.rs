//! Normalized API error payload.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Error payload returned by the WooCommerce API, normalized into one shape.
///
/// Obtained from [`HttpError::error_message`](crate::HttpError::error_message).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorMessage {
    code: String,
    message: String,
    #[serde(default)]
    data: Map<String, Value>,
}

impl ErrorMessage {
    /// Create a new error message.
    pub fn new(code: impl Into<String>, message: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            data,
        }
    }

    /// Machine-readable error code, e.g. `woocommerce_rest_product_invalid_id`.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Additional structured data, usually at least `{"status": <code>}`.
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }
}
