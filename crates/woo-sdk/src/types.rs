//! API version values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// WooCommerce REST API version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    V1,
    V2,
    #[default]
    V3,
}

impl ApiVersion {
    /// URL path segment appended to the store's base URL.
    pub fn path(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "wp-json/wc/v1",
            ApiVersion::V2 => "wp-json/wc/v2",
            ApiVersion::V3 => "wp-json/wc/v3",
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for ApiVersion {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v1" | "wp-json/wc/v1" => Ok(ApiVersion::V1),
            "v2" | "wp-json/wc/v2" => Ok(ApiVersion::V2),
            "v3" | "wp-json/wc/v3" => Ok(ApiVersion::V3),
            other => Err(crate::Error::Config(format!(
                "unknown API version: {other}"
            ))),
        }
    }
}
