//! Transport configuration.

use serde::{Deserialize, Serialize};

/// Settings for [`crate::ReqwestTransport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpTransportConfig {
    /// Whole-request timeout in seconds. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,

    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            timeout_secs: Some(30),
            user_agent: concat!("shelf-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
