//! Client configuration.
//!
//! A [`ShelfConfig`] is passed to [`crate::ShelfClient::new`] (or
//! [`crate::RequestDispatcher::new`]) and never changes afterwards. Several
//! clients with different hosts or tokens can live in one process.

use serde::{Deserialize, Serialize};
use shelf_protocol::{ResourceView, ShelfError, ShelfToken};
use url::Url;

/// Read-only settings shared by every request a client sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelfConfig {
    /// Root URI that relative resource paths are resolved against
    /// (e.g. `https://api.shelf.example.net/`).
    ///
    /// `None` means every resource path must be an absolute URI.
    #[serde(default)]
    pub host: Option<Url>,

    /// Token sent verbatim as the `Authorization` header.
    pub token: ShelfToken,
}

impl ShelfConfig {
    /// Creates a configuration with no host; resource paths must be absolute.
    pub fn new(token: ShelfToken) -> Self {
        Self { host: None, token }
    }

    /// Sets the host relative resource paths resolve against.
    #[must_use]
    pub fn with_host(mut self, host: Url) -> Self {
        self.host = Some(host);
        self
    }

    /// Resolves `base_path` and builds the request URI for `view`.
    ///
    /// Absolute paths are used as-is. Relative paths, such as the targets of
    /// `Link` entries, are resolved against [`ShelfConfig::host`].
    ///
    /// # Errors
    ///
    /// Returns [`ShelfError::InvalidPath`] if the path does not parse, or is
    /// relative and no host is configured.
    pub fn resolve(
        &self,
        base_path: &str,
        view: ResourceView,
        property: Option<&str>,
    ) -> Result<Url, ShelfError> {
        match &self.host {
            Some(host) => {
                let base = host
                    .join(base_path)
                    .map_err(|e| ShelfError::invalid_path(base_path, e.to_string()))?;
                shelf_protocol::join_view(base, view, property)
            }
            None => shelf_protocol::build_uri(base_path, view, property),
        }
    }
}
