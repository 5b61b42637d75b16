//! Shelf client.
//!
//! This crate sequences the pieces of [`shelf_protocol`] around a
//! [`shelf_protocol::Transport`]: [`RequestDispatcher`] builds and sends
//! authenticated requests, and [`ShelfClient`] wraps it in one method per
//! Shelf operation, classifying and decoding each response.
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** No HTTP client lives here; any
//! [`shelf_protocol::Transport`] implementation (for example
//! `shelf_transport::ReqwestTransport`) is injected at construction.
//!
//! ## Example
//!
//! ```rust,no_run
//! use shelf_client::{ShelfClient, ShelfConfig};
//! use shelf_protocol::{SearchCriteria, ShelfToken, Transport};
//!
//! # async fn example(transport: impl Transport) -> Result<(), shelf_protocol::ShelfError> {
//! let client = ShelfClient::new(ShelfConfig::new(ShelfToken::new("TOKEN")), transport);
//!
//! let links = client
//!     .list_artifact("https://api.shelf.example.net/test/artifact/builds")
//!     .await?;
//! let hits = client
//!     .search(
//!         "https://api.shelf.example.net/test/artifact/",
//!         &SearchCriteria::new().with_filter("artifactName=builds"),
//!     )
//!     .await?;
//! # let _ = (links, hits);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod dispatcher;

#[cfg(test)]
mod testing;

pub use client::{ShelfClient, METADATA_LINK_TITLE};
pub use config::ShelfConfig;
pub use dispatcher::{RequestDispatcher, RequestSpec};
