//! Shelf HTTP transport adapter.
//!
//! Implements the [`shelf_protocol::Transport`] trait over `reqwest`.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Connection pooling and TLS live here, as does
//! multipart framing. The `shelf-client` crate sees only
//! [`shelf_protocol::Transport`].
//!
//! ## Behaviour
//!
//! - Every status code is returned as a response; classification happens in
//!   the caller.
//! - Repeated response headers (notably `Link`) are preserved one entry per
//!   value, in wire order.
//! - Request deadlines come from [`HttpTransportConfig::timeout_secs`];
//!   dropping the returned future cancels the exchange.

pub mod config;
mod reqwest_transport;

pub use config::HttpTransportConfig;
pub use reqwest_transport::ReqwestTransport;
