//! Wire protocol for the Shelf artifact-storage service.
//!
//! This crate holds every piece of the request/response translation layer that
//! needs no I/O: request URI construction, `Link` header parsing, response
//! classification, the metadata JSON codec, and the [`Transport`] port that
//! infrastructure crates implement.
//!
//! ## Architectural Layer
//!
//! **Protocol + port definitions.** Orchestration (`shelf-client`) sequences
//! these pieces around a [`Transport`]; infrastructure (`shelf-transport`)
//! supplies the HTTP client.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`view`] | [`ResourceView`] and [`build_uri`] |
//! | [`links`] | [`Link`], [`parse_link_headers`], [`filter_by_title`] |
//! | [`classifier`] | [`classify`] and the status-code fallback table |
//! | [`codec`] | [`encode`], [`decode_single`], [`decode_bulk`] |
//! | [`types`] | [`MetadataProperty`], [`Metadata`], [`SearchCriteria`] |
//! | [`identifiers`] | [`PropertyName`], [`ShelfToken`] |
//! | [`errors`] | [`ShelfError`], [`TransportError`] |
//! | [`transport`] | [`Transport`] port and exchange values |

pub mod classifier;
pub mod codec;
pub mod errors;
pub mod identifiers;
pub mod links;
pub mod transport;
pub mod types;
pub mod view;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use classifier::{classify, fallback_code, is_success, FALLBACK_MESSAGE};
pub use codec::{decode_bulk, decode_single, encode};
pub use errors::{ShelfError, TransportError};
pub use identifiers::{PropertyName, ShelfToken};
pub use links::{filter_by_title, parse_link_headers, Link};
pub use transport::{FilePart, HttpRequest, HttpResponse, Method, RequestBody, Transport};
pub use types::{metadata_from, Metadata, MetadataProperty, SearchCriteria};
pub use view::{build_uri, join_view, ResourceView};
