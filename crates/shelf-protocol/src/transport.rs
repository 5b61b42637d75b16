//! The transport port.
//!
//! [`Transport`] is implemented by infrastructure crates (see
//! `shelf-transport` for the reqwest-backed implementation). The request and
//! response values crossing the port are transport-neutral so the dispatcher
//! and its tests never see a concrete HTTP client.
//!
//! Deadlines, connection pooling and TLS are the implementation's business;
//! one call to [`Transport::execute`] is one HTTP exchange.

use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

use crate::TransportError;

/// HTTP methods used by the Shelf API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `HEAD`
    Head,
    /// `POST`
    Post,
    /// `PUT`
    Put,
}

impl Method {
    /// Returns the method name as sent on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file carried as one part of a `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Form field name.
    pub field: String,
    /// File name reported in the part's `Content-Disposition`.
    pub filename: String,
    /// File content.
    pub content: Bytes,
}

/// Request payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// Opaque bytes, sent without a content type.
    Raw(Bytes),
    /// A JSON document, sent as `application/json`.
    Json(Bytes),
    /// A single-file `multipart/form-data` form.
    Multipart(FilePart),
}

/// One outgoing HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Request method.
    pub method: Method,
    /// Fully resolved request URI.
    pub uri: Url,
    /// Header name/value pairs, in insertion order.
    pub headers: Vec<(String, String)>,
    /// Request payload.
    pub body: RequestBody,
}

impl HttpRequest {
    /// Creates a request with no headers and no body.
    pub fn new(method: Method, uri: Url) -> Self {
        Self {
            method,
            uri,
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    /// Returns the first value of the named header (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// One HTTP response, fully buffered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Header name/value pairs in wire order; repeated headers appear once per value.
    pub headers: Vec<(String, String)>,
    /// Response body; empty for `HEAD` and bodiless responses.
    pub body: Bytes,
}

impl HttpResponse {
    /// Creates a response with the given status, no headers and an empty body.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }

    /// Appends a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Replaces the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Returns every value of the named header (case-insensitive), in order.
    pub fn header_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Executes one HTTP exchange.
///
/// Implementations must be safe to call concurrently from many tasks and
/// must return a response for every status code: classifying 4xx/5xx is the
/// caller's job, not the transport's.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and buffers the full response.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request).await
    }
}
