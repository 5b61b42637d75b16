//! Request dispatch.
//!
//! [`RequestDispatcher`] turns a [`RequestSpec`] into an authenticated
//! [`HttpRequest`], runs it through the [`Transport`], and hands back the raw
//! [`HttpResponse`]. It never classifies or decodes: that is the job of the
//! operation that issued the request (see [`crate::ShelfClient`]).

use shelf_protocol::{
    FilePart, HttpRequest, HttpResponse, Method, RequestBody, ResourceView, ShelfError, Transport,
};
use tokio::io::{AsyncRead, AsyncReadExt};
use url::Url;

use crate::ShelfConfig;

/// Header carrying the raw Shelf token.
const AUTHORIZATION: &str = "Authorization";

/// Form field name Shelf expects for uploaded artifact content.
const UPLOAD_FIELD: &str = "file";

// ---------------------------------------------------------------------------
// Request description
// ---------------------------------------------------------------------------

/// Everything needed to issue one Shelf request.
///
/// Built once and consumed by [`RequestDispatcher::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    method: Method,
    base_path: String,
    view: ResourceView,
    property: Option<String>,
    body: RequestBody,
}

impl RequestSpec {
    /// Creates a bodiless request for `base_path` under `view`.
    pub fn new(method: Method, base_path: impl Into<String>, view: ResourceView) -> Self {
        Self {
            method,
            base_path: base_path.into(),
            view,
            property: None,
            body: RequestBody::Empty,
        }
    }

    /// Appends a property segment after the view suffix.
    #[must_use]
    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Returns the request method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Returns the resource path as supplied.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the targeted view.
    pub fn view(&self) -> ResourceView {
        self.view
    }

    /// Returns the property segment, if any.
    pub fn property(&self) -> Option<&str> {
        self.property.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Builds, authenticates and executes Shelf requests.
///
/// Holds only read-only configuration, so one dispatcher can serve any number
/// of concurrent calls when `T` can.
#[derive(Debug)]
pub struct RequestDispatcher<T> {
    config: ShelfConfig,
    transport: T,
}

impl<T: Transport> RequestDispatcher<T> {
    /// Creates a dispatcher.
    pub fn new(config: ShelfConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ShelfConfig {
        &self.config
    }

    /// Returns the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Executes `spec` and returns the raw response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfError::InvalidPath`] if the URI cannot be built and
    /// [`ShelfError::Transport`] if no response was received. Neither is
    /// classified.
    #[tracing::instrument(
        name = "shelf.dispatch",
        skip(self, spec),
        fields(method = %spec.method, view = %spec.view)
    )]
    pub async fn dispatch(&self, spec: RequestSpec) -> Result<HttpResponse, ShelfError> {
        let RequestSpec {
            method,
            base_path,
            view,
            property,
            body,
        } = spec;

        let uri = self.config.resolve(&base_path, view, property.as_deref())?;
        tracing::debug!(uri = %uri, "Dispatching Shelf request");

        let mut request = HttpRequest::new(method, uri);
        request.headers.push((
            AUTHORIZATION.to_string(),
            self.config.token.expose().to_string(),
        ));
        request.body = body;

        let response = self.transport.execute(request).await?;
        tracing::debug!(status = response.status, "Shelf exchange complete");
        Ok(response)
    }

    /// Convenience form of [`RequestDispatcher::dispatch`].
    pub async fn send(
        &self,
        method: Method,
        base_path: &str,
        view: ResourceView,
        property: Option<&str>,
        body: RequestBody,
    ) -> Result<HttpResponse, ShelfError> {
        let mut spec = RequestSpec::new(method, base_path, view).with_body(body);
        if let Some(property) = property {
            spec = spec.with_property(property);
        }
        self.dispatch(spec).await
    }

    /// Uploads `content` to `base_path` as a multipart form.
    ///
    /// The content is read to completion and sent as the `file` part, named
    /// after the last path segment of `base_path`, in a `POST` to the artifact
    /// view.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfError::Encoding`] if reading `content` fails and
    /// [`ShelfError::InvalidPath`] if `base_path` has no final segment, in
    /// addition to the errors of [`RequestDispatcher::dispatch`].
    pub async fn upload<R>(&self, base_path: &str, mut content: R) -> Result<HttpResponse, ShelfError>
    where
        R: AsyncRead + Unpin + Send,
    {
        let uri = self
            .config
            .resolve(base_path, ResourceView::Artifact, None)?;
        let filename = file_name(&uri)
            .ok_or_else(|| ShelfError::invalid_path(base_path, "upload path has no file name"))?;

        let mut buffer = Vec::new();
        content
            .read_to_end(&mut buffer)
            .await
            .map_err(|e| ShelfError::encoding(format!("failed to read upload content: {}", e)))?;

        let spec = RequestSpec::new(Method::Post, base_path, ResourceView::Artifact).with_body(
            RequestBody::Multipart(FilePart {
                field: UPLOAD_FIELD.to_string(),
                filename,
                content: buffer.into(),
            }),
        );
        self.dispatch(spec).await
    }
}

/// Returns the last non-empty path segment of `uri`, percent-encoded as on the wire.
fn file_name(uri: &Url) -> Option<String> {
    uri.path_segments()?
        .next_back()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}
