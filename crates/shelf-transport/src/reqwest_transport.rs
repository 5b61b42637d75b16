//! [`Transport`] implementation backed by [`reqwest::Client`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use shelf_protocol::{HttpRequest, HttpResponse, Method, RequestBody, Transport, TransportError};

use crate::HttpTransportConfig;

/// Pooled HTTP transport.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a transport from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidRequest`] if the TLS backend or the
    /// client settings cannot be initialised.
    pub fn new(config: &HttpTransportConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wraps an already configured client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[tracing::instrument(
        name = "shelf.http",
        skip(self, request),
        fields(method = %request.method, uri = %request.uri)
    )]
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), request.uri);

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Raw(bytes) => builder.body(bytes),
            RequestBody::Json(bytes) => builder.header(CONTENT_TYPE, "application/json").body(bytes),
            RequestBody::Multipart(file) => {
                let part = Part::bytes(file.content.to_vec()).file_name(file.filename);
                builder.multipart(Form::new().part(file.field, part))
            }
        };

        let response = builder.send().await.map_err(map_error)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.bytes().await.map_err(map_error)?;

        tracing::debug!(status, bytes = body.len(), "Shelf response received");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Head => reqwest::Method::HEAD,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
    }
}

fn map_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else if error.is_connect() {
        TransportError::Connection(error.to_string())
    } else if error.is_builder() {
        TransportError::InvalidRequest(error.to_string())
    } else {
        TransportError::Other(error.to_string())
    }
}
