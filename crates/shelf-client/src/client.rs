//! High-level Shelf operations.
//!
//! Each method issues one request through the [`RequestDispatcher`], runs the
//! response through [`classify`], and then decodes it into the shape the
//! endpoint returns:
//!
//! | Endpoint | Decoded as |
//! |----------|------------|
//! | artifact `GET` | raw bytes |
//! | artifact `HEAD`, `_search` | [`Link`]s from the `Link` headers |
//! | `_meta` | bulk [`Metadata`] |
//! | `_meta/{name}` | single [`MetadataProperty`] |
//!
//! Paths may be absolute URIs or, when the client has a host configured,
//! paths relative to it (such as the targets of returned links).

use bytes::Bytes;
use shelf_protocol::{
    classify, decode_bulk, decode_single, encode, filter_by_title, parse_link_headers,
    HttpResponse, Link, Metadata, MetadataProperty, Method, PropertyName, RequestBody,
    ResourceView, SearchCriteria, ShelfError, Transport,
};
use tokio::io::AsyncRead;

use crate::{RequestDispatcher, ShelfConfig};

/// Response header listing related resources.
const LINK_HEADER: &str = "Link";

/// `title` of the link that points at an artifact's own metadata.
pub const METADATA_LINK_TITLE: &str = "metadata";

/// Client for one Shelf deployment.
#[derive(Debug)]
pub struct ShelfClient<T> {
    dispatcher: RequestDispatcher<T>,
}

impl<T: Transport> ShelfClient<T> {
    /// Creates a client.
    pub fn new(config: ShelfConfig, transport: T) -> Self {
        Self {
            dispatcher: RequestDispatcher::new(config, transport),
        }
    }

    /// Returns the underlying dispatcher, for requests not covered here.
    pub fn dispatcher(&self) -> &RequestDispatcher<T> {
        &self.dispatcher
    }

    // ==================== Artifacts ====================

    /// Downloads an artifact's content.
    pub async fn get_artifact(&self, path: &str) -> Result<Bytes, ShelfError> {
        let response = self
            .dispatcher
            .send(Method::Get, path, ResourceView::Artifact, None, RequestBody::Empty)
            .await?;
        Ok(checked(response)?.body)
    }

    /// Lists the links of an artifact path, without its metadata link.
    ///
    /// A successful response with no `Link` header yields an empty list.
    pub async fn list_artifact(&self, path: &str) -> Result<Vec<Link>, ShelfError> {
        let response = self
            .dispatcher
            .send(Method::Head, path, ResourceView::Artifact, None, RequestBody::Empty)
            .await?;
        let links = links_of(&checked(response)?);
        Ok(filter_by_title(&links, METADATA_LINK_TITLE))
    }

    /// Creates or overwrites an artifact from raw bytes.
    pub async fn create_artifact(
        &self,
        path: &str,
        data: impl Into<Bytes>,
    ) -> Result<(), ShelfError> {
        let response = self
            .dispatcher
            .send(
                Method::Post,
                path,
                ResourceView::Artifact,
                None,
                RequestBody::Raw(data.into()),
            )
            .await?;
        checked(response).map(drop)
    }

    /// Creates or overwrites an artifact with a multipart upload of `content`.
    pub async fn upload_artifact<R>(&self, path: &str, content: R) -> Result<(), ShelfError>
    where
        R: AsyncRead + Unpin + Send,
    {
        let response = self.dispatcher.upload(path, content).await?;
        checked(response).map(drop)
    }

    // ==================== Search ====================

    /// Searches beneath `path` and returns the matching links.
    pub async fn search(
        &self,
        path: &str,
        criteria: &SearchCriteria,
    ) -> Result<Vec<Link>, ShelfError> {
        let body = encode(criteria)?;
        let response = self
            .dispatcher
            .send(
                Method::Post,
                path,
                ResourceView::Search,
                None,
                RequestBody::Json(body),
            )
            .await?;
        Ok(links_of(&checked(response)?))
    }

    // ==================== Metadata ====================

    /// Fetches all metadata of an artifact.
    pub async fn get_metadata(&self, path: &str) -> Result<Metadata, ShelfError> {
        let response = self
            .dispatcher
            .send(Method::Get, path, ResourceView::Metadata, None, RequestBody::Empty)
            .await?;
        decode_bulk(&checked(response)?.body)
    }

    /// Fetches one metadata property.
    pub async fn get_metadata_property(
        &self,
        path: &str,
        name: &PropertyName,
    ) -> Result<MetadataProperty, ShelfError> {
        let response = self
            .dispatcher
            .send(
                Method::Get,
                path,
                ResourceView::Metadata,
                Some(name.as_str()),
                RequestBody::Empty,
            )
            .await?;
        decode_single(&checked(response)?.body)
    }

    /// Replaces an artifact's metadata in bulk and returns the stored result.
    pub async fn update_metadata(
        &self,
        path: &str,
        metadata: &Metadata,
    ) -> Result<Metadata, ShelfError> {
        let body = encode(metadata)?;
        let response = self
            .dispatcher
            .send(
                Method::Put,
                path,
                ResourceView::Metadata,
                None,
                RequestBody::Json(body),
            )
            .await?;
        decode_bulk(&checked(response)?.body)
    }

    /// Creates or updates one metadata property.
    ///
    /// The server rejects updates to immutable properties.
    pub async fn update_metadata_property(
        &self,
        path: &str,
        property: &MetadataProperty,
    ) -> Result<MetadataProperty, ShelfError> {
        self.write_property(Method::Put, path, property).await
    }

    /// Creates a metadata property; the server refuses to overwrite an
    /// existing one.
    pub async fn create_metadata_property(
        &self,
        path: &str,
        property: &MetadataProperty,
    ) -> Result<MetadataProperty, ShelfError> {
        self.write_property(Method::Post, path, property).await
    }

    async fn write_property(
        &self,
        method: Method,
        path: &str,
        property: &MetadataProperty,
    ) -> Result<MetadataProperty, ShelfError> {
        let body = encode(property)?;
        let response = self
            .dispatcher
            .send(
                method,
                path,
                ResourceView::Metadata,
                Some(property.name.as_str()),
                RequestBody::Json(body),
            )
            .await?;
        decode_single(&checked(response)?.body)
    }
}

fn checked(response: HttpResponse) -> Result<HttpResponse, ShelfError> {
    classify(response.status, &response.body)?;
    Ok(response)
}

fn links_of(response: &HttpResponse) -> Vec<Link> {
    parse_link_headers(response.header_values(LINK_HEADER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeTransport;
    use shelf_protocol::{metadata_from, ShelfToken};
    use url::Url;

    const ARTIFACT: &str = "https://api.shelf.example.net/test/artifact/test-artifact";
    const ARTIFACT_LINK: &str = r#"</test/artifact/thing>; rel="self"; title="artifact""#;
    const METADATA_LINK: &str = r#"</test/artifact/thing/_meta>; rel="related"; title="metadata""#;
    const PERMISSION_DENIED: &str = r#"{"message":"Permission denied","code":"permission_denied"}"#;
    const BULK_METADATA: &str = r#"{"version":{"value":"1.5","immutable":false},"build":{"value":"10","immutable":false}}"#;

    fn client(transport: FakeTransport) -> ShelfClient<FakeTransport> {
        ShelfClient::new(ShelfConfig::new(ShelfToken::new("VALIDTOKEN")), transport)
    }

    fn name(value: &str) -> PropertyName {
        PropertyName::new(value).unwrap()
    }

    fn sample_metadata() -> Metadata {
        metadata_from([
            MetadataProperty::new(name("version"), "1.5", false),
            MetadataProperty::new(name("build"), "10", false),
        ])
    }

    #[tokio::test]
    async fn test_get_artifact_returns_body() {
        let client = client(
            FakeTransport::new().respond(HttpResponse::new(200).with_body("Simple Text File")),
        );

        let body = client.get_artifact(ARTIFACT).await.unwrap();

        assert_eq!(&body[..], b"Simple Text File");
        let request = &client.dispatcher().transport().requests()[0];
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.uri.as_str(), ARTIFACT);
    }

    #[tokio::test]
    async fn test_get_artifact_classifies_failure() {
        let client = client(
            FakeTransport::new().respond(HttpResponse::new(403).with_body(PERMISSION_DENIED)),
        );

        let err = client.get_artifact(ARTIFACT).await.unwrap_err();

        assert_eq!(err.code(), "permission_denied");
        assert_eq!(err.message(), "Permission denied");
        assert_eq!(err.status(), Some(403));
    }

    #[tokio::test]
    async fn test_list_artifact_hides_metadata_link() {
        let client = client(
            FakeTransport::new().respond(
                HttpResponse::new(204)
                    .with_header("Link", ARTIFACT_LINK)
                    .with_header("Link", METADATA_LINK),
            ),
        );

        let links = client.list_artifact(ARTIFACT).await.unwrap();

        assert_eq!(links, parse_link_headers([ARTIFACT_LINK]));
        assert_eq!(
            client.dispatcher().transport().requests()[0].method,
            Method::Head
        );
    }

    #[tokio::test]
    async fn test_list_artifact_without_links_is_empty() {
        let client = client(FakeTransport::new().respond(HttpResponse::new(204)));
        assert!(client.list_artifact(ARTIFACT).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_artifact_missing_resource() {
        let client = client(FakeTransport::new().respond(HttpResponse::new(404)));

        let err = client.list_artifact(ARTIFACT).await.unwrap_err();
        assert_eq!(err.code(), "resource_not_found");
    }

    #[tokio::test]
    async fn test_create_artifact_posts_raw_bytes() {
        let client = client(FakeTransport::new().respond(HttpResponse::new(201)));

        client
            .create_artifact(ARTIFACT, &b"Simple Text File"[..])
            .await
            .unwrap();

        let request = &client.dispatcher().transport().requests()[0];
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.body, RequestBody::Raw("Simple Text File".into()));
    }

    #[tokio::test]
    async fn test_upload_artifact_reports_server_error() {
        let client = client(FakeTransport::new().respond(HttpResponse::new(503)));

        let err = client
            .upload_artifact(ARTIFACT, &b"data"[..])
            .await
            .unwrap_err();

        assert_eq!(err.code(), "service_unavailable");
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_search_sends_criteria_and_parses_links() {
        let client = client(
            FakeTransport::new().respond(HttpResponse::new(204).with_header("link", ARTIFACT_LINK)),
        );
        let criteria = SearchCriteria::new().with_filter("artifactName=test-artifact");

        let links = client.search(ARTIFACT, &criteria).await.unwrap();

        assert_eq!(links, parse_link_headers([ARTIFACT_LINK]));
        let request = &client.dispatcher().transport().requests()[0];
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.uri.as_str(), format!("{ARTIFACT}/_search"));
        match &request.body {
            RequestBody::Json(body) => {
                let json: serde_json::Value = serde_json::from_slice(body).unwrap();
                assert_eq!(
                    json,
                    serde_json::json!({"search": ["artifactName=test-artifact"], "sort": [], "limit": 0})
                );
            }
            other => panic!("expected a JSON body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_metadata_decodes_bulk() {
        let client = client(
            FakeTransport::new().respond(HttpResponse::new(200).with_body(BULK_METADATA)),
        );

        let metadata = client.get_metadata(ARTIFACT).await.unwrap();

        assert_eq!(metadata, sample_metadata());
        assert_eq!(
            client.dispatcher().transport().requests()[0].uri.as_str(),
            format!("{ARTIFACT}/_meta")
        );
    }

    #[tokio::test]
    async fn test_get_metadata_property() {
        let client = client(FakeTransport::new().respond(
            HttpResponse::new(200).with_body(r#"{"name":"version","value":"1.5","immutable":false}"#),
        ));

        let property = client
            .get_metadata_property(ARTIFACT, &name("version"))
            .await
            .unwrap();

        assert_eq!(property, MetadataProperty::new(name("version"), "1.5", false));
        assert_eq!(
            client.dispatcher().transport().requests()[0].uri.as_str(),
            format!("{ARTIFACT}/_meta/version")
        );
    }

    #[tokio::test]
    async fn test_get_metadata_property_rejects_malformed_body() {
        let client = client(
            FakeTransport::new().respond(HttpResponse::new(200).with_body(r#"{"name":"version"}"#)),
        );

        let err = client
            .get_metadata_property(ARTIFACT, &name("version"))
            .await
            .unwrap_err();
        assert!(matches!(err, ShelfError::Decoding { .. }));
    }

    #[tokio::test]
    async fn test_update_metadata_puts_bulk_map() {
        let client = client(
            FakeTransport::new().respond(HttpResponse::new(201).with_body(BULK_METADATA)),
        );

        let stored = client
            .update_metadata(ARTIFACT, &sample_metadata())
            .await
            .unwrap();

        assert_eq!(stored, sample_metadata());
        let request = &client.dispatcher().transport().requests()[0];
        assert_eq!(request.method, Method::Put);
        match &request.body {
            RequestBody::Json(body) => assert_eq!(decode_bulk(body).unwrap(), sample_metadata()),
            other => panic!("expected a JSON body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_property_writes_use_put_and_post() {
        let stuff = MetadataProperty::new(name("stuff"), "monoamine-oxidase-inhibitor", true);
        let body = String::from_utf8(encode(&stuff).unwrap().to_vec()).unwrap();
        let client = client(
            FakeTransport::new()
                .respond(HttpResponse::new(201).with_body(body.clone()))
                .respond(HttpResponse::new(200).with_body(body)),
        );

        assert_eq!(
            client.update_metadata_property(ARTIFACT, &stuff).await.unwrap(),
            stuff
        );
        assert_eq!(
            client.create_metadata_property(ARTIFACT, &stuff).await.unwrap(),
            stuff
        );

        let requests = client.dispatcher().transport().requests();
        assert_eq!(requests[0].method, Method::Put);
        assert_eq!(requests[1].method, Method::Post);
        for request in &requests {
            assert_eq!(request.uri.as_str(), format!("{ARTIFACT}/_meta/stuff"));
        }
    }

    #[tokio::test]
    async fn test_create_existing_property_is_refused() {
        let client = client(FakeTransport::new().respond(
            HttpResponse::new(403)
                .with_body(r#"{"message":"Cannot update immutable property","code":"forbidden"}"#),
        ));
        let property = MetadataProperty::new(name("version"), "2", false);

        let err = client
            .create_metadata_property(ARTIFACT, &property)
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Cannot update immutable property");
    }

    #[tokio::test]
    async fn test_dot_property_name_never_reaches_artifact() {
        let client = client(FakeTransport::new());
        let parent = MetadataProperty::new(name(".."), "overwrite", false);

        let err = client
            .create_metadata_property(ARTIFACT, &parent)
            .await
            .unwrap_err();
        assert!(matches!(err, ShelfError::InvalidPath { .. }));

        let err = client
            .get_metadata_property(ARTIFACT, &name("../x"))
            .await
            .unwrap_err();
        assert!(matches!(err, ShelfError::InvalidPath { .. }));

        assert!(client.dispatcher().transport().requests().is_empty());
    }

    #[tokio::test]
    async fn test_links_can_be_followed_with_host() {
        let config = ShelfConfig::new(ShelfToken::new("VALIDTOKEN"))
            .with_host(Url::parse("https://api.shelf.example.net/").unwrap());
        let client = ShelfClient::new(
            config,
            FakeTransport::new()
                .respond(HttpResponse::new(204).with_header("Link", ARTIFACT_LINK))
                .respond(HttpResponse::new(200).with_body("contents")),
        );

        let links = client.list_artifact("/test/artifact/").await.unwrap();
        let body = client.get_artifact(links[0].uri()).await.unwrap();

        assert_eq!(&body[..], b"contents");
        let requests = client.dispatcher().transport().requests();
        assert_eq!(
            requests[1].uri.as_str(),
            "https://api.shelf.example.net/test/artifact/thing"
        );
    }
}
