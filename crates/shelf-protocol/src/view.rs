//! Resource views and request URI construction.
//!
//! Every Shelf resource path can be addressed through three views: the
//! artifact content itself, its metadata (`_meta`), and search (`_search`).
//! [`build_uri`] joins a base path with the view suffix and an optional
//! property name using path-segment semantics.

use url::Url;

use crate::ShelfError;

/// The URL-suffix variant a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceView {
    /// The artifact content (no suffix).
    Artifact,
    /// The artifact's metadata (`_meta`).
    Metadata,
    /// Search rooted at the path (`_search`).
    Search,
}

impl ResourceView {
    /// Returns the path suffix appended for this view.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Artifact => "",
            Self::Metadata => "_meta",
            Self::Search => "_search",
        }
    }
}

impl std::fmt::Display for ResourceView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Artifact => "artifact",
            Self::Metadata => "metadata",
            Self::Search => "search",
        };
        f.write_str(name)
    }
}

/// Builds the request URI for `base_path` under `view`.
///
/// `base_path` must be an absolute URI. `property` is appended after the view
/// suffix as exactly one path segment whenever it is given; this function does
/// not police which views accept a property.
///
/// # Errors
///
/// Returns [`ShelfError::InvalidPath`] if `base_path` does not parse, or if
/// `property` is empty, a dot segment, or contains a path separator.
///
/// # Examples
///
/// ```
/// use shelf_protocol::{build_uri, ResourceView};
///
/// let uri = build_uri(
///     "https://host/test/artifact/thing",
///     ResourceView::Metadata,
///     Some("version"),
/// )
/// .unwrap();
/// assert_eq!(uri.as_str(), "https://host/test/artifact/thing/_meta/version");
/// ```
pub fn build_uri(
    base_path: &str,
    view: ResourceView,
    property: Option<&str>,
) -> Result<Url, ShelfError> {
    let base =
        Url::parse(base_path).map_err(|e| ShelfError::invalid_path(base_path, e.to_string()))?;
    join_view(base, view, property)
}

/// Appends the view suffix and property to an already-parsed base URI.
///
/// Dot segments are cleaned in the base path only. The property is pushed as
/// a single percent-encoded segment, so it can never leave the view.
///
/// Used directly when the base has been resolved against a configured host.
pub fn join_view(
    mut base: Url,
    view: ResourceView,
    property: Option<&str>,
) -> Result<Url, ShelfError> {
    if base.cannot_be_a_base() {
        return Err(ShelfError::invalid_path(
            base.as_str(),
            "URI cannot carry a path",
        ));
    }
    if let Some(property) = property {
        check_property(property)?;
    }

    let joined = join_segments([base.path(), view.suffix()]);
    base.set_path(&joined);

    if let Some(property) = property {
        base.path_segments_mut()
            .map_err(|()| ShelfError::invalid_path(property, "URI cannot carry a path"))?
            .pop_if_empty()
            .push(property);
    }
    Ok(base)
}

/// Rejects property values that would not stay one segment below the view.
fn check_property(property: &str) -> Result<(), ShelfError> {
    let reason = match property {
        "" => "property must not be empty",
        "." | ".." => "property must not be a dot segment",
        p if p.contains(['/', '\\']) => "property must be a single path segment",
        _ => return Ok(()),
    };
    Err(ShelfError::invalid_path(property, reason))
}

/// Joins path pieces into one absolute, cleaned path.
///
/// Empty segments collapse, `.` is dropped and `..` removes the preceding
/// segment. The result has a single leading slash and no trailing slash.
fn join_segments<'a>(pieces: impl IntoIterator<Item = &'a str>) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in pieces.into_iter().flat_map(|piece| piece.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    format!("/{}", segments.join("/"))
}
