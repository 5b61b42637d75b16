//! Value types carried in Shelf request and response bodies.
//!
//! These are caller-owned values; [`crate::codec`] only converts them to and
//! from wire JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::PropertyName;

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// A named, string-valued attribute attached to an artifact.
///
/// `immutable` is enforced by the server: a client must not assume it can
/// overwrite a property that was created immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataProperty {
    /// Property name, unique within the artifact's metadata.
    pub name: PropertyName,
    /// Property value.
    pub value: String,
    /// Whether the server refuses later updates to this property.
    pub immutable: bool,
}

impl MetadataProperty {
    /// Creates a property.
    pub fn new(name: PropertyName, value: impl Into<String>, immutable: bool) -> Self {
        Self {
            name,
            value: value.into(),
            immutable,
        }
    }
}

impl std::fmt::Display for MetadataProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.name, self.value)?;
        if self.immutable {
            f.write_str(" (immutable)")?;
        }
        Ok(())
    }
}

/// An artifact's full metadata, keyed by property name.
pub type Metadata = BTreeMap<PropertyName, MetadataProperty>;

/// Collects properties into a [`Metadata`] map keyed by their own names.
pub fn metadata_from(properties: impl IntoIterator<Item = MetadataProperty>) -> Metadata {
    properties
        .into_iter()
        .map(|property| (property.name.clone(), property))
        .collect()
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Search request body, serialised verbatim as `{"search", "sort", "limit"}`.
///
/// Filter and sort expressions use the server's own syntax
/// (e.g. `"artifactName=test-artifact"`, `"version, VERSION, DESC"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Filter expressions, applied in order.
    pub search: Vec<String>,
    /// Sort keys, applied in order.
    pub sort: Vec<String>,
    /// Maximum number of results.
    pub limit: u32,
}

impl SearchCriteria {
    /// Creates empty criteria.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a filter expression.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.search.push(filter.into());
        self
    }

    /// Appends a sort key.
    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort.push(sort.into());
        self
    }

    /// Sets the result limit.
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}
