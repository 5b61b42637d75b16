//! Newtype identifiers and credentials.
//!
//! Property names and auth tokens are both plain strings on the wire. Wrapping
//! them keeps a property name from being passed where a token is expected and
//! lets each type enforce its own invariant (non-empty name, redacted token).

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Property names
// ---------------------------------------------------------------------------

/// The name of a metadata property, unique within one artifact's metadata.
///
/// Always non-empty. Deserialisation rejects the empty string so a decoded
/// [`crate::MetadataProperty`] upholds the same invariant as one built in code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PropertyName(String);

impl PropertyName {
    /// Creates a new property name, returning `None` if the value is empty.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let v = value.into();
        if v.is_empty() {
            None
        } else {
            Some(Self(v))
        }
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PropertyName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for PropertyName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PropertyName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| "property name must not be empty".to_string())
    }
}

impl From<PropertyName> for String {
    fn from(name: PropertyName) -> Self {
        name.0
    }
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// The token sent verbatim in the `Authorization` header of every request.
///
/// `Debug` output is redacted so the token never reaches logs through a
/// derived `Debug` on a containing config struct.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShelfToken(String);

impl ShelfToken {
    /// Wraps a raw token value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw token value.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ShelfToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ShelfToken(<redacted>)")
    }
}
