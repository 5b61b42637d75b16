//! Link header model.
//!
//! Shelf describes related resources (artifact siblings, metadata, search
//! results) through `Link` response headers. [`parse_link_headers`] flattens
//! every entry of every header value into one ordered list of [`Link`]s;
//! [`filter_by_title`] drops entries by their `title` parameter.
//!
//! Entry grammar (RFC 8288, simplified):
//!
//! ```text
//! link-value = "<" URI-Reference ">" *( ";" param )
//! param      = name [ "=" ( token / quoted-string ) ]
//! ```
//!
//! Multiple entries in one header value are comma-separated. Commas and
//! semicolons inside `<...>` or inside quoted strings do not split.

use std::fmt;

/// One entry of a `Link` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    uri: String,
    params: Vec<(String, String)>,
}

impl Link {
    /// Creates a link with no parameters.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            params: Vec::new(),
        }
    }

    /// Appends a parameter. Names are stored lower-cased.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params
            .push((name.into().to_ascii_lowercase(), value.into()));
        self
    }

    /// Returns the target URI exactly as it appeared between `<` and `>`.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Returns the relation type (`rel` parameter), if present.
    pub fn rel(&self) -> Option<&str> {
        self.param("rel")
    }

    /// Returns the `title` parameter, if present.
    pub fn title(&self) -> Option<&str> {
        self.param("title")
    }

    /// Returns the first value of the named parameter (case-insensitive).
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns every parameter in header order.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.uri)?;
        for (name, value) in &self.params {
            write!(f, "; {}=\"", name)?;
            for c in value.chars() {
                if c == '"' || c == '\\' {
                    f.write_str("\\")?;
                }
                write!(f, "{}", c)?;
            }
            f.write_str("\"")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parses every entry of every `Link` header value, preserving source order.
///
/// Entries without a `<uri>` are skipped; parsing never fails.
///
/// # Examples
///
/// ```
/// use shelf_protocol::parse_link_headers;
///
/// let links = parse_link_headers([
///     r#"</a>; rel="self"; title="artifact", </a/_meta>; rel="related"; title="metadata""#,
/// ]);
/// assert_eq!(links.len(), 2);
/// assert_eq!(links[1].title(), Some("metadata"));
/// ```
pub fn parse_link_headers<I, S>(values: I) -> Vec<Link>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut links = Vec::new();
    for value in values {
        for entry in split_top_level(value.as_ref(), ',') {
            match parse_entry(entry) {
                Some(link) => links.push(link),
                None if entry.trim().is_empty() => {}
                None => tracing::debug!(entry, "Skipping malformed link entry"),
            }
        }
    }
    links
}

fn parse_entry(entry: &str) -> Option<Link> {
    let mut pieces = split_top_level(entry, ';').into_iter();
    let target = pieces.next()?.trim();
    let uri = target.strip_prefix('<')?.strip_suffix('>')?;

    let mut link = Link::new(uri.trim());
    for piece in pieces {
        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }
        let (name, value) = match piece.split_once('=') {
            Some((name, value)) => (name.trim(), unquote(value.trim())),
            None => (piece, String::new()),
        };
        if !name.is_empty() {
            link = link.with_param(name, value);
        }
    }
    Some(link)
}

/// Splits on `delimiter` outside of quoted strings and angle brackets.
fn split_top_level(input: &str, delimiter: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut in_angle = false;
    let mut escaped = false;

    for (i, c) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => escaped = true,
            '"' if !in_angle => in_quotes = !in_quotes,
            '<' if !in_quotes => in_angle = true,
            '>' if !in_quotes => in_angle = false,
            c if c == delimiter && !in_quotes && !in_angle => {
                parts.push(&input[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);
    parts
}

fn unquote(value: &str) -> String {
    let Some(inner) = value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return value.to_string();
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Returns the links whose `title` is not `title`, in input order.
///
/// The input is left untouched; every matching entry is removed, including
/// runs of adjacent matches.
pub fn filter_by_title(links: &[Link], title: &str) -> Vec<Link> {
    links
        .iter()
        .filter(|link| link.title() != Some(title))
        .cloned()
        .collect()
}
