//! Path syntax: normalization, segment classification and request parsing.
//!
//! Route paths use `/literal`, `/:param` and `/*` (or `/*name`) segments.
//! Repeated slashes collapse and a trailing slash is dropped, so `//a///b/`
//! and `/a/b` declare the same route.

use crate::{RouterError, RouterResult};
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use regex::Regex;
use std::borrow::Cow;
use std::fmt;
use url::Url;

/// One classified path segment of a route declaration.
///
/// Classification looks only at the first character: `:` marks a dynamic
/// segment, `*` a wildcard, anything else is a literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Literal text that must match exactly
    Static(String),
    /// Binds one input segment under the given name
    Dynamic(String),
    /// Consumes the rest of the input; binds it when named
    Wildcard(String),
}

impl Segment {
    /// Classify a single segment (without slashes).
    pub fn parse(raw: &str) -> Self {
        if let Some(name) = raw.strip_prefix(':') {
            Self::Dynamic(name.to_string())
        } else if let Some(name) = raw.strip_prefix('*') {
            Self::Wildcard(name.to_string())
        } else {
            Self::Static(raw.to_string())
        }
    }

    /// Returns true for `:name` segments.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic(_))
    }

    /// Returns true for `*` segments.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard(_))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(text) => write!(f, "{}", text),
            Self::Dynamic(name) => write!(f, ":{}", name),
            Self::Wildcard(name) => write!(f, "*{}", name),
        }
    }
}

/// Split a path on `/`, skipping empty segments.
pub fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// The part of a request path before any query or fragment.
pub fn strip_query(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

/// Characters escaped in a single path segment. `/` and `%` are included so
/// an encoded value always stays one segment and decodes back unchanged.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encode a value for use as one path segment.
pub fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}

/// Decode a percent-encoded path segment. Invalid UTF-8 is replaced.
pub fn decode_segment(raw: &str) -> Cow<'_, str> {
    percent_decode_str(raw).decode_utf8_lossy()
}

/// Collapses repeated slashes in declared route paths.
#[derive(Debug, Clone)]
pub struct PathNormalizer {
    repeated_slashes: Regex,
}

impl PathNormalizer {
    /// Compile the collapse pattern.
    pub fn new() -> RouterResult<Self> {
        let repeated_slashes = Regex::new(r"/{2,}")
            .map_err(|e| RouterError::internal("Failed to compile slash pattern").with_cause(e.to_string()))?;
        Ok(Self { repeated_slashes })
    }

    /// Join a parent path and a child declaration into a normalized path.
    ///
    /// The result always starts with `/` and never ends with one unless it
    /// is the root itself.
    pub fn join(&self, parent: &str, child: &str) -> String {
        let joined = format!("/{}/{}", parent, child);
        let collapsed = self.repeated_slashes.replace_all(&joined, "/");
        let trimmed = collapsed.trim_end_matches('/');
        if trimmed.is_empty() {
            "/".to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// Normalize a single declared path.
    pub fn normalize(&self, path: &str) -> String {
        self.join("", path)
    }
}

/// A request path split into pathname and decoded query pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPath {
    /// Percent-encoded pathname, always starting with `/`
    pub pathname: String,
    /// Decoded `key=value` pairs in input order
    pub query: Vec<(String, String)>,
}

impl ParsedPath {
    /// Parse `path` relative to `base`. Only pathname and query are kept.
    pub fn parse(base: &Url, path: &str) -> RouterResult<Self> {
        let url = base.join(path)?;
        Ok(Self {
            pathname: url.path().to_string(),
            query: url
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        })
    }

    /// Non-empty pathname segments.
    pub fn segments(&self) -> Vec<&str> {
        split_segments(&self.pathname)
    }
}
