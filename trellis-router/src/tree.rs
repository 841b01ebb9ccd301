//! Route tree construction and matching
//!
//! The [`RouteTree`] is compiled once from the application's
//! [`RouteRecord`]s and is immutable afterwards:
//!
//! ```rust,ignore
//! let tree = RouteTree::from_route_records(vec![
//!     RouteRecord::new("/users/:id").component(user_page()),
//!     RouteRecord::new("/files/*").component(file_browser()),
//! ])?;
//!
//! let result = tree.match_path("/users/42").flatten_transient_routes();
//! assert_eq!(result.params.get("id").map(String::as_str), Some("42"));
//! ```

mod builder;
mod matched;
mod matcher;
mod node;

pub use matched::{MatchResult, MatchedRoute};
pub use node::RouteNode;

use crate::path::{PathNormalizer, Segment, encode_segment, split_segments};
use crate::config::parse_base_url;
use crate::{RouteRecord, RouterConfig, RouterError, RouterResult};
use std::collections::HashMap;
use url::Url;

/// The compiled, immutable tree of routes.
#[derive(Debug, Clone)]
pub struct RouteTree {
    roots: Vec<RouteNode>,
    base_url: Url,
}

impl RouteTree {
    /// Compile route records using the default base URL.
    pub fn from_route_records(records: Vec<RouteRecord>) -> RouterResult<Self> {
        Self::with_base_url(records, &RouterConfig::default().base_url)
    }

    /// Compile route records, parsing request paths against `base_url`.
    pub fn with_base_url(records: Vec<RouteRecord>, base_url: &str) -> RouterResult<Self> {
        let base_url = parse_base_url(base_url)?;
        let normalizer = PathNormalizer::new()?;
        let roots = builder::build_nodes(&normalizer, records, "/")?;

        let tree = Self { roots, base_url };
        tracing::debug!(routes = tree.len(), "Route tree compiled");
        Ok(tree)
    }

    /// Top-level nodes in priority order.
    pub fn roots(&self) -> &[RouteNode] {
        &self.roots
    }

    /// Full paths of all non-transient nodes, depth-first in declaration order.
    pub fn paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        self.walk(|node| {
            if !node.is_transient() {
                paths.push(node.full_path().to_string());
            }
        });
        paths
    }

    /// Number of non-transient nodes.
    pub fn len(&self) -> usize {
        let mut count = 0;
        self.walk(|node| {
            if !node.is_transient() {
                count += 1;
            }
        });
        count
    }

    /// True when no routes were declared.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Find the first node declared with `name`.
    pub fn find_by_name(&self, name: &str) -> Option<&RouteNode> {
        let mut found = None;
        self.walk(|node| {
            if found.is_none() && node.name() == Some(name) {
                found = Some(node);
            }
        });
        found
    }

    /// Build a concrete path for a named route.
    ///
    /// Dynamic values are percent-encoded so the path matches back to the
    /// same parameters. A wildcard value keeps its `/` separators.
    ///
    /// # Example
    /// ```rust,ignore
    /// let path = tree.reverse("user", &HashMap::from([("id".into(), "42".into())]))?;
    /// assert_eq!(path, "/users/42");
    /// ```
    pub fn reverse(&self, name: &str, params: &HashMap<String, String>) -> RouterResult<String> {
        let node = self
            .find_by_name(name)
            .ok_or_else(|| RouterError::route_not_found(name))?;

        let mut parts = Vec::new();
        for raw in split_segments(node.full_path()) {
            match Segment::parse(raw) {
                Segment::Static(text) => parts.push(encode_segment(&text)),
                Segment::Dynamic(param) => {
                    let value = params.get(&param).ok_or_else(|| {
                        RouterError::invalid_path(format!(
                            "Missing parameter '{}' for route '{}'",
                            param, name
                        ))
                    })?;
                    parts.push(encode_segment(value));
                }
                Segment::Wildcard(param) => {
                    if let Some(rest) = params.get(&param) {
                        parts.extend(split_segments(rest).into_iter().map(encode_segment));
                    }
                }
            }
        }
        Ok(format!("/{}", parts.join("/")))
    }

    fn walk<'a>(&'a self, mut visit: impl FnMut(&'a RouteNode)) {
        for root in &self.roots {
            root.walk(&mut visit);
        }
    }
}
