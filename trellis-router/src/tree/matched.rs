//! Match results.

use super::node::RouteNode;
use crate::component::RouteComponent;
use std::collections::HashMap;

/// Snapshot of one node on the active chain.
///
/// The `child` link turns the active chain into a linked list running from
/// the root to the deepest matched node.
#[derive(Debug, Clone)]
pub struct MatchedRoute {
    /// Declared full path with placeholders
    pub full_path: String,
    /// Concrete path prefix this node matched, parameters substituted
    pub resolved_path: String,
    /// Route name
    pub name: Option<String>,
    /// Document title
    pub title: Option<String>,
    /// Redirect target
    pub redirect: Option<String>,
    /// Rendering handle
    pub component: Option<RouteComponent>,
    /// Segment is `:name`
    pub is_dynamic: bool,
    /// Segment is `*`
    pub is_wildcard: bool,
    /// Synthesized intermediate node
    pub is_transient: bool,
    /// Next node on the active chain
    pub child: Option<Box<MatchedRoute>>,
}

impl MatchedRoute {
    pub(super) fn snapshot(
        node: &RouteNode,
        resolved_path: String,
        child: Option<Box<MatchedRoute>>,
    ) -> Self {
        Self {
            full_path: node.full_path.clone(),
            resolved_path,
            name: node.name.clone(),
            title: node.title.clone(),
            redirect: node.redirect.clone(),
            component: node.component.clone(),
            is_dynamic: node.is_dynamic(),
            is_wildcard: node.is_wildcard(),
            is_transient: node.is_transient,
            child,
        }
    }

    /// Iterate from this node down the chain.
    pub fn iter(&self) -> impl Iterator<Item = &MatchedRoute> {
        std::iter::successors(Some(self), |route| route.child.as_deref())
    }

    /// The deepest node of the chain.
    pub fn leaf(&self) -> &MatchedRoute {
        let mut current = self;
        while let Some(child) = current.child.as_deref() {
            current = child;
        }
        current
    }

    /// Number of nodes from here to the leaf.
    pub fn depth(&self) -> usize {
        self.iter().count()
    }
}

/// Outcome of matching one path against the route tree.
#[derive(Debug, Clone, Default)]
pub struct MatchResult {
    /// The path as requested
    pub path: String,
    /// Decoded query pairs
    pub search_query_params: Vec<(String, String)>,
    /// Parameters bound along the active chain
    pub params: HashMap<String, String>,
    /// The active chain, `None` when nothing matched
    pub sub_tree: Option<MatchedRoute>,
}

impl MatchResult {
    /// A result that matched nothing.
    pub fn empty(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// True when a route matched.
    pub fn is_match(&self) -> bool {
        self.sub_tree.is_some()
    }

    /// Iterate the active chain from the root.
    pub fn chain(&self) -> impl Iterator<Item = &MatchedRoute> {
        self.sub_tree.iter().flat_map(MatchedRoute::iter)
    }

    /// The deepest matched node.
    pub fn leaf(&self) -> Option<&MatchedRoute> {
        self.sub_tree.as_ref().map(MatchedRoute::leaf)
    }

    /// Number of nodes on the active chain.
    pub fn depth(&self) -> usize {
        self.chain().count()
    }

    /// Remove transient nodes from the active chain.
    ///
    /// Must run before the chain is handed to outlets: transient nodes only
    /// give multi-segment paths their tree shape.
    pub fn flatten_transient_routes(mut self) -> Self {
        self.sub_tree = self.sub_tree.take().and_then(flatten);
        self
    }
}

fn flatten(mut route: MatchedRoute) -> Option<MatchedRoute> {
    let child = route.child.take().and_then(|child| flatten(*child));
    if route.is_transient {
        child
    } else {
        route.child = child.map(Box::new);
        Some(route)
    }
}
