//! Route tree nodes.

use crate::component::RouteComponent;
use crate::path::Segment;

/// One compiled path segment of the route tree.
///
/// Nodes are built once by [`RouteTree`](super::RouteTree) and never mutated
/// afterwards; matching reads them without writing any scratch state.
#[derive(Debug, Clone)]
pub struct RouteNode {
    pub(super) full_path: String,
    pub(super) segment: Option<Segment>,
    pub(super) name: Option<String>,
    pub(super) title: Option<String>,
    pub(super) redirect: Option<String>,
    pub(super) component: Option<RouteComponent>,
    pub(super) is_transient: bool,
    pub(super) children: Vec<RouteNode>,
}

impl RouteNode {
    /// Absolute path from the root, with `:name` and `*` placeholders.
    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    /// The node's own segment; `None` for `/` and index routes.
    pub fn segment(&self) -> Option<&Segment> {
        self.segment.as_ref()
    }

    /// Route name, if declared.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Document title, if declared.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Redirect target, if declared.
    pub fn redirect(&self) -> Option<&str> {
        self.redirect.as_deref()
    }

    /// Rendering handle, if declared.
    pub fn component(&self) -> Option<&RouteComponent> {
        self.component.as_ref()
    }

    /// True when the segment is `:name`.
    pub fn is_dynamic(&self) -> bool {
        self.segment.as_ref().is_some_and(Segment::is_dynamic)
    }

    /// True when the segment is `*` or `*name`.
    pub fn is_wildcard(&self) -> bool {
        self.segment.as_ref().is_some_and(Segment::is_wildcard)
    }

    /// True for intermediate nodes synthesized from a multi-segment path.
    /// They never terminate a match.
    pub fn is_transient(&self) -> bool {
        self.is_transient
    }

    /// Child nodes in priority order.
    pub fn children(&self) -> &[RouteNode] {
        &self.children
    }

    /// Visit this node and its descendants depth-first, in declaration order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a RouteNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}
