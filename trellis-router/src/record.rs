//! Declarative route records.

use crate::RouterResult;
use crate::component::{Component, LazyComponent, RouteComponent};
use std::future::Future;

/// A route as declared by the application author.
///
/// A record may carry a component, children, or both. A record with
/// children and a `redirect` acts as an index that forwards to a child.
///
/// # Example
/// ```rust,ignore
/// let routes = vec![
///     RouteRecord::new("/").redirect("/home"),
///     RouteRecord::new("/home").name("home").component(home_page()),
///     RouteRecord::new("/admin")
///         .component(admin_layout())
///         .children(vec![RouteRecord::new("users").component(user_list())]),
/// ];
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteRecord {
    /// Declared path, possibly spanning several segments
    pub path: String,
    /// Optional route name for reverse lookups
    pub name: Option<String>,
    /// Path to forward to once this route is reached
    pub redirect: Option<String>,
    /// Document title applied when this route is the deepest match
    pub title: Option<String>,
    /// How the route renders
    pub component: Option<RouteComponent>,
    /// Nested routes rendered into the next outlet
    pub children: Vec<RouteRecord>,
}

impl RouteRecord {
    /// Create a record for a path.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Set the route name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the redirect target.
    pub fn redirect(mut self, to: impl Into<String>) -> Self {
        self.redirect = Some(to.into());
        self
    }

    /// Set the document title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Render a component directly.
    pub fn component(mut self, component: Component) -> Self {
        self.component = Some(RouteComponent::Direct(component));
        self
    }

    /// Render a component fetched by an async loader.
    pub fn lazy<F, Fut, M>(mut self, loader: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RouterResult<M>> + Send + 'static,
        M: Into<Component> + Send + 'static,
    {
        self.component = Some(RouteComponent::Lazy(LazyComponent::new(loader)));
        self
    }

    /// Set the nested routes.
    pub fn children(mut self, children: Vec<RouteRecord>) -> Self {
        self.children = children;
        self
    }

    /// Append one nested route.
    pub fn child(mut self, child: RouteRecord) -> Self {
        self.children.push(child);
        self
    }
}
