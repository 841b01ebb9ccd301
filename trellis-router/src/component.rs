//! Component factory contract consumed from the component system.
//!
//! A route either carries a [`Component`] directly or a [`LazyComponent`]
//! whose loader is awaited the first time the route renders. The choice is
//! made when the route is declared ([`RouteComponent`]), so resolved modules
//! never need to be inspected at runtime.

use crate::{RouterResult, View};
use futures::FutureExt;
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;
use uuid::Uuid;

/// Stable identity of a component factory, usable as a map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(Uuid);

impl ComponentId {
    fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Props passed to a component when an outlet renders it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteProps {
    /// The path being loaded
    pub path: String,
    /// Dynamic parameters bound along the matched chain
    pub params: HashMap<String, String>,
    /// Decoded query pairs
    pub query: Vec<(String, String)>,
}

impl RouteProps {
    /// Get a bound parameter by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

type RenderFn = Arc<dyn Fn(&RouteProps) -> View + Send + Sync>;

/// A component factory with a stable identity.
///
/// Clones share the identity, so an outlet can tell whether it already
/// shows the same factory.
///
/// # Example
/// ```rust,ignore
/// let user = Component::new("UserPage", |props: &RouteProps| {
///     View::text(format!("User {}", props.param("id").unwrap_or("?")))
/// });
/// ```
#[derive(Clone)]
pub struct Component {
    id: ComponentId,
    name: String,
    render: RenderFn,
}

impl Component {
    /// Create a component from a render function.
    pub fn new<F>(name: impl Into<String>, render: F) -> Self
    where
        F: Fn(&RouteProps) -> View + Send + Sync + 'static,
    {
        Self {
            id: ComponentId::generate(),
            name: name.into(),
            render: Arc::new(render),
        }
    }

    /// The stable identity of this factory.
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// The display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render with the given props.
    pub fn render(&self, props: &RouteProps) -> View {
        (self.render)(props)
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Component {}

/// A module whose default export is a component.
pub struct Module {
    /// The default export
    pub default: Component,
}

impl From<Module> for Component {
    fn from(module: Module) -> Self {
        module.default
    }
}

type LoaderFn = Arc<dyn Fn() -> BoxFuture<'static, RouterResult<Component>> + Send + Sync>;

/// A component fetched on demand.
///
/// The loader runs when the route first renders. A successful result is
/// cached; a failure is returned to the caller and the next render tries
/// again.
#[derive(Clone)]
pub struct LazyComponent {
    loader: LoaderFn,
    loaded: Arc<OnceCell<Component>>,
}

impl LazyComponent {
    /// Wrap an async loader.
    ///
    /// # Example
    /// ```rust,ignore
    /// let settings = LazyComponent::new(|| async {
    ///     Ok(Module { default: settings_page() })
    /// });
    /// ```
    pub fn new<F, Fut, M>(loader: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RouterResult<M>> + Send + 'static,
        M: Into<Component> + Send + 'static,
    {
        Self {
            loader: Arc::new(move || {
                let fut = loader();
                async move { fut.await.map(Into::into) }.boxed()
            }),
            loaded: Arc::new(OnceCell::new()),
        }
    }

    /// Returns true once the loader has resolved successfully.
    pub fn is_loaded(&self) -> bool {
        self.loaded.initialized()
    }

    /// Resolve the component, running the loader if needed.
    pub async fn load(&self) -> RouterResult<Component> {
        let component = self
            .loaded
            .get_or_try_init(|| (self.loader)())
            .await?;
        Ok(component.clone())
    }
}

impl fmt::Debug for LazyComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyComponent")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

/// How a route provides its component.
#[derive(Debug, Clone)]
pub enum RouteComponent {
    /// Available synchronously
    Direct(Component),
    /// Fetched through an async loader
    Lazy(LazyComponent),
}

impl RouteComponent {
    /// Returns true for lazy routes.
    pub fn is_lazy(&self) -> bool {
        matches!(self, Self::Lazy(_))
    }

    /// Resolve to a component, awaiting the loader of a lazy route.
    pub async fn resolve(&self) -> RouterResult<Component> {
        match self {
            Self::Direct(component) => Ok(component.clone()),
            Self::Lazy(lazy) => lazy.load().await,
        }
    }
}

impl From<Component> for RouteComponent {
    fn from(component: Component) -> Self {
        Self::Direct(component)
    }
}

impl From<LazyComponent> for RouteComponent {
    fn from(lazy: LazyComponent) -> Self {
        Self::Lazy(lazy)
    }
}
