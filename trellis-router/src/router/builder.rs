//! Router builder

use super::core::{Router, RouterInner};
use super::registry::Registry;
use crate::{
    MemoryHistory, RouteRecord, RouterConfig, RouterResult,
    history::History,
    middleware::{Middleware, MiddlewareOutcome, NavigationContext, from_fn},
    tree::RouteTree,
};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A fluent builder for configuring a [`Router`].
///
/// # Example
/// ```rust,ignore
/// let router = Router::builder()
///     .config(RouterConfig::new().with_max_redirects(3))
///     .route(RouteRecord::new("/").redirect("/home"))
///     .route(RouteRecord::new("/home").component(home_page()))
///     .middleware(|ctx| async move {
///         tracing::info!(to = %ctx.to.path, "navigating");
///         Ok(MiddlewareOutcome::Continue)
///     })
///     .build()?;
/// ```
#[derive(Default)]
pub struct RouterBuilder {
    routes: Vec<RouteRecord>,
    config: RouterConfig,
    history: Option<Arc<dyn History>>,
    middleware: Vec<Arc<dyn Middleware>>,
}

impl RouterBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append route records.
    #[must_use = "This method returns a new RouterBuilder and does not modify self"]
    pub fn routes(mut self, routes: Vec<RouteRecord>) -> Self {
        self.routes.extend(routes);
        self
    }

    /// Append one route record.
    #[must_use = "This method returns a new RouterBuilder and does not modify self"]
    pub fn route(mut self, route: RouteRecord) -> Self {
        self.routes.push(route);
        self
    }

    /// Set the configuration.
    #[must_use = "This method returns a new RouterBuilder and does not modify self"]
    pub fn config(mut self, config: RouterConfig) -> Self {
        self.config = config;
        self
    }

    /// Use `history` as the history platform. Defaults to a
    /// [`MemoryHistory`] starting at `/`.
    #[must_use = "This method returns a new RouterBuilder and does not modify self"]
    pub fn history<H: History + 'static>(mut self, history: Arc<H>) -> Self {
        self.history = Some(history);
        self
    }

    /// Add middleware from an async function.
    ///
    /// Middleware runs in registration order.
    #[must_use = "This method returns a new RouterBuilder and does not modify self"]
    pub fn middleware<F, Fut>(mut self, middleware: F) -> Self
    where
        F: Fn(NavigationContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RouterResult<MiddlewareOutcome>> + Send + 'static,
    {
        self.middleware.push(Arc::new(from_fn(middleware)));
        self
    }

    /// Add a middleware implementation.
    #[must_use = "This method returns a new RouterBuilder and does not modify self"]
    pub fn layer<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    /// Validate the configuration, compile the routes and build the router.
    pub fn build(self) -> RouterResult<Router> {
        self.config.validate()?;
        let tree = RouteTree::with_base_url(self.routes, &self.config.base_url)?;
        let history: Arc<dyn History> = match self.history {
            Some(history) => history,
            None => Arc::new(MemoryHistory::default()),
        };

        tracing::debug!(
            routes = tree.len(),
            middleware = self.middleware.len(),
            max_redirects = self.config.max_redirects,
            "Router built"
        );

        Ok(Router::from_inner(RouterInner {
            tree,
            config: self.config,
            history,
            middleware: self.middleware,
            outlets: RwLock::new(Registry::new()),
            links: RwLock::new(Registry::new()),
            current: RwLock::new(None),
        }))
    }
}
