//! Core router implementation
//!
//! This module contains the [`Router`] type and its navigation protocol.

use super::{
    builder::RouterBuilder,
    link::LinkHandle,
    outlet::{Commit, OutletHandle, OutletMarker},
    registry::Registry,
};
use crate::{
    RouteRecord, RouterConfig, RouterError, RouterResult, View,
    component::{RouteComponent, RouteProps},
    history::History,
    middleware::{Middleware, MiddlewareOutcome, NavigationContext, RouteData},
    path::strip_query,
    tree::{MatchResult, MatchedRoute, RouteTree},
};
use futures::FutureExt;
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

pub(super) struct RouterInner {
    pub(super) tree: RouteTree,
    pub(super) config: RouterConfig,
    pub(super) history: Arc<dyn History>,
    pub(super) middleware: Vec<Arc<dyn Middleware>>,
    pub(super) outlets: RwLock<Registry<OutletHandle>>,
    pub(super) links: RwLock<Registry<LinkHandle>>,
    pub(super) current: RwLock<Option<RouteData>>,
}

/// The router instance.
///
/// Cloning is cheap and every clone drives the same outlets, links and
/// history. Pass it around explicitly, typically inside an
/// [`AppContext`](crate::AppContext).
///
/// # Example
/// ```rust,ignore
/// let router = Router::builder()
///     .routes(routes())
///     .history(history.clone())
///     .build()?;
///
/// let outlet = router.connect_outlet().await;
/// router.start().await?;
/// router.navigate("/users/42").await?;
/// ```
#[derive(Clone)]
pub struct Router {
    inner: Arc<RouterInner>,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.inner.tree.len())
            .field("middleware", &self.inner.middleware.len())
            .field("config", &self.inner.config)
            .finish()
    }
}

// =============================================================================
// Construction and accessors
// =============================================================================

impl Router {
    pub(super) fn from_inner(inner: RouterInner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Start building a router.
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Build a router over `routes` with default configuration and an
    /// in-memory history.
    pub fn new(routes: Vec<RouteRecord>) -> RouterResult<Self> {
        Self::builder().routes(routes).build()
    }

    /// The compiled route tree.
    pub fn tree(&self) -> &RouteTree {
        &self.inner.tree
    }

    /// The active configuration.
    pub fn config(&self) -> &RouterConfig {
        &self.inner.config
    }

    /// The history platform.
    pub fn history(&self) -> &Arc<dyn History> {
        &self.inner.history
    }

    /// The last committed route.
    pub async fn current_route(&self) -> Option<RouteData> {
        self.inner.current.read().await.clone()
    }

    /// Parameters of the last committed route.
    pub async fn current_params(&self) -> HashMap<String, String> {
        self.inner
            .current
            .read()
            .await
            .as_ref()
            .map(|route| route.params.clone())
            .unwrap_or_default()
    }

    /// Build a concrete path for a named route.
    pub fn reverse(&self, name: &str, params: &HashMap<String, String>) -> RouterResult<String> {
        self.inner.tree.reverse(name, params)
    }

    /// Number of connected outlets.
    pub async fn outlet_count(&self) -> usize {
        self.inner.outlets.read().await.len()
    }

    /// Number of connected links.
    pub async fn link_count(&self) -> usize {
        self.inner.links.read().await.len()
    }
}

// =============================================================================
// Outlets and links
// =============================================================================

impl Router {
    /// Connect a new outlet. Outlets nest in connection order: the first
    /// receives the top-level route, the second its child, and so on.
    pub async fn connect_outlet(&self) -> OutletHandle {
        let outlet = self.inner.outlets.write().await.insert(OutletHandle::new);
        tracing::trace!(outlet = outlet.id(), "Outlet connected");
        outlet
    }

    /// Disconnect an outlet. It is never written again.
    pub async fn disconnect_outlet(&self, outlet: &OutletHandle) {
        self.inner.outlets.write().await.remove(outlet.id());
        outlet.disconnect().await;
        tracing::trace!(outlet = outlet.id(), "Outlet disconnected");
    }

    /// Connect a link to `to`. It starts active when `to` is the current path.
    pub async fn connect_link(&self, to: &str) -> LinkHandle {
        let active = self
            .inner
            .current
            .read()
            .await
            .as_ref()
            .is_some_and(|route| strip_query(&route.path) == to);
        let active_class = &self.inner.config.active_class;
        self.inner
            .links
            .write()
            .await
            .insert(|id| LinkHandle::new(id, to, active_class, active))
    }

    /// Disconnect a link. It no longer tracks navigation.
    pub async fn disconnect_link(&self, link: &LinkHandle) {
        self.inner.links.write().await.remove(link.id());
    }

    /// Navigate to the link's target, as a click would.
    pub async fn follow(&self, link: &LinkHandle) -> RouterResult<bool> {
        self.navigate(link.to()).await
    }
}

// =============================================================================
// Navigation
// =============================================================================

impl Router {
    /// Navigate to `path`.
    ///
    /// Does nothing when `path` is already the history's current pathname.
    /// A history entry is pushed only when the load commits; a load that was
    /// redirected or overtaken by a later navigation reports `false`.
    pub async fn navigate(&self, path: &str) -> RouterResult<bool> {
        if path == self.inner.history.pathname() {
            tracing::trace!(path = %path, "Already at path, skipping navigation");
            return Ok(false);
        }

        let loaded = self.load(path).await?;
        if loaded {
            self.inner.history.push_state(path);
        }
        Ok(loaded)
    }

    /// Render `path` into the connected outlets.
    ///
    /// The path itself is not pushed to history; a redirect target reached
    /// along the way is.
    pub async fn load(&self, path: &str) -> RouterResult<bool> {
        self.load_chain(path.to_string(), 0).await
    }

    /// Go back one history entry. The platform reports the resulting
    /// location through [`handle_popstate`](Self::handle_popstate).
    pub fn back(&self) {
        self.inner.history.back();
    }

    /// Load the history's current location after a back/forward event.
    pub async fn handle_popstate(&self) -> RouterResult<bool> {
        let path = self.inner.history.pathname();
        tracing::trace!(path = %path, "Handling popstate");
        self.load(&path).await
    }

    /// Load the initial location.
    pub async fn start(&self) -> RouterResult<bool> {
        let path = self.inner.history.pathname();
        self.milestone(&path, "Router started");
        self.load(&path).await
    }

    fn load_chain(&self, path: String, redirects: usize) -> BoxFuture<'_, RouterResult<bool>> {
        async move {
            let result = self.inner.tree.match_path(&path).flatten_transient_routes();
            let to = route_data(&result);

            if let Some(target) = self.run_middleware(&to).await? {
                return self.follow_redirect(&path, target, redirects).await;
            }

            let Some(chain) = result.sub_tree.as_ref() else {
                self.render_not_found(&path).await;
                self.commit_route(to, None).await;
                return Ok(true);
            };

            let props = RouteProps {
                path: path.clone(),
                params: result.params.clone(),
                query: result.search_query_params.clone(),
            };

            let mut depth = 0;
            for route in chain.iter() {
                let Some(component) = route.component.as_ref() else {
                    continue;
                };
                let level = depth;
                depth += 1;

                // Re-read per level: a parent render may have mounted this outlet.
                let Some(outlet) = self.inner.outlets.read().await.nth(level) else {
                    tracing::trace!(path = %path, level = level, "No outlet for level");
                    continue;
                };
                if !self.render_level(&path, route, component, &props, &outlet).await? {
                    self.milestone(&path, "Load overtaken by a later navigation");
                    return Ok(false);
                }
            }

            let outlets = self.inner.outlets.read().await.values();
            for outlet in outlets.iter().skip(depth) {
                outlet.clear().await;
            }

            let leaf = chain.leaf();
            if let Some(target) = leaf.redirect.clone() {
                return self.follow_redirect(&path, target, redirects).await;
            }

            self.commit_route(to, leaf.title.as_deref()).await;
            self.milestone(&path, "Navigation committed");
            Ok(true)
        }
        .boxed()
    }

    /// Run middleware in registration order. Returns the redirect target of
    /// the first middleware that redirects.
    async fn run_middleware(&self, to: &RouteData) -> RouterResult<Option<String>> {
        if self.inner.middleware.is_empty() {
            return Ok(None);
        }

        let ctx = NavigationContext {
            from: self.inner.current.read().await.clone(),
            to: to.clone(),
        };
        for middleware in &self.inner.middleware {
            match middleware.handle(&ctx).await? {
                MiddlewareOutcome::Continue => {}
                MiddlewareOutcome::Redirect(target) => return Ok(Some(target)),
            }
        }
        Ok(None)
    }

    /// Render one matched route into its outlet. Returns false when the
    /// write was abandoned because another load claimed the outlet.
    async fn render_level(
        &self,
        path: &str,
        route: &MatchedRoute,
        component: &RouteComponent,
        props: &RouteProps,
        outlet: &OutletHandle,
    ) -> RouterResult<bool> {
        let marker = OutletMarker::for_route(route);
        if outlet.claim(&marker).await {
            tracing::trace!(path = %path, route = %route.full_path, "Outlet already current");
            return Ok(true);
        }

        let component = match component.resolve().await {
            Ok(component) => component,
            Err(err) => {
                outlet.release(&marker).await;
                tracing::warn!(path = %path, route = %route.full_path, error = %err, "Component failed to load");
                return Err(RouterError::loader_failed(
                    &route.full_path,
                    format!("Failed to load component for '{}'", route.full_path),
                )
                .with_cause(err.to_string()));
            }
        };

        let view = component.render(props);
        match outlet.commit(&marker, view).await {
            Commit::Written => {
                tracing::debug!(path = %path, route = %route.full_path, component = %component.name(), "Outlet updated");
                Ok(true)
            }
            Commit::AlreadyRendered => Ok(true),
            Commit::Stale => {
                tracing::debug!(path = %path, route = %route.full_path, "Discarding stale outlet write");
                Ok(false)
            }
        }
    }

    /// Abort the current load in favour of `target`.
    ///
    /// The target is pushed to history when it commits and is not already
    /// the current pathname; the aborted load
    /// always reports `false` so its own path is never pushed.
    async fn follow_redirect(
        &self,
        from: &str,
        target: String,
        redirects: usize,
    ) -> RouterResult<bool> {
        let redirects = redirects + 1;
        let max = self.inner.config.max_redirects;
        if redirects > max {
            tracing::error!(
                from = %from,
                to = %target,
                max_redirects = max,
                "Redirect limit exceeded"
            );
            return Err(RouterError::redirect_limit(max, &target));
        }

        tracing::debug!(from = %from, to = %target, redirects = redirects, "Redirecting");
        let loaded = self.load_chain(target.clone(), redirects).await?;
        if loaded && target != self.inner.history.pathname() {
            self.inner.history.push_state(&target);
        }
        Ok(false)
    }

    async fn render_not_found(&self, path: &str) {
        tracing::warn!(path = %path, "No route matched");

        let outlets = self.inner.outlets.read().await.values();
        let mut outlets = outlets.iter();
        if let Some(first) = outlets.next() {
            first
                .show_placeholder(View::text(self.inner.config.not_found_text.clone()))
                .await;
        }
        for outlet in outlets {
            outlet.clear().await;
        }
    }

    /// Record the committed route, update links and forward the title.
    async fn commit_route(&self, route: RouteData, title: Option<&str>) {
        let pathname = strip_query(&route.path).to_string();
        for link in self.inner.links.read().await.values() {
            link.set_active(link.to() == pathname);
        }

        if let Some(title) = title {
            self.inner.history.set_title(title);
        }

        *self.inner.current.write().await = Some(route);
    }

    fn milestone(&self, path: &str, message: &str) {
        if self.inner.config.debug_logging {
            tracing::info!(path = %path, "{}", message);
        } else {
            tracing::debug!(path = %path, "{}", message);
        }
    }
}

fn route_data(result: &MatchResult) -> RouteData {
    let leaf = result.leaf();
    RouteData {
        path: result.path.clone(),
        params: result.params.clone(),
        name: leaf.and_then(|route| route.name.clone()),
        title: leaf.and_then(|route| route.title.clone()),
        query: result.search_query_params.clone(),
    }
}
