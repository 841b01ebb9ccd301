//! Navigation middleware
//!
//! Middleware runs after a path has been matched and before any outlet is
//! written. Each middleware sees where the router is coming from and where
//! it is going, and either lets the navigation continue or redirects it.

use crate::RouterResult;
use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

/// What a middleware decided about a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MiddlewareOutcome {
    /// Let the navigation proceed
    Continue,
    /// Abort the navigation and load this path instead
    Redirect(String),
}

/// Route information exposed to middleware.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteData {
    /// Requested path, including any query string
    pub path: String,
    /// Parameters bound by the match
    pub params: HashMap<String, String>,
    /// Name of the deepest matched route
    pub name: Option<String>,
    /// Title of the deepest matched route
    pub title: Option<String>,
    /// Decoded query pairs
    pub query: Vec<(String, String)>,
}

impl RouteData {
    /// Get a bound parameter by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Get the first query value for `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// The navigation being decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationContext {
    /// The route currently committed, `None` before the first load
    pub from: Option<RouteData>,
    /// The route being loaded
    pub to: RouteData,
}

/// Trait for implementing custom middleware
#[async_trait]
pub trait Middleware: Send + Sync {
    /// Decide whether the navigation continues.
    async fn handle(&self, ctx: &NavigationContext) -> RouterResult<MiddlewareOutcome>;
}

/// Middleware function type
pub type MiddlewareFn = Arc<
    dyn Fn(NavigationContext) -> BoxFuture<'static, RouterResult<MiddlewareOutcome>>
        + Send
        + Sync,
>;

/// Create middleware from an async function
///
/// # Example
/// ```rust,ignore
/// let guard = from_fn(|ctx: NavigationContext| async move {
///     if ctx.to.path.starts_with("/admin") && !signed_in() {
///         return Ok(MiddlewareOutcome::Redirect("/login".into()));
///     }
///     Ok(MiddlewareOutcome::Continue)
/// });
/// ```
pub fn from_fn<F, Fut>(f: F) -> MiddlewareFn
where
    F: Fn(NavigationContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = RouterResult<MiddlewareOutcome>> + Send + 'static,
{
    Arc::new(move |ctx| f(ctx).boxed())
}

#[async_trait]
impl Middleware for MiddlewareFn {
    async fn handle(&self, ctx: &NavigationContext) -> RouterResult<MiddlewareOutcome> {
        (self)(ctx.clone()).await
    }
}
