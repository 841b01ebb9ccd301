//! Context types for dependency injection

use crate::Router;
use std::sync::Arc;

/// Application context giving components access to the router and shared
/// state.
///
/// Cloning is cheap: both the router and the state are shared.
///
/// # Example
/// ```rust,ignore
/// let ctx = AppContext::with_state(router, Session::default());
/// let on_click = {
///     let ctx = ctx.clone();
///     move || ctx.router().navigate("/profile")
/// };
/// ```
#[derive(Debug)]
pub struct AppContext<T = ()> {
    router: Router,
    state: Arc<T>,
}

impl AppContext<()> {
    /// Create a context without application state.
    pub fn new(router: Router) -> Self {
        Self::with_state(router, ())
    }
}

impl<T> AppContext<T> {
    /// Create a context holding `state`.
    pub fn with_state(router: Router, state: T) -> Self {
        Self {
            router,
            state: Arc::new(state),
        }
    }

    /// Create a context around state that is already shared elsewhere.
    pub fn with_shared_state(router: Router, state: Arc<T>) -> Self {
        Self { router, state }
    }

    /// The router.
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Get a reference to the application state
    pub fn state(&self) -> &T {
        &self.state
    }

    /// Get the Arc for sharing
    pub fn arc(&self) -> Arc<T> {
        self.state.clone()
    }
}

impl<T> Clone for AppContext<T> {
    fn clone(&self) -> Self {
        Self {
            router: self.router.clone(),
            state: self.state.clone(),
        }
    }
}

impl<T> std::ops::Deref for AppContext<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Session {
        user: Option<String>,
    }

    #[test]
    fn test_state_is_shared_between_clones() {
        let router = Router::new(Vec::new()).unwrap();
        let ctx = AppContext::with_state(
            router,
            Session {
                user: Some("ada".into()),
            },
        );
        let other = ctx.clone();

        assert!(Arc::ptr_eq(&ctx.arc(), &other.arc()));
        assert_eq!(other.user.as_deref(), Some("ada"));
    }

    #[test]
    fn test_shared_state_is_not_copied() {
        let session = Arc::new(Session::default());
        let ctx = AppContext::with_shared_state(Router::new(Vec::new()).unwrap(), session.clone());
        assert!(Arc::ptr_eq(&ctx.arc(), &session));
        assert!(ctx.state().user.is_none());
    }

    #[tokio::test]
    async fn test_router_is_shared_between_clones() {
        let ctx = AppContext::new(Router::new(Vec::new()).unwrap());
        let other = ctx.clone();

        let _outlet = ctx.router().connect_outlet().await;
        assert_eq!(other.router().outlet_count().await, 1);
    }
}
