#![warn(missing_docs)]
//! # Trellis Router
//!
//! A nested client-side router for component-based UIs.
//!
//! ## Overview
//!
//! - **Declarative route records** with nested children, names, titles and redirects
//! - **Tree matcher** for `/literal`, `/:param` and `/*rest` segments with
//!   backtracking and first-match-wins priority
//! - **Lazy routes** whose component is fetched by an async loader on first render
//! - **Middleware** that sees every navigation before it commits and may redirect it
//! - **Outlets and links** kept consistent with racing navigations
//! - **Structured error handling** with typed error codes
//!
//! ## Architecture
//!
//! ```text
//!  RouteRecord[] ──build──▶ RouteTree ──match_path──▶ MatchResult
//!                                                        │
//!                                                        ▼
//!  History ◀──push/title── Router ──middleware──▶ NavigationContext
//!                            │
//!              ┌─────────────┼─────────────┐
//!              ▼             ▼             ▼
//!           Outlet 0      Outlet 1       Links
//!         (top route)   (child route)  (active flag)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use trellis_router::prelude::*;
//!
//! let home = Component::new("Home", |_| View::text("Home"));
//! let user = Component::new("User", |props: &RouteProps| {
//!     View::text(format!("User {}", props.param("id").unwrap_or("?")))
//! });
//!
//! let router = Router::builder()
//!     .route(RouteRecord::new("/").redirect("/home"))
//!     .route(RouteRecord::new("/home").title("Home").component(home))
//!     .route(RouteRecord::new("/users/:id").name("user").component(user))
//!     .route(RouteRecord::new("/settings").lazy(|| async {
//!         Ok(Module { default: settings_page() })
//!     }))
//!     .build()?;
//!
//! let outlet = router.connect_outlet().await;
//! router.start().await?;
//! router.navigate("/users/42").await?;
//! assert_eq!(outlet.view().await, View::text("User 42"));
//! ```

mod component;
mod config;
mod context;
mod error;
pub mod history;
pub mod middleware;
pub mod path;
mod record;
mod router;
pub mod tree;
mod view;

#[cfg(test)]
mod tests;

pub use component::{Component, ComponentId, LazyComponent, Module, RouteComponent, RouteProps};
pub use config::RouterConfig;
pub use context::AppContext;
pub use error::{RouterError, RouterErrorCode, RouterResult};
pub use history::{History, MemoryHistory};
pub use middleware::{
    Middleware, MiddlewareFn, MiddlewareOutcome, NavigationContext, RouteData, from_fn,
};
pub use record::RouteRecord;
pub use router::{LinkHandle, OutletHandle, OutletMarker, Router, RouterBuilder};
pub use tree::{MatchResult, MatchedRoute, RouteNode, RouteTree};
pub use view::{ElementView, View};

/// Prelude module for convenient imports
///
/// # Example
/// ```rust,ignore
/// use trellis_router::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Context
        AppContext,
        // Components
        Component,
        ElementView,
        // History
        History,
        LazyComponent,
        LinkHandle,
        MatchResult,
        MemoryHistory,
        // Middleware
        Middleware,
        MiddlewareOutcome,
        Module,
        NavigationContext,
        OutletHandle,
        RouteComponent,
        RouteData,
        RouteProps,
        // Routes
        RouteRecord,
        RouteTree,
        // Router
        Router,
        RouterBuilder,
        RouterConfig,
        // Error handling
        RouterError,
        RouterErrorCode,
        RouterResult,
        View,
        // Functions
        from_fn,
    };
}
