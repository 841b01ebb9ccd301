//! Router state machine with outlet and link primitives
//!
//! The [`Router`] owns the compiled route tree, the middleware list and the
//! registries of connected outlets and links. A navigation runs through
//! these steps:
//!
//! 1. match the path against the tree (pure)
//! 2. run middleware, which may redirect
//! 3. render each matched route that has a component into the outlet of
//!    its nesting level, skipping outlets that already show it
//! 4. clear deeper outlets, follow a route redirect, update links and title
//!
//! Concurrent navigations are reconciled per outlet: each outlet remembers
//! which route it is loading, and a load that finds another route claimed
//! in its place abandons its write.
//!
//! ```rust,ignore
//! let router = Router::builder().routes(routes()).build()?;
//! let top = router.connect_outlet().await;
//! let nested = router.connect_outlet().await;
//!
//! router.navigate("/admin/users").await?;
//! assert_eq!(top.rendered_path().await.as_deref(), Some("/admin"));
//! assert_eq!(nested.rendered_path().await.as_deref(), Some("/admin/users"));
//! ```

mod builder;
mod core;
mod link;
mod outlet;
mod registry;

pub use builder::RouterBuilder;
pub use core::Router;
pub use link::LinkHandle;
pub use outlet::{OutletHandle, OutletMarker};
