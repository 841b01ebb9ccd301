//! Outlets: the slots nested route components render into.

use crate::tree::MatchedRoute;
use crate::{ElementView, View};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Identifies what an outlet shows: the concrete path a route matched and
/// the route's declared pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutletMarker {
    /// Resolved path prefix, parameters substituted
    pub path: String,
    /// Declared full path of the route
    pub route: String,
}

impl OutletMarker {
    pub(crate) fn for_route(route: &MatchedRoute) -> Self {
        Self {
            path: route.resolved_path.clone(),
            route: route.full_path.clone(),
        }
    }
}

/// Result of committing a rendered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Commit {
    /// The view was written
    Written,
    /// A concurrent load already wrote the same marker
    AlreadyRendered,
    /// Another load claimed the outlet, or it was disconnected
    Stale,
}

#[derive(Debug, Default)]
struct OutletState {
    rendered: Option<OutletMarker>,
    pending: Option<OutletMarker>,
    view: View,
    disconnected: bool,
}

/// A connected outlet.
///
/// Clones share state; the router writes through its own clone and the
/// application reads through the one returned by
/// [`Router::connect_outlet`](crate::Router::connect_outlet).
#[derive(Debug, Clone)]
pub struct OutletHandle {
    id: u64,
    state: Arc<RwLock<OutletState>>,
}

impl OutletHandle {
    pub(super) fn new(id: u64) -> Self {
        Self {
            id,
            state: Arc::new(RwLock::new(OutletState::default())),
        }
    }

    /// Registry id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The current content.
    pub async fn view(&self) -> View {
        self.state.read().await.view.clone()
    }

    /// Resolved path of the route currently shown, if any.
    pub async fn rendered_path(&self) -> Option<String> {
        self.state
            .read()
            .await
            .rendered
            .as_ref()
            .map(|marker| marker.path.clone())
    }

    /// Marker of the route currently shown.
    pub async fn rendered(&self) -> Option<OutletMarker> {
        self.state.read().await.rendered.clone()
    }

    /// Marker of the route being loaded into this outlet.
    pub async fn pending(&self) -> Option<OutletMarker> {
        self.state.read().await.pending.clone()
    }

    /// False once the outlet has been disconnected.
    pub async fn is_connected(&self) -> bool {
        !self.state.read().await.disconnected
    }

    /// The outlet element with its content.
    pub async fn render(&self) -> View {
        ElementView::new("div")
            .attr("data-router-outlet", self.id.to_string())
            .child(self.view().await)
            .into()
    }

    /// Claim the outlet for `marker`. Returns true when it already shows
    /// that marker and no write is needed.
    pub(super) async fn claim(&self, marker: &OutletMarker) -> bool {
        let mut state = self.state.write().await;
        if state.rendered.as_ref() == Some(marker) {
            state.pending = None;
            return true;
        }
        state.pending = Some(marker.clone());
        false
    }

    /// Write `view` if the outlet is still claimed for `marker`.
    pub(super) async fn commit(&self, marker: &OutletMarker, view: View) -> Commit {
        let mut state = self.state.write().await;
        if state.disconnected {
            return Commit::Stale;
        }
        if state.pending.as_ref() == Some(marker) {
            state.rendered = state.pending.take();
            state.view = view;
            Commit::Written
        } else if state.pending.is_none() && state.rendered.as_ref() == Some(marker) {
            Commit::AlreadyRendered
        } else {
            Commit::Stale
        }
    }

    /// Drop the claim for `marker` after a failed load, keeping the content.
    pub(super) async fn release(&self, marker: &OutletMarker) {
        let mut state = self.state.write().await;
        if state.pending.as_ref() == Some(marker) {
            state.pending = None;
        }
    }

    /// Show `view` without a route marker.
    pub(super) async fn show_placeholder(&self, view: View) {
        let mut state = self.state.write().await;
        if state.disconnected {
            return;
        }
        state.rendered = None;
        state.pending = None;
        state.view = view;
    }

    pub(super) async fn clear(&self) {
        self.show_placeholder(View::Empty).await;
    }

    pub(super) async fn disconnect(&self) {
        let mut state = self.state.write().await;
        state.disconnected = true;
        state.pending = None;
    }
}
