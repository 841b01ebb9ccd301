//! Links: navigation anchors that track whether they point at the current path.

use crate::{ElementView, View};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A connected link.
///
/// Following a link goes through [`Router::follow`](crate::Router::follow).
#[derive(Debug, Clone)]
pub struct LinkHandle {
    id: u64,
    to: Arc<str>,
    active_class: Arc<str>,
    active: Arc<AtomicBool>,
}

impl LinkHandle {
    pub(super) fn new(id: u64, to: &str, active_class: &str, active: bool) -> Self {
        Self {
            id,
            to: Arc::from(to),
            active_class: Arc::from(active_class),
            active: Arc::new(AtomicBool::new(active)),
        }
    }

    /// Registry id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Navigation target.
    pub fn to(&self) -> &str {
        &self.to
    }

    /// True when the target equals the current path.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub(super) fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::Release);
    }

    /// The anchor element with `content` as its children.
    pub fn render(&self, content: impl Into<View>) -> View {
        let mut anchor = ElementView::new("a")
            .attr("href", self.to.to_string())
            .attr("data-link", "");
        if self.is_active() {
            anchor = anchor.attr("class", self.active_class.to_string());
        }
        anchor.child(content).into()
    }
}
