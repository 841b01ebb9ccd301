//! History platform boundary.
//!
//! The router talks to the session history through the [`History`] trait.
//! Calls are fire-and-forget: the router never awaits them and never
//! expects them to trigger a navigation on their own. A platform that
//! receives a back/forward event reports it by calling
//! [`Router::handle_popstate`](crate::Router::handle_popstate).

use crate::path::strip_query;
use std::sync::{PoisonError, RwLock};

/// Session history as seen by the router.
pub trait History: Send + Sync {
    /// The current pathname, without query or fragment.
    fn pathname(&self) -> String;

    /// Push a new entry.
    fn push_state(&self, path: &str);

    /// Go back one entry.
    fn back(&self);

    /// Set the document title. Platforms without a title ignore it.
    fn set_title(&self, _title: &str) {}
}

#[derive(Debug)]
struct Stack {
    entries: Vec<String>,
    index: usize,
    title: Option<String>,
}

/// An in-memory history stack.
///
/// Behaves like a browser session history: pushing while not at the top
/// discards the forward entries.
#[derive(Debug)]
pub struct MemoryHistory {
    stack: RwLock<Stack>,
}

impl MemoryHistory {
    /// Create a history whose only entry is `initial`.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            stack: RwLock::new(Stack {
                entries: vec![initial.into()],
                index: 0,
                title: None,
            }),
        }
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.read(|stack| stack.entries.clone())
    }

    /// The current entry, including any query string.
    pub fn location(&self) -> String {
        self.read(|stack| stack.entries[stack.index].clone())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.read(|stack| stack.entries.len())
    }

    /// True when the stack has no entries.
    pub fn is_empty(&self) -> bool {
        self.read(|stack| stack.entries.is_empty())
    }

    /// The last title set by the router.
    pub fn title(&self) -> Option<String> {
        self.read(|stack| stack.title.clone())
    }

    fn read<R>(&self, f: impl FnOnce(&Stack) -> R) -> R {
        let stack = self.stack.read().unwrap_or_else(PoisonError::into_inner);
        f(&stack)
    }

    fn write<R>(&self, f: impl FnOnce(&mut Stack) -> R) -> R {
        let mut stack = self.stack.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut stack)
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl History for MemoryHistory {
    fn pathname(&self) -> String {
        strip_query(&self.location()).to_string()
    }

    fn push_state(&self, path: &str) {
        self.write(|stack| {
            stack.entries.truncate(stack.index + 1);
            stack.entries.push(path.to_string());
            stack.index = stack.entries.len() - 1;
        });
    }

    fn back(&self) {
        self.write(|stack| stack.index = stack.index.saturating_sub(1));
    }

    fn set_title(&self, title: &str) {
        self.write(|stack| stack.title = Some(title.to_string()));
    }
}
