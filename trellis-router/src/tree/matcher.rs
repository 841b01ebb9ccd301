//! Path matching against the route tree.
//!
//! Matching is a pure depth-first search. The bound parameters and the
//! active chain live in a `MatchState` local to one call; every binding is
//! recorded in an undo log so a failed subtree leaves no trace behind.

use super::RouteTree;
use super::matched::{MatchResult, MatchedRoute};
use super::node::RouteNode;
use crate::path::{ParsedPath, Segment, decode_segment};
use std::collections::HashMap;

/// A node on the active chain and the input position after consuming it.
struct ChainEntry<'t> {
    node: &'t RouteNode,
    end: usize,
}

#[derive(Default)]
struct MatchState<'t> {
    params: HashMap<String, String>,
    /// Previous value of every binding, in binding order.
    undo: Vec<(String, Option<String>)>,
    chain: Vec<ChainEntry<'t>>,
}

impl<'t> MatchState<'t> {
    fn bind(&mut self, name: &str, value: String) {
        let previous = self.params.insert(name.to_string(), value);
        self.undo.push((name.to_string(), previous));
    }

    fn checkpoint(&self) -> (usize, usize) {
        (self.undo.len(), self.chain.len())
    }

    fn rollback(&mut self, (undo_len, chain_len): (usize, usize)) {
        while self.undo.len() > undo_len {
            if let Some((name, previous)) = self.undo.pop() {
                match previous {
                    Some(value) => self.params.insert(name, value),
                    None => self.params.remove(&name),
                };
            }
        }
        self.chain.truncate(chain_len);
    }
}

impl RouteTree {
    /// Match `path` against the tree.
    ///
    /// Roots and children are tried in declaration order and the first
    /// subtree that matches wins. A path that cannot be parsed is logged and
    /// treated as unmatched.
    ///
    /// The returned chain still contains transient nodes; call
    /// [`MatchResult::flatten_transient_routes`] before rendering it.
    pub fn match_path(&self, path: &str) -> MatchResult {
        let parsed = match ParsedPath::parse(&self.base_url, path) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::warn!(path = %path, error = %err, "Unparsable path, treating as unmatched");
                return MatchResult::empty(path);
            }
        };

        let input = parsed.segments();
        let mut state = MatchState::default();
        let matched = self
            .roots
            .iter()
            .any(|root| select(root, &input, 0, &mut state));

        tracing::trace!(
            path = %path,
            matched = matched,
            depth = state.chain.len(),
            "Matched path against route tree"
        );

        let sub_tree = if matched {
            build_chain(&state.chain, &input)
        } else {
            None
        };

        MatchResult {
            path: path.to_string(),
            search_query_params: parsed.query,
            params: state.params,
            sub_tree,
        }
    }
}

/// Try to match `node` with its segment at input position `pos`.
fn select<'t>(node: &'t RouteNode, input: &[&str], pos: usize, state: &mut MatchState<'t>) -> bool {
    let checkpoint = state.checkpoint();

    let Some(end) = consume(node, input, pos, state) else {
        state.rollback(checkpoint);
        return false;
    };
    state.chain.push(ChainEntry { node, end });

    if node.is_wildcard() {
        return true;
    }

    if end == input.len() && !node.is_transient {
        // A layout node without a component lets an index child take over.
        if node.component.is_none() {
            select_children(node, input, end, state);
        }
        return true;
    }

    if select_children(node, input, end, state) {
        return true;
    }

    state.rollback(checkpoint);
    false
}

fn select_children<'t>(
    node: &'t RouteNode,
    input: &[&str],
    pos: usize,
    state: &mut MatchState<'t>,
) -> bool {
    node.children
        .iter()
        .any(|child| select(child, input, pos, state))
}

/// Consume the node's own segment, returning the next input position.
fn consume(node: &RouteNode, input: &[&str], pos: usize, state: &mut MatchState<'_>) -> Option<usize> {
    match &node.segment {
        None => Some(pos),
        Some(Segment::Static(text)) => (decode_segment(input.get(pos)?) == text.as_str()).then_some(pos + 1),
        Some(Segment::Dynamic(name)) => {
            let value = input.get(pos)?;
            state.bind(name, decode_segment(value).into_owned());
            Some(pos + 1)
        }
        Some(Segment::Wildcard(name)) => {
            if !name.is_empty() {
                let rest: Vec<_> = input[pos..].iter().map(|raw| decode_segment(raw)).collect();
                state.bind(name, rest.join("/"));
            }
            Some(input.len())
        }
    }
}

fn build_chain(chain: &[ChainEntry<'_>], input: &[&str]) -> Option<MatchedRoute> {
    chain.iter().rev().fold(None, |child, entry| {
        let resolved = format!("/{}", input[..entry.end].join("/"));
        Some(MatchedRoute::snapshot(entry.node, resolved, child.map(Box::new)))
    })
}
