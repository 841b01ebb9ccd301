//! Compiles route records into route nodes.
//!
//! A record whose path spans several segments becomes a chain with one node
//! per segment. Every node except the last is transient and has exactly one
//! child, so multi-segment paths never fan out at intermediate positions.
//!
//! Each segment classifies its own node: in `/org/:org/team/:team` both the
//! transient `:org` node and the terminal `:team` node are dynamic and bind
//! their parameter during matching. A wildcard swallows the rest of the input
//! and therefore has to be the final segment of its record, with no children.

use super::node::RouteNode;
use crate::path::{PathNormalizer, Segment, split_segments};
use crate::{RouteRecord, RouterError, RouterResult};

/// Build the nodes for `records`, nested under a parent with `parent_path`.
pub(super) fn build_nodes(
    normalizer: &PathNormalizer,
    records: Vec<RouteRecord>,
    parent_path: &str,
) -> RouterResult<Vec<RouteNode>> {
    records
        .into_iter()
        .map(|record| build_record(normalizer, record, parent_path))
        .collect()
}

fn build_record(
    normalizer: &PathNormalizer,
    record: RouteRecord,
    parent_path: &str,
) -> RouterResult<RouteNode> {
    let raw_segments = split_segments(&record.path);
    let segments = classify(&record.path, &raw_segments)?;
    if segments.last().is_some_and(Segment::is_wildcard) && !record.children.is_empty() {
        return Err(RouterError::invalid_route(format!(
            "Wildcard route '{}' cannot have children",
            record.path
        )));
    }

    let full_path = normalizer.join(parent_path, &record.path);
    let children = build_nodes(normalizer, record.children, &full_path)?;

    tracing::trace!(
        full_path = %full_path,
        segments = segments.len(),
        children = children.len(),
        "Compiled route record"
    );

    let mut node = RouteNode {
        full_path,
        segment: segments.last().cloned(),
        name: record.name,
        title: record.title,
        redirect: record.redirect,
        component: record.component,
        is_transient: false,
        children,
    };

    // Wrap the terminal node in transient ancestors, innermost first.
    for depth in (1..segments.len()).rev() {
        let prefix = raw_segments[..depth].join("/");
        node = RouteNode {
            full_path: normalizer.join(parent_path, &prefix),
            segment: Some(segments[depth - 1].clone()),
            name: None,
            title: None,
            redirect: None,
            component: None,
            is_transient: true,
            children: vec![node],
        };
    }

    Ok(node)
}

fn classify(path: &str, raw_segments: &[&str]) -> RouterResult<Vec<Segment>> {
    let last = raw_segments.len().saturating_sub(1);
    raw_segments
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            let segment = Segment::parse(raw);
            match &segment {
                Segment::Wildcard(_) if index != last => Err(RouterError::invalid_route(
                    format!("Wildcard must be the last segment in '{}'", path),
                )),
                Segment::Dynamic(name) if name.is_empty() => Err(RouterError::invalid_route(
                    format!("Dynamic segment without a name in '{}'", path),
                )),
                _ => Ok(segment),
            }
        })
        .collect()
}
