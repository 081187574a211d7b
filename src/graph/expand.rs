//! Graph expansion engine
//!
//! Merges one wallet's connection set into an existing graph. Pure merge
//! step: all state lives in the graph handle, existence checks precede every
//! insert, and applying the same connection set twice changes nothing.

use super::handle::{EdgeAttributes, EdgeKind, GraphHandle, NodeAttributes};
use crate::wallet::{ConnectionSet, ConnectionSummary};
use tracing::debug;

/// Radius of the placeholder ring around the expanded node
const PLACEMENT_RADIUS: f64 = 10.0;
/// Golden-angle step keeps successive placeholders spread apart
const PLACEMENT_ANGLE_STEP: f64 = 2.399_963_229_728_653;

const EDGE_SIZE: f64 = 3.0;

/// Merge `connections` into `graph` around `anchor`.
///
/// Inbound connections are fully processed before outbound ones. For an
/// inbound neighbor N the directed edge is N -> anchor; for an outbound
/// neighbor it is anchor -> N. Whenever an insert completes a bidirectional
/// pair, both directional edges are reclassified curved.
pub fn expand(anchor: &str, connections: &ConnectionSet, graph: &mut dyn GraphHandle) {
    let center = graph
        .node_attributes(anchor)
        .map(|attrs| (attrs.x, attrs.y))
        .unwrap_or((0.0, 0.0));
    let mut placed = 0usize;

    for (neighbor, summary) in &connections.inbound_connections {
        ensure_placeholder(graph, neighbor, center, &mut placed);
        merge_edge(graph, neighbor, anchor, summary);
    }

    for (neighbor, summary) in &connections.outbound_connections {
        ensure_placeholder(graph, neighbor, center, &mut placed);
        merge_edge(graph, anchor, neighbor, summary);
    }

    debug!(
        anchor,
        inbound = connections.inbound_connections.len(),
        outbound = connections.outbound_connections.len(),
        "Merged connection set"
    );
}

/// Insert `neighbor` with placeholder attributes unless it already exists.
/// Existing nodes keep their state (a fetched color is never downgraded).
fn ensure_placeholder(
    graph: &mut dyn GraphHandle,
    neighbor: &str,
    center: (f64, f64),
    placed: &mut usize,
) {
    if graph.has_node(neighbor) {
        return;
    }
    let angle = *placed as f64 * PLACEMENT_ANGLE_STEP;
    *placed += 1;
    graph.add_node(
        neighbor,
        NodeAttributes::placeholder(
            center.0 + PLACEMENT_RADIUS * angle.cos(),
            center.1 + PLACEMENT_RADIUS * angle.sin(),
        ),
    );
}

/// Insert the directed edge source -> target unless it already exists, then
/// upgrade both directions to curved if the reverse edge is present.
fn merge_edge(graph: &mut dyn GraphHandle, source: &str, target: &str, summary: &ConnectionSummary) {
    if graph.has_edge(source, target) {
        return;
    }
    graph.add_edge(
        source,
        target,
        EdgeAttributes {
            size: EDGE_SIZE,
            label: summary.edge_label(),
            kind: EdgeKind::Straight,
        },
    );
    if graph.has_edge(target, source) {
        graph.set_edge_kind(source, target, EdgeKind::Curved);
        graph.set_edge_kind(target, source, EdgeKind::Curved);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DirectedGraph;
    use crate::wallet::{NodeColor, TX_COUNT_SUPPRESSED};
    use std::collections::HashMap;

    fn summary(num_transactions: i64) -> ConnectionSummary {
        ConnectionSummary {
            num_transactions,
            amount_transacted: 1.5,
        }
    }

    fn connection_set(
        anchor: &str,
        inbound: &[(&str, i64)],
        outbound: &[(&str, i64)],
    ) -> ConnectionSet {
        ConnectionSet {
            wallet_address: anchor.to_string(),
            inbound_connections: inbound
                .iter()
                .map(|(addr, n)| (addr.to_string(), summary(*n)))
                .collect::<HashMap<_, _>>(),
            outbound_connections: outbound
                .iter()
                .map(|(addr, n)| (addr.to_string(), summary(*n)))
                .collect::<HashMap<_, _>>(),
        }
    }

    fn graph_with_anchor(anchor: &str) -> DirectedGraph {
        let mut graph = DirectedGraph::new();
        graph.add_node(anchor, NodeAttributes::classified(NodeColor::Red, 0.0, 0.0));
        graph
    }

    #[test]
    fn test_inbound_edge_points_at_anchor() {
        let mut graph = graph_with_anchor("a");
        expand("a", &connection_set("a", &[("b", 2)], &[]), &mut graph);

        assert!(graph.has_node("b"));
        assert!(graph.has_edge("b", "a"));
        assert!(!graph.has_edge("a", "b"));
        let edge = graph.edge_attributes("b", "a").unwrap();
        assert_eq!(edge.label, "2 transactions");
        assert_eq!(edge.kind, EdgeKind::Straight);
    }

    #[test]
    fn test_outbound_edge_leaves_anchor() {
        let mut graph = graph_with_anchor("a");
        expand("a", &connection_set("a", &[], &[("c", 7)]), &mut graph);

        assert!(graph.has_edge("a", "c"));
        assert!(!graph.has_edge("c", "a"));
    }

    #[test]
    fn test_new_neighbors_get_grey_placeholders_around_anchor() {
        let mut graph = graph_with_anchor("a");
        expand(
            "a",
            &connection_set("a", &[("b", 1)], &[("c", 1)]),
            &mut graph,
        );

        for addr in ["b", "c"] {
            let attrs = graph.node_attributes(addr).unwrap();
            assert_eq!(attrs.color, NodeColor::Grey);
            assert_eq!(attrs.size, 10.0);
            let dist = (attrs.x.powi(2) + attrs.y.powi(2)).sqrt();
            assert!((dist - 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_existing_node_attributes_are_preserved() {
        let mut graph = graph_with_anchor("a");
        graph.add_node("b", NodeAttributes::classified(NodeColor::Green, 3.0, 4.0));

        expand("a", &connection_set("a", &[("b", 1)], &[]), &mut graph);

        let attrs = graph.node_attributes("b").unwrap();
        assert_eq!(attrs.color, NodeColor::Green);
        assert_eq!((attrs.x, attrs.y), (3.0, 4.0));
    }

    #[test]
    fn test_suppressed_count_renders_empty_label() {
        let mut graph = graph_with_anchor("a");
        expand(
            "a",
            &connection_set("a", &[("b", TX_COUNT_SUPPRESSED)], &[]),
            &mut graph,
        );

        assert_eq!(graph.edge_attributes("b", "a").unwrap().label, "");
    }

    #[test]
    fn test_bidirectional_pair_becomes_curved() {
        let mut graph = graph_with_anchor("a");
        graph.add_node("b", NodeAttributes::placeholder(1.0, 0.0));
        graph.add_edge(
            "b",
            "a",
            EdgeAttributes {
                size: 3.0,
                label: "1 transactions".to_string(),
                kind: EdgeKind::Straight,
            },
        );

        // Outbound b completes the pair a->b / b->a
        expand("a", &connection_set("a", &[], &[("b", 2)]), &mut graph);

        assert_eq!(
            graph.edge_attributes("a", "b").unwrap().kind,
            EdgeKind::Curved
        );
        assert_eq!(
            graph.edge_attributes("b", "a").unwrap().kind,
            EdgeKind::Curved
        );
    }

    #[test]
    fn test_same_neighbor_inbound_and_outbound_is_curved() {
        let mut graph = graph_with_anchor("a");
        expand(
            "a",
            &connection_set("a", &[("b", 2)], &[("b", 3)]),
            &mut graph,
        );

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(
            graph.edge_attributes("b", "a").unwrap().kind,
            EdgeKind::Curved
        );
        assert_eq!(
            graph.edge_attributes("a", "b").unwrap().kind,
            EdgeKind::Curved
        );
    }

    #[test]
    fn test_expand_is_idempotent() {
        let mut graph = graph_with_anchor("a");
        let set = connection_set("a", &[("b", 2), ("c", TX_COUNT_SUPPRESSED)], &[("b", 4)]);

        expand("a", &set, &mut graph);
        let nodes_after_one = graph.node_count();
        let edges_after_one = graph.edge_count();
        let b_a_kind = graph.edge_attributes("b", "a").unwrap().kind;
        let b_a_label = graph.edge_attributes("b", "a").unwrap().label.clone();

        expand("a", &set, &mut graph);

        assert_eq!(graph.node_count(), nodes_after_one);
        assert_eq!(graph.edge_count(), edges_after_one);
        assert_eq!(graph.edge_attributes("b", "a").unwrap().kind, b_a_kind);
        assert_eq!(graph.edge_attributes("b", "a").unwrap().label, b_a_label);
    }

    #[test]
    fn test_anchor_missing_from_graph_still_merges() {
        let mut graph = DirectedGraph::new();
        expand("a", &connection_set("a", &[("b", 1)], &[]), &mut graph);

        assert!(graph.has_node("b"));
        assert!(graph.has_edge("b", "a"));
    }
}
