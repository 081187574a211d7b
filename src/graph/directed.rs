//! In-memory directed graph
//!
//! Reference implementation of [`GraphHandle`] backed by hash maps. The CLI
//! uses it to print expansion results; tests use it to observe engine
//! behavior.

use super::handle::{EdgeAttributes, EdgeKind, GraphHandle, NodeAttributes};
use std::collections::HashMap;

/// Directed graph keyed by wallet address
#[derive(Debug, Default)]
pub struct DirectedGraph {
    nodes: HashMap<String, NodeAttributes>,
    edges: HashMap<(String, String), EdgeAttributes>,
}

impl DirectedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterate nodes as (address, attributes)
    pub fn nodes(&self) -> impl Iterator<Item = (&str, &NodeAttributes)> {
        self.nodes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate edges as (source, target, attributes)
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &EdgeAttributes)> {
        self.edges
            .iter()
            .map(|((s, t), attrs)| (s.as_str(), t.as_str(), attrs))
    }

    pub fn edge_attributes(&self, source: &str, target: &str) -> Option<&EdgeAttributes> {
        self.edges
            .get(&(source.to_string(), target.to_string()))
    }
}

impl GraphHandle for DirectedGraph {
    fn has_node(&self, address: &str) -> bool {
        self.nodes.contains_key(address)
    }

    fn add_node(&mut self, address: &str, attrs: NodeAttributes) {
        self.nodes.insert(address.to_string(), attrs);
    }

    fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edges
            .contains_key(&(source.to_string(), target.to_string()))
    }

    fn add_edge(&mut self, source: &str, target: &str, attrs: EdgeAttributes) {
        self.edges
            .insert((source.to_string(), target.to_string()), attrs);
    }

    fn set_edge_kind(&mut self, source: &str, target: &str, kind: EdgeKind) {
        if let Some(attrs) = self
            .edges
            .get_mut(&(source.to_string(), target.to_string()))
        {
            attrs.kind = kind;
        }
    }

    fn node_attributes(&self, address: &str) -> Option<&NodeAttributes> {
        self.nodes.get(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_insert_and_lookup() {
        let mut graph = DirectedGraph::new();
        assert!(!graph.has_node("addr-a"));

        graph.add_node("addr-a", NodeAttributes::placeholder(0.0, 0.0));
        assert!(graph.has_node("addr-a"));
        assert!(!graph.has_node("Addr-A")); // exact identity, no aliasing
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_edge_identity_is_ordered() {
        let mut graph = DirectedGraph::new();
        graph.add_node("a", NodeAttributes::placeholder(0.0, 0.0));
        graph.add_node("b", NodeAttributes::placeholder(1.0, 0.0));
        graph.add_edge(
            "a",
            "b",
            EdgeAttributes {
                size: 3.0,
                label: String::new(),
                kind: EdgeKind::Straight,
            },
        );

        assert!(graph.has_edge("a", "b"));
        assert!(!graph.has_edge("b", "a"));
    }

    #[test]
    fn test_set_edge_kind_on_missing_edge_is_ignored() {
        let mut graph = DirectedGraph::new();
        graph.set_edge_kind("a", "b", EdgeKind::Curved);
        assert_eq!(graph.edge_count(), 0);
    }
}
