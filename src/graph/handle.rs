//! Graph handle abstraction
//!
//! The capability set the expansion engine assumes of the externally owned
//! graph: node/edge existence checks, inserts, edge reclassification, and
//! node attribute reads. Nothing more.

use crate::wallet::NodeColor;

/// Edge rendering classification.
///
/// A one-directional connection renders straight; when wallets are connected
/// in both directions, both directional edges render curved so they do not
/// overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Straight,
    Curved,
}

/// Visual attributes of a graph node
#[derive(Debug, Clone, PartialEq)]
pub struct NodeAttributes {
    pub size: f64,
    pub color: NodeColor,
    pub x: f64,
    pub y: f64,
}

impl NodeAttributes {
    /// Placeholder state for a wallet whose attributes have not been fetched
    /// yet. The attribute fetch is a separate, user-triggered action.
    pub fn placeholder(x: f64, y: f64) -> Self {
        Self {
            size: 10.0,
            color: NodeColor::Grey,
            x,
            y,
        }
    }

    /// Node state for a wallet with known attributes
    pub fn classified(color: NodeColor, x: f64, y: f64) -> Self {
        Self {
            size: 10.0,
            color,
            x,
            y,
        }
    }
}

/// Visual attributes of a graph edge
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeAttributes {
    pub size: f64,
    /// Human-readable transaction count; empty when the count is suppressed
    pub label: String,
    pub kind: EdgeKind,
}

/// Mutable handle to an externally owned directed graph.
///
/// Node identity is the wallet address string, compared exactly; edge
/// identity is the ordered (source, target) pair.
pub trait GraphHandle {
    fn has_node(&self, address: &str) -> bool;

    fn add_node(&mut self, address: &str, attrs: NodeAttributes);

    fn has_edge(&self, source: &str, target: &str) -> bool;

    fn add_edge(&mut self, source: &str, target: &str, attrs: EdgeAttributes);

    /// Reclassify an existing edge; unknown edges are ignored
    fn set_edge_kind(&mut self, source: &str, target: &str, kind: EdgeKind);

    fn node_attributes(&self, address: &str) -> Option<&NodeAttributes>;
}
