//! Directed graph of note identities.

use serde::Serialize;
use std::collections::BTreeSet;

/// A directed `from -> to` edge between two note identities.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Nodes and edges discovered while exploring a note collection.
///
/// Duplicate edges are kept as inserted. Adding an edge inserts both
/// endpoints into the node set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkGraph {
    nodes: BTreeSet<String>,
    edges: Vec<Edge>,
}

impl LinkGraph {
    /// An empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// A graph holding a single node.
    pub fn with_root(root: &str) -> Self {
        let mut graph = Self::new();
        graph.add_node(root);
        graph
    }

    /// Insert a node. Returns `true` if it was not present before.
    pub fn add_node(&mut self, identity: &str) -> bool {
        if self.nodes.contains(identity) {
            return false;
        }
        self.nodes.insert(identity.to_string())
    }

    pub fn contains_node(&self, identity: &str) -> bool {
        self.nodes.contains(identity)
    }

    /// Append an edge, inserting missing endpoints.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        self.add_node(from);
        self.add_node(to);
        self.edges.push(Edge::new(from, to));
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.edges.iter().any(|e| e.from == from && e.to == to)
    }

    /// Node identities in sorted order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edges leaving `identity`.
    pub fn edges_from<'a>(&'a self, identity: &'a str) -> impl Iterator<Item = &'a Edge> {
        self.edges.iter().filter(move |e| e.from == identity)
    }

    /// Edges arriving at `identity`.
    pub fn edges_to<'a>(&'a self, identity: &'a str) -> impl Iterator<Item = &'a Edge> {
        self.edges.iter().filter(move |e| e.to == identity)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Distinct edges, sorted.
    pub fn unique_edges(&self) -> BTreeSet<&Edge> {
        self.edges.iter().collect()
    }
}
