//! Node, edge and graph entities
//!
//! Nodes and edges live in arenas owned by the [`Graph`] and refer to each
//! other through [`NodeId`] / [`EdgeId`] handles. Node names are the identity
//! key: a `BTreeMap` from name to handle provides lookup and the canonical
//! (by name) node ordering.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::error::Warning;
use crate::graph::types::{EdgeId, EdgeKey, GraphMode, NodeId, Weight, UNWEIGHTED_COST};

/// A named vertex and the edges incident to it
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    incidence: BTreeSet<EdgeKey>,
}

impl Node {
    fn new(name: &str) -> Self {
        Node {
            name: name.to_string(),
            incidence: BTreeSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Incident edges in storage order (cost, then name)
    pub fn incident_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.incidence.iter().map(EdgeKey::id)
    }

    pub fn degree(&self) -> usize {
        self.incidence.len()
    }
}

/// A connection between two nodes with an optional weight
///
/// `n1` is the source and `n2` the target when the owning graph is directed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    n1: NodeId,
    n2: NodeId,
    weight: Option<Weight>,
}

impl Edge {
    pub fn n1(&self) -> NodeId {
        self.n1
    }

    pub fn n2(&self) -> NodeId {
        self.n2
    }

    /// The weight given when the edge was added, `None` if unweighted
    pub fn weight(&self) -> Option<Weight> {
        self.weight
    }

    /// The weight charged by path and spanning tree algorithms
    pub fn cost(&self) -> Weight {
        self.weight.unwrap_or(UNWEIGHTED_COST)
    }

    /// The endpoint opposite to `node`, `None` if `node` is not an endpoint
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if self.n1 == node {
            Some(self.n2)
        } else if self.n2 == node {
            Some(self.n1)
        } else {
            None
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.n1 == self.n2
    }

    fn swap_endpoints(&mut self) {
        std::mem::swap(&mut self.n1, &mut self.n2);
    }
}

/// A directed or undirected graph
#[derive(Debug, Clone, Default)]
pub struct Graph {
    mode: GraphMode,
    nodes: Vec<Node>,
    node_index: BTreeMap<String, NodeId>,
    edges: Vec<Edge>,
    edge_order: BTreeSet<EdgeKey>,
    pairs: HashMap<(NodeId, NodeId), EdgeId>,
    warnings: Vec<Warning>,
}

impl Graph {
    pub fn new(directed: bool) -> Self {
        Graph {
            mode: GraphMode::from(directed),
            ..Default::default()
        }
    }

    /// Build a graph from `(from, to, weight)` triples
    ///
    /// Missing nodes are created on first mention and repeated endpoint pairs
    /// collapse onto the first edge added for them.
    pub fn from_triples<I, S>(directed: bool, triples: I) -> Self
    where
        I: IntoIterator<Item = (S, S, Option<Weight>)>,
        S: AsRef<str>,
    {
        let mut graph = Graph::new(directed);
        for (from, to, weight) in triples {
            graph.connect(from.as_ref(), to.as_ref(), weight);
        }
        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            directed,
            "graph_built"
        );
        graph
    }

    pub fn directed(&self) -> bool {
        self.mode.is_directed()
    }

    pub fn mode(&self) -> GraphMode {
        self.mode
    }

    /// Change the directed flag
    ///
    /// Incidence sets are rebuilt for the new rule when edges already exist.
    /// Switching to undirected merges each `a b` / `b a` pair onto the edge
    /// added first; the later one is dropped, so edge handles added after it
    /// shift down by one.
    pub fn set_directed(&mut self, directed: bool) {
        if self.directed() == directed {
            return;
        }
        self.mode = GraphMode::from(directed);
        if !self.edges.is_empty() {
            self.warnings.push(
                Warning::DirectedFlagChanged {
                    directed,
                    edges: self.edges.len(),
                }
                .log(),
            );
            if !directed {
                self.drop_reverse_pairs();
            }
            self.rebuild_indexes();
        }
    }

    /// Warnings raised while the graph was being built
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn find_node(&self, name: &str) -> Option<NodeId> {
        if name.is_empty() {
            return None;
        }
        self.node_index.get(name).copied()
    }

    /// Add a node, returning the existing one if the name is taken
    pub fn add_node(&mut self, name: &str) -> NodeId {
        if let Some(id) = self.node_index.get(name) {
            return *id;
        }
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::new(name));
        self.node_index.insert(name.to_string(), id);
        id
    }

    /// Look up the edge joining two nodes
    ///
    /// In an undirected graph `(a, b)` and `(b, a)` find the same edge.
    pub fn find_edge(&self, n1: NodeId, n2: NodeId) -> Option<EdgeId> {
        self.pairs.get(&(n1, n2)).copied().or_else(|| {
            if self.directed() {
                None
            } else {
                self.pairs.get(&(n2, n1)).copied()
            }
        })
    }

    /// Add an edge, returning the existing one if the endpoints are already joined
    pub fn add_edge(&mut self, n1: NodeId, n2: NodeId, weight: Option<Weight>) -> EdgeId {
        if let Some(existing) = self.find_edge(n1, n2) {
            return existing;
        }

        if let Some(w) = weight.filter(|w| *w < 0) {
            self.warnings.push(
                Warning::NegativeWeight {
                    from: self.node_name(n1).to_string(),
                    to: self.node_name(n2).to_string(),
                    weight: w,
                }
                .log(),
            );
        }

        let id = EdgeId::new(self.edges.len());
        self.edges.push(Edge { n1, n2, weight });
        self.pairs.insert((n1, n2), id);
        let key = self.edge_key(id);
        self.edge_order.insert(key.clone());
        self.attach(id, key);
        id
    }

    /// Add both endpoints by name and the edge between them
    pub fn connect(&mut self, from: &str, to: &str, weight: Option<Weight>) -> EdgeId {
        let n1 = self.add_node(from);
        let n2 = self.add_node(to);
        self.add_edge(n1, n2, weight)
    }

    /// # Panics
    ///
    /// If `id` was not handed out by this graph.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    pub fn node_name(&self, id: NodeId) -> &str {
        self.node(id).name()
    }

    /// `"<n1> <n2>"`, the secondary storage key of an edge
    pub fn edge_name(&self, id: EdgeId) -> String {
        let edge = self.edge(id);
        format!("{} {}", self.node_name(edge.n1), self.node_name(edge.n2))
    }

    pub fn edge_key(&self, id: EdgeId) -> EdgeKey {
        EdgeKey::new(self.edge(id).cost(), self.edge_name(id), id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in name order
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.node_index.values().copied()
    }

    /// All edges in storage order
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edge_order.iter().map(EdgeKey::id)
    }

    pub fn incident_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        self.node(node).incident_edges()
    }

    /// Nodes reachable over one incident edge, paired with that edge
    ///
    /// Directed graphs only register an edge with its source, so this yields
    /// successors there and all adjacent nodes in undirected graphs.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, EdgeId)> + '_ {
        self.incident_edges(node)
            .filter_map(move |e| self.edge(e).other(node).map(|other| (other, e)))
    }

    /// Reverse every edge and re-derive all indexes from the new orientation
    pub(crate) fn reverse_edges(&mut self) {
        for edge in &mut self.edges {
            edge.swap_endpoints();
        }
        self.rebuild_indexes();
    }

    fn attach(&mut self, id: EdgeId, key: EdgeKey) {
        let (n1, n2) = {
            let edge = self.edge(id);
            (edge.n1, edge.n2)
        };
        self.nodes[n1.index()].incidence.insert(key.clone());
        if !self.directed() {
            self.nodes[n2.index()].incidence.insert(key);
        }
    }

    /// Keep the first edge of every reverse pair, in insertion order
    fn drop_reverse_pairs(&mut self) {
        let mut seen = HashSet::new();
        let mut dropped = Vec::new();
        for edge in std::mem::take(&mut self.edges) {
            if seen.contains(&(edge.n2, edge.n1)) {
                dropped.push(edge);
            } else {
                seen.insert((edge.n1, edge.n2));
                self.edges.push(edge);
            }
        }

        for edge in dropped {
            self.warnings.push(
                Warning::ReverseEdgeDropped {
                    from: self.node_name(edge.n1).to_string(),
                    to: self.node_name(edge.n2).to_string(),
                }
                .log(),
            );
        }
    }

    fn rebuild_indexes(&mut self) {
        for node in &mut self.nodes {
            node.incidence.clear();
        }
        self.pairs.clear();
        self.edge_order.clear();

        for index in 0..self.edges.len() {
            let id = EdgeId::new(index);
            let endpoints = {
                let edge = self.edge(id);
                (edge.n1, edge.n2)
            };
            self.pairs.insert(endpoints, id);
            let key = self.edge_key(id);
            self.edge_order.insert(key.clone());
            self.attach(id, key);
        }
    }
}
