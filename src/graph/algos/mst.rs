//! Minimum spanning trees
//!
//! Kruskal grows a forest by taking edges cheapest first and joining two
//! trees whenever an edge connects different sets. Prim grows one tree from
//! the first node by name, always taking the cheapest frontier edge.
//!
//! Both are defined for undirected graphs. On a directed graph they still
//! run, with a warning, and may produce more than one tree.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

use crate::bail_empty;
use crate::error::{GraphError, Result, Warning};
use crate::graph::types::{EdgeKey, NodeId, Weight};
use crate::graph::Graph;
use crate::heap::MinHeap;
use crate::trace_time;

/// Spanning tree construction strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MstAlgorithm {
    #[default]
    Kruskal,
    Prim,
}

impl std::str::FromStr for MstAlgorithm {
    type Err = GraphError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kruskal" => Ok(MstAlgorithm::Kruskal),
            "prim" => Ok(MstAlgorithm::Prim),
            other => Err(GraphError::unsupported(
                "spanning tree algorithm",
                other,
                "kruskal, prim",
            )),
        }
    }
}

impl std::fmt::Display for MstAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MstAlgorithm::Kruskal => write!(f, "kruskal"),
            MstAlgorithm::Prim => write!(f, "prim"),
        }
    }
}

/// A graph node's place in the spanning tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub node: NodeId,
    /// `None` for the root of a tree
    pub parent: Option<NodeId>,
    /// Cost of the edge from `parent` to this node
    pub weight: Weight,
    /// Disjoint-set tag (Kruskal only)
    pub set: usize,
}

impl TreeNode {
    fn root(node: NodeId, set: usize) -> Self {
        TreeNode {
            node,
            parent: None,
            weight: 0,
            set,
        }
    }
}

/// Result of a spanning tree computation
#[derive(Debug, Clone, Default)]
pub struct SpanningTree {
    pub algorithm: MstAlgorithm,
    nodes: BTreeMap<NodeId, TreeNode>,
    pub warnings: Vec<Warning>,
}

impl SpanningTree {
    fn new(algorithm: MstAlgorithm, graph: &Graph) -> Self {
        let mut warnings = Vec::new();
        if graph.directed() {
            warnings.push(
                Warning::DirectedSpanningTree {
                    algorithm: algorithm.to_string(),
                }
                .log(),
            );
        }
        SpanningTree {
            algorithm,
            nodes: BTreeMap::new(),
            warnings,
        }
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn tree_node(&self, node: NodeId) -> Option<&TreeNode> {
        self.nodes.get(&node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every tree node, roots included
    pub fn tree_nodes(&self) -> impl Iterator<Item = &TreeNode> {
        self.nodes.values()
    }

    /// Tree nodes that hang off a parent, i.e. the tree's edges
    pub fn edges(&self) -> impl Iterator<Item = &TreeNode> {
        self.nodes.values().filter(|t| t.parent.is_some())
    }

    pub fn total_weight(&self) -> Weight {
        self.edges().map(|t| t.weight).sum()
    }

    /// Number of separate trees in the forest
    pub fn tree_count(&self) -> usize {
        self.nodes.values().filter(|t| t.parent.is_none()).count()
    }

    fn insert(&mut self, tree_node: TreeNode) {
        self.nodes.insert(tree_node.node, tree_node);
    }

    fn set_of(&self, node: NodeId) -> Option<usize> {
        self.nodes.get(&node).map(|t| t.set)
    }

    /// Merge v's set into u's and hang v's tree under u
    ///
    /// Relabels every node of v's set, O(n) per union. v's tree is re-rooted
    /// at v first so that no existing tree edge is lost.
    fn union(&mut self, u: NodeId, v: NodeId, weight: Weight) {
        let (Some(u_set), Some(v_set)) = (self.set_of(u), self.set_of(v)) else {
            return;
        };
        for tree_node in self.nodes.values_mut() {
            if tree_node.set == v_set {
                tree_node.set = u_set;
            }
        }

        self.reroot(v);
        if let Some(tree_node) = self.nodes.get_mut(&v) {
            tree_node.parent = Some(u);
            tree_node.weight = weight;
        }
    }

    /// Reverse the parent links on the path from `node` to its root
    fn reroot(&mut self, node: NodeId) {
        let Some(start) = self.nodes.get(&node).copied() else {
            return;
        };
        let mut child = node;
        let mut parent = start.parent;
        let mut weight = start.weight;

        while let Some(p) = parent {
            let Some(next) = self.nodes.get_mut(&p) else {
                break;
            };
            let (next_parent, next_weight) = (next.parent, next.weight);
            next.parent = Some(child);
            next.weight = weight;
            child = p;
            parent = next_parent;
            weight = next_weight;
        }

        if let Some(tree_node) = self.nodes.get_mut(&node) {
            tree_node.parent = None;
            tree_node.weight = 0;
        }
    }
}

/// Kruskal's algorithm
///
/// Produces a spanning forest when the graph is disconnected.
#[tracing::instrument(skip_all, fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn kruskal(graph: &Graph) -> Result<SpanningTree> {
    bail_empty!(graph, "kruskal");
    let start = Instant::now();
    let mut tree = SpanningTree::new(MstAlgorithm::Kruskal, graph);

    for (index, node) in graph.nodes().enumerate() {
        tree.insert(TreeNode::root(node, index + 1));
    }

    let mut sorted: Vec<EdgeKey> = graph.edges().map(|e| graph.edge_key(e)).collect();
    sorted.sort();

    for key in sorted {
        let edge = graph.edge(key.id());
        let (u, v) = (edge.n1(), edge.n2());
        if tree.set_of(u) != tree.set_of(v) {
            tracing::trace!(edge = key.name(), weight = edge.cost(), "kruskal_union");
            tree.union(u, v, edge.cost());
        }
    }

    trace_time!(start, "kruskal", total_weight = tree.total_weight());
    Ok(tree)
}

/// Prim's algorithm, grown from the first node by name
///
/// The frontier heap tolerates duplicate entries; an edge whose endpoints
/// are both in the tree by the time it is popped is skipped.
#[tracing::instrument(skip_all, fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn prim(graph: &Graph) -> Result<SpanningTree> {
    bail_empty!(graph, "prim");
    let first = graph
        .nodes()
        .next()
        .ok_or_else(|| GraphError::empty_graph("prim"))?;
    let start = Instant::now();
    let mut tree = SpanningTree::new(MstAlgorithm::Prim, graph);
    let mut frontier: MinHeap<EdgeKey> = MinHeap::new();

    tree.insert(TreeNode::root(first, 0));
    push_frontier(graph, &tree, first, &mut frontier);

    while let Some(key) = frontier.pop() {
        let edge = graph.edge(key.id());
        let (n1, n2) = (edge.n1(), edge.n2());
        let (inside, outside) = match (tree.contains(n1), tree.contains(n2)) {
            (true, false) => (n1, n2),
            (false, true) => (n2, n1),
            _ => continue,
        };

        tracing::trace!(edge = key.name(), weight = edge.cost(), "prim_grow");
        tree.insert(TreeNode {
            node: outside,
            parent: Some(inside),
            weight: edge.cost(),
            set: 0,
        });
        push_frontier(graph, &tree, outside, &mut frontier);
    }

    trace_time!(start, "prim", total_weight = tree.total_weight());
    Ok(tree)
}

/// Queue every edge of `node` that leads outside the tree
fn push_frontier(
    graph: &Graph,
    tree: &SpanningTree,
    node: NodeId,
    frontier: &mut MinHeap<EdgeKey>,
) {
    for e in graph.incident_edges(node) {
        let edge = graph.edge(e);
        if !tree.contains(edge.n1()) || !tree.contains(edge.n2()) {
            frontier.push(graph.edge_key(e));
        }
    }
}

/// Run the chosen spanning tree algorithm
pub fn minimum_spanning_tree(graph: &Graph, algorithm: MstAlgorithm) -> Result<SpanningTree> {
    match algorithm {
        MstAlgorithm::Kruskal => kruskal(graph),
        MstAlgorithm::Prim => prim(graph),
    }
}
