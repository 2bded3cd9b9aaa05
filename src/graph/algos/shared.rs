//! Path tree shared by the shortest path algorithms

use serde::Serialize;

use crate::error::{GraphError, Result, Warning};
use crate::graph::types::{NodeId, Weight, INFINITE_DISTANCE};
use crate::graph::Graph;
use crate::heap::MinHeap;

/// A node's entry in a path tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PathNode {
    pub node: NodeId,
    pub predecessor: Option<NodeId>,
    /// Cost of the edge from `predecessor`
    pub weight: Weight,
    /// Cumulative distance from the source, `INFINITE_DISTANCE` if unreached
    pub distance: Weight,
}

/// Predecessor and distance table produced by a shortest path search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathTree {
    pub source: NodeId,
    nodes: Vec<PathNode>,
    #[serde(skip)]
    improvements: Vec<usize>,
    pub warnings: Vec<Warning>,
}

impl PathTree {
    /// Every node unreached except `source`, which sits at distance 0
    pub(crate) fn new(graph: &Graph, source: NodeId) -> Self {
        let mut nodes: Vec<PathNode> = (0..graph.node_count())
            .map(|index| PathNode {
                node: NodeId::new(index),
                predecessor: None,
                weight: 0,
                distance: INFINITE_DISTANCE,
            })
            .collect();
        nodes[source.index()].distance = 0;

        PathTree {
            source,
            improvements: vec![0; nodes.len()],
            nodes,
            warnings: Vec::new(),
        }
    }

    pub fn path_node(&self, node: NodeId) -> &PathNode {
        &self.nodes[node.index()]
    }

    pub fn distance(&self, node: NodeId) -> Weight {
        self.path_node(node).distance
    }

    pub fn predecessor(&self, node: NodeId) -> Option<NodeId> {
        self.path_node(node).predecessor
    }

    pub fn is_reachable(&self, node: NodeId) -> bool {
        self.distance(node) != INFINITE_DISTANCE
    }

    /// All entries, indexed by node handle
    pub fn path_nodes(&self) -> impl Iterator<Item = &PathNode> {
        self.nodes.iter()
    }

    /// Entries with a finite distance
    pub fn reached(&self) -> impl Iterator<Item = &PathNode> {
        self.nodes.iter().filter(|p| p.distance != INFINITE_DISTANCE)
    }

    /// Try to improve `to` through the edge `from -> to`
    ///
    /// Returns true on a strict improvement. A node may improve at most once
    /// per node in the graph; beyond that a negative cycle is feeding it and
    /// it is frozen with a warning.
    pub(crate) fn relax(
        &mut self,
        graph: &Graph,
        from: NodeId,
        to: NodeId,
        weight: Weight,
    ) -> bool {
        let base = self.distance(from);
        if base == INFINITE_DISTANCE {
            return false;
        }
        let candidate = base.saturating_add(weight);
        if candidate >= self.distance(to) {
            return false;
        }

        let limit = self.nodes.len();
        let count = &mut self.improvements[to.index()];
        if *count >= limit {
            if *count == limit {
                *count += 1;
                self.warnings.push(
                    Warning::NegativeCycle {
                        node: graph.node_name(to).to_string(),
                    }
                    .log(),
                );
            }
            return false;
        }
        *count += 1;

        let entry = &mut self.nodes[to.index()];
        entry.predecessor = Some(from);
        entry.weight = weight;
        entry.distance = candidate;
        true
    }

    /// Walk predecessors back from `destination` to the source
    pub fn route(&self, graph: &Graph, destination: NodeId) -> Result<Route> {
        let no_path =
            || GraphError::no_path(graph.node_name(self.source), graph.node_name(destination));

        let mut steps = Vec::new();
        let mut current = destination;
        while current != self.source {
            // a predecessor chain longer than the graph is a loop
            if steps.len() >= self.nodes.len() {
                return Err(no_path());
            }
            let entry = self.path_node(current);
            let from = entry.predecessor.ok_or_else(no_path)?;
            steps.push(RouteStep {
                from,
                to: current,
                weight: entry.weight,
            });
            current = from;
        }
        steps.reverse();

        Ok(Route {
            source: self.source,
            destination,
            distance: self.distance(destination),
            steps,
        })
    }
}

/// One edge of a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteStep {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: Weight,
}

/// Point-to-point path from the source of a path tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub source: NodeId,
    pub destination: NodeId,
    pub steps: Vec<RouteStep>,
    pub distance: Weight,
}

impl Route {
    /// Nodes along the route, source first
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes = vec![self.source];
        nodes.extend(self.steps.iter().map(|step| step.to));
        nodes
    }
}

/// Priority queue entry, ordered by priority then node handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct QueueEntry {
    pub priority: Weight,
    pub node: NodeId,
}

impl QueueEntry {
    pub fn new(priority: Weight, node: NodeId) -> Self {
        QueueEntry { priority, node }
    }
}

/// The queued entry for `node`, if any
pub(crate) fn queued(queue: &MinHeap<QueueEntry>, node: NodeId) -> Option<QueueEntry> {
    queue.find(|entry| entry.node == node).copied()
}
