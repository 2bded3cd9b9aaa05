//! Strongly connected components (Kosaraju)
//!
//! 1. DFS every node, pushing each one onto a stack as it finishes.
//! 2. Transpose the graph.
//! 3. Pop the stack; every node not yet assigned starts a DFS over the
//!    transposed graph, and everything it reaches is one component.
//! 4. Transpose back.

use serde::Serialize;
use std::time::Instant;

use crate::bail_not_directed;
use crate::error::Result;
use crate::graph::transpose::Transposed;
use crate::graph::types::{Mark, Marks, NodeId};
use crate::graph::Graph;
use crate::trace_time;

/// Strongly connected components in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Components {
    pub groups: Vec<Vec<NodeId>>,
}

impl Components {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Index of the component containing `node`
    pub fn component_of(&self, node: NodeId) -> Option<usize> {
        self.groups.iter().position(|group| group.contains(&node))
    }
}

/// Kosaraju's two-pass component search
#[derive(Debug, Default)]
pub struct Kosaraju {
    marks: Marks,
    finished: Vec<NodeId>,
}

impl Kosaraju {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the strongly connected components of a directed graph
    ///
    /// The graph is transposed while the second pass runs and restored
    /// before this returns.
    #[tracing::instrument(skip_all, fields(nodes = graph.node_count(), edges = graph.edge_count()))]
    pub fn build(&mut self, graph: &mut Graph) -> Result<Components> {
        bail_not_directed!(graph, "strongly connected components");
        let start = Instant::now();

        self.marks.reset(graph.node_count());
        self.finished.clear();
        let roots: Vec<NodeId> = graph.nodes().collect();
        for root in roots {
            if self.marks.get(root) == Mark::Unvisited {
                self.fill_finishing_stack(graph, root);
            }
        }

        let reversed = Transposed::new(graph);
        self.marks.reset(reversed.node_count());

        let mut components = Components::default();
        while let Some(node) = self.finished.pop() {
            if self.marks.get(node) != Mark::Unvisited {
                continue;
            }
            let group = self.collect_component(&reversed, node);
            components.groups.push(group);
        }
        drop(reversed);

        trace_time!(start, "kosaraju", components = components.len());
        tracing::debug!(components = components.len(), "scc_built");
        Ok(components)
    }

    /// First pass: DFS from `root`, recording nodes as they finish
    fn fill_finishing_stack(&mut self, graph: &Graph, root: NodeId) {
        self.marks.set(root, Mark::InProgress);
        let mut stack = vec![(root, pending_neighbors(graph, root))];

        while let Some((node, pending)) = stack.last_mut() {
            match pending.pop() {
                Some(next) => {
                    if self.marks.get(next) == Mark::Unvisited {
                        self.marks.set(next, Mark::InProgress);
                        stack.push((next, pending_neighbors(graph, next)));
                    }
                }
                None => {
                    let node = *node;
                    stack.pop();
                    self.marks.set(node, Mark::Done);
                    self.finished.push(node);
                }
            }
        }
    }

    /// Second pass: every node reachable from `root` over the transposed graph
    fn collect_component(&mut self, graph: &Graph, root: NodeId) -> Vec<NodeId> {
        let mut group = vec![root];
        self.marks.set(root, Mark::InProgress);
        let mut stack = vec![(root, pending_neighbors(graph, root))];

        while let Some((node, pending)) = stack.last_mut() {
            match pending.pop() {
                Some(next) => {
                    if self.marks.get(next) == Mark::Unvisited {
                        self.marks.set(next, Mark::InProgress);
                        group.push(next);
                        stack.push((next, pending_neighbors(graph, next)));
                    }
                }
                None => {
                    let node = *node;
                    stack.pop();
                    self.marks.set(node, Mark::Done);
                }
            }
        }
        group
    }
}

/// Neighbors of `node` reversed, so popping yields them in incidence order
fn pending_neighbors(graph: &Graph, node: NodeId) -> Vec<NodeId> {
    let mut pending: Vec<NodeId> = graph.neighbors(node).map(|(n, _)| n).collect();
    pending.reverse();
    pending
}

/// Run Kosaraju on `graph` with a fresh instance
pub fn strongly_connected_components(graph: &mut Graph) -> Result<Components> {
    Kosaraju::new().build(graph)
}

#[cfg(test)]
mod tests;
