use std::time::Instant;

use crate::error::{GraphError, Result};
use crate::graph::algos::shared::{queued, PathTree, QueueEntry};
use crate::graph::types::NodeId;
use crate::graph::Graph;
use crate::heap::MinHeap;
use crate::trace_time;

/// Single-source shortest paths over a borrowed graph
///
/// Directed graphs follow outgoing edges only. Unweighted edges cost 1.
pub struct Dijkstra<'g> {
    graph: &'g Graph,
}

impl<'g> Dijkstra<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Dijkstra { graph }
    }

    /// Distances and predecessors from `source` to every node
    ///
    /// A node is queued only when it is not queued already. Its queue entry
    /// keeps the priority it was pushed with; the distance recorded in the
    /// tree is the authoritative one.
    ///
    /// # Panics
    ///
    /// If `source` was not handed out by this graph; `build_by_name` checks.
    #[tracing::instrument(skip(self), fields(nodes = self.graph.node_count()))]
    pub fn build(&self, source: NodeId) -> PathTree {
        let start = Instant::now();
        let graph = self.graph;
        let mut tree = PathTree::new(graph, source);
        let mut queue: MinHeap<QueueEntry> = MinHeap::new();
        queue.push(QueueEntry::new(0, source));

        while let Some(entry) = queue.pop() {
            let current = entry.node;
            for (next, edge) in graph.neighbors(current) {
                let weight = graph.edge(edge).cost();
                if !tree.relax(graph, current, next, weight) {
                    continue;
                }
                tracing::trace!(
                    from = graph.node_name(current),
                    to = graph.node_name(next),
                    distance = tree.distance(next),
                    "dijkstra_relax"
                );
                if queued(&queue, next).is_none() {
                    queue.push(QueueEntry::new(tree.distance(next), next));
                }
            }
        }

        trace_time!(start, "dijkstra", reached = tree.reached().count());
        tree
    }

    /// [`Dijkstra::build`] with the source given by name
    pub fn build_by_name(&self, source: &str) -> Result<PathTree> {
        let node = self
            .graph
            .find_node(source)
            .ok_or_else(|| GraphError::node_not_found(source))?;
        Ok(self.build(node))
    }
}
