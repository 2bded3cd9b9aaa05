//! Point-to-point shortest paths (A*)
//!
//! The distance-to-goal estimate comes from a relaxation pass out of the
//! source: with `h_x[v]` the distance from the source to `v`,
//! `estimate(v) = max(0, h_x[dst] - h_x[v])`. The triangle inequality makes
//! that a lower bound on the remaining distance whenever `h_x` is exact.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Instant;

use crate::error::{GraphError, Result, Warning};
use crate::graph::algos::dijkstra::Dijkstra;
use crate::graph::algos::shared::{queued, PathTree, QueueEntry};
use crate::graph::types::{NodeId, Weight, INFINITE_DISTANCE};
use crate::graph::Graph;
use crate::heap::MinHeap;
use crate::trace_time;

/// How the `h_x` table is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeuristicMode {
    /// Re-queue a node whenever its entry improves; `h_x` holds true distances
    #[default]
    Exact,
    /// Dequeue each node once; later improvements are not propagated and the
    /// estimate may overshoot
    SinglePass,
}

impl std::str::FromStr for HeuristicMode {
    type Err = GraphError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exact" => Ok(HeuristicMode::Exact),
            "single-pass" | "single_pass" => Ok(HeuristicMode::SinglePass),
            other => Err(GraphError::unsupported(
                "heuristic mode",
                other,
                "exact, single-pass",
            )),
        }
    }
}

impl std::fmt::Display for HeuristicMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeuristicMode::Exact => write!(f, "exact"),
            HeuristicMode::SinglePass => write!(f, "single-pass"),
        }
    }
}

/// A* search over a borrowed graph
pub struct AStar<'g> {
    graph: &'g Graph,
    heuristic: HeuristicMode,
}

impl<'g> AStar<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        AStar {
            graph,
            heuristic: HeuristicMode::default(),
        }
    }

    pub fn with_heuristic(mut self, heuristic: HeuristicMode) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// FIFO relaxation from `source` over the incidence sets
    ///
    /// Returns `h_x`, indexed by node handle. Nodes the source cannot reach
    /// stay at `INFINITE_DISTANCE`.
    pub fn heuristic_table(&self, source: NodeId) -> Vec<Weight> {
        let graph = self.graph;
        let count = graph.node_count();
        let mut table = vec![INFINITE_DISTANCE; count];
        let mut in_queue = vec![false; count];
        let mut dequeued = vec![0usize; count];
        let mut fifo = VecDeque::from([source]);
        table[source.index()] = 0;
        in_queue[source.index()] = true;

        while let Some(node) = fifo.pop_front() {
            in_queue[node.index()] = false;
            dequeued[node.index()] += 1;
            // more dequeues than nodes only happens on a negative cycle
            if dequeued[node.index()] > count {
                continue;
            }

            for (next, edge) in graph.neighbors(node) {
                let candidate = table[node.index()].saturating_add(graph.edge(edge).cost());
                if candidate >= table[next.index()] {
                    continue;
                }
                table[next.index()] = candidate;

                let revisit = match self.heuristic {
                    HeuristicMode::Exact => true,
                    HeuristicMode::SinglePass => dequeued[next.index()] == 0,
                };
                if revisit && !in_queue[next.index()] {
                    in_queue[next.index()] = true;
                    fifo.push_back(next);
                }
            }
        }
        table
    }

    /// Shortest path tree from `source`, explored until `destination` is settled
    ///
    /// Entries for nodes off the explored region may be partial; only the
    /// destination's distance and its predecessor chain are final.
    ///
    /// # Panics
    ///
    /// If either handle was not handed out by this graph; `shortest_path`
    /// resolves names first.
    #[tracing::instrument(skip(self), fields(nodes = self.graph.node_count(), heuristic = %self.heuristic))]
    pub fn build(&self, source: NodeId, destination: NodeId) -> PathTree {
        let start = Instant::now();
        let graph = self.graph;
        let table = self.heuristic_table(source);
        let goal = table[destination.index()];
        let estimate = |node: NodeId| -> Weight {
            if goal == INFINITE_DISTANCE {
                return 0;
            }
            goal.saturating_sub(table[node.index()]).max(0)
        };

        let mut tree = PathTree::new(graph, source);
        let mut queue: MinHeap<QueueEntry> = MinHeap::new();
        queue.push(QueueEntry::new(estimate(source), source));
        let mut expanded = 0usize;

        while let Some(top) = queue.peek() {
            if top.priority >= tree.distance(destination) {
                break;
            }
            let Some(entry) = queue.pop() else {
                break;
            };
            expanded += 1;
            let current = entry.node;

            for (next, edge) in graph.neighbors(current) {
                let weight = graph.edge(edge).cost();
                if !tree.relax(graph, current, next, weight) {
                    continue;
                }
                let priority = tree.distance(next).saturating_add(estimate(next));
                tracing::trace!(
                    from = graph.node_name(current),
                    to = graph.node_name(next),
                    priority,
                    "astar_relax"
                );

                match queued(&queue, next) {
                    Some(old) if old.priority > priority => {
                        queue.erase(&old);
                        queue.push(QueueEntry::new(priority, next));
                    }
                    Some(_) => {}
                    None => queue.push(QueueEntry::new(priority, next)),
                }
            }
        }

        trace_time!(start, "astar", expanded = expanded);
        tree
    }
}

/// Resolve names and run the matching search
///
/// With a destination this runs A*; without one, or when the destination is
/// unknown, it falls back to single-source Dijkstra. An unknown destination
/// is reported as a warning in the returned tree.
pub fn shortest_path(
    graph: &Graph,
    source: &str,
    destination: Option<&str>,
    heuristic: HeuristicMode,
) -> Result<PathTree> {
    let src = graph
        .find_node(source)
        .ok_or_else(|| GraphError::node_not_found(source))?;

    let Some(name) = destination else {
        return Ok(Dijkstra::new(graph).build(src));
    };
    match graph.find_node(name) {
        Some(dst) => Ok(AStar::new(graph).with_heuristic(heuristic).build(src, dst)),
        None => {
            let mut tree = Dijkstra::new(graph).build(src);
            tree.warnings.push(
                Warning::UnknownDestination {
                    name: name.to_string(),
                }
                .log(),
            );
            Ok(tree)
        }
    }
}
