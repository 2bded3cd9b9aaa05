//! Depth-first search and topological sort
//!
//! Both walks keep an explicit stack of frames instead of recursing, so graph
//! depth is bounded by memory rather than by the call stack.

use serde::Serialize;
use std::time::Instant;

use crate::bail_not_directed;
use crate::error::{GraphError, Result, Warning};
use crate::graph::types::{Mark, Marks, NodeId};
use crate::graph::Graph;
use crate::trace_time;

/// Whether a trace event opens or closes a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Visiting,
    Visited,
}

/// One step of a depth-first search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TraceEvent {
    pub kind: TraceKind,
    pub node: NodeId,
    /// Nesting depth below the root (root = 0)
    pub depth: usize,
}

/// Ordered visit/leave events of a search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trace {
    pub root: NodeId,
    pub events: Vec<TraceEvent>,
}

impl Trace {
    /// Nodes in the order they were first entered
    pub fn discovery_order(&self) -> Vec<NodeId> {
        self.events_of(TraceKind::Visiting)
    }

    /// Nodes in the order they were finished
    pub fn finishing_order(&self) -> Vec<NodeId> {
        self.events_of(TraceKind::Visited)
    }

    fn events_of(&self, kind: TraceKind) -> Vec<NodeId> {
        self.events
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.node)
            .collect()
    }
}

/// Nodes bucketed by the recursion depth at which they finished
///
/// Roots of the walk land in level 0, their first-time descendants one level
/// deeper, and so on. This approximates a topological order: it is not a
/// strict total order, and a node first reached from an earlier root keeps
/// the level it got there.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TopologicalOrder {
    pub levels: Vec<Vec<NodeId>>,
    pub warnings: Vec<Warning>,
}

impl TopologicalOrder {
    fn place(&mut self, node: NodeId, depth: usize) {
        if self.levels.len() <= depth {
            self.levels.resize_with(depth + 1, Vec::new);
        }
        self.levels[depth].push(node);
    }

    pub fn level_of(&self, node: NodeId) -> Option<usize> {
        self.levels.iter().position(|level| level.contains(&node))
    }

    /// `(level, nodes)` for every level that has members
    pub fn non_empty_levels(&self) -> impl Iterator<Item = (usize, &[NodeId])> {
        self.levels
            .iter()
            .enumerate()
            .filter(|(_, nodes)| !nodes.is_empty())
            .map(|(level, nodes)| (level, nodes.as_slice()))
    }

    pub fn has_cycle(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, Warning::CycleDetected { .. }))
    }
}

/// A node being explored and how far through its neighbors the walk is
struct Frame {
    node: NodeId,
    depth: usize,
    neighbors: Vec<NodeId>,
    cursor: usize,
}

impl Frame {
    fn next_neighbor(&mut self) -> Option<NodeId> {
        let next = self.neighbors.get(self.cursor).copied();
        self.cursor += 1;
        next
    }
}

/// Depth-first walks over a borrowed graph
pub struct Dfs<'g> {
    graph: &'g Graph,
    marks: Marks,
}

impl<'g> Dfs<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Dfs {
            graph,
            marks: Marks::new(graph.node_count()),
        }
    }

    /// Mark `node` in progress and open a frame over its neighbors
    fn enter(&mut self, node: NodeId, depth: usize) -> Frame {
        self.marks.set(node, Mark::InProgress);
        Frame {
            node,
            depth,
            neighbors: self.graph.neighbors(node).map(|(n, _)| n).collect(),
            cursor: 0,
        }
    }

    /// Visit every node reachable from `root`, recording the walk
    ///
    /// Panics if `root` belongs to another graph; `search_by_name` checks.
    #[tracing::instrument(skip(self))]
    pub fn search(&mut self, root: NodeId) -> Trace {
        let start = Instant::now();
        self.marks.reset(self.graph.node_count());

        let mut events = vec![TraceEvent {
            kind: TraceKind::Visiting,
            node: root,
            depth: 0,
        }];
        let mut stack = vec![self.enter(root, 0)];

        while let Some(frame) = stack.last_mut() {
            match frame.next_neighbor() {
                Some(next) => {
                    if self.marks.get(next) != Mark::Unvisited {
                        continue;
                    }
                    let depth = frame.depth + 1;
                    events.push(TraceEvent {
                        kind: TraceKind::Visiting,
                        node: next,
                        depth,
                    });
                    let child = self.enter(next, depth);
                    stack.push(child);
                }
                None => {
                    let (node, depth) = (frame.node, frame.depth);
                    stack.pop();
                    self.marks.set(node, Mark::Done);
                    events.push(TraceEvent {
                        kind: TraceKind::Visited,
                        node,
                        depth,
                    });
                }
            }
        }

        trace_time!(start, "dfs_search", events = events.len());
        Trace { root, events }
    }

    /// Search from the node called `name`
    pub fn search_by_name(&mut self, name: &str) -> Result<Trace> {
        let root = self
            .graph
            .find_node(name)
            .ok_or_else(|| GraphError::node_not_found(name))?;
        Ok(self.search(root))
    }

    /// Bucket every node by the depth at which its DFS finished
    ///
    /// Only defined for directed graphs. Re-entering a node that is still in
    /// progress records a cycle warning and abandons that branch; the rest of
    /// the graph is still sorted.
    #[tracing::instrument(skip(self))]
    pub fn topological_sort(&mut self) -> Result<TopologicalOrder> {
        bail_not_directed!(self.graph, "topological sort");

        let start = Instant::now();
        let node_count = self.graph.node_count();
        self.marks.reset(node_count);

        let mut order = TopologicalOrder {
            levels: vec![Vec::new(); node_count],
            warnings: Vec::new(),
        };
        let graph = self.graph;
        for root in graph.nodes() {
            if !self.marks.is_done(root) {
                self.levelize(root, &mut order);
            }
        }

        trace_time!(start, "topological_sort", cycles = order.warnings.len());
        Ok(order)
    }

    fn levelize(&mut self, root: NodeId, order: &mut TopologicalOrder) {
        let mut stack = vec![self.enter(root, 0)];

        while let Some(frame) = stack.last_mut() {
            match frame.next_neighbor() {
                Some(next) => match self.marks.get(next) {
                    Mark::Done => {}
                    Mark::InProgress => {
                        let node = self.graph.node_name(next).to_string();
                        order.warnings.push(Warning::CycleDetected { node }.log());
                    }
                    Mark::Unvisited => {
                        let depth = frame.depth + 1;
                        let child = self.enter(next, depth);
                        stack.push(child);
                    }
                },
                None => {
                    let (node, depth) = (frame.node, frame.depth);
                    stack.pop();
                    self.marks.set(node, Mark::Done);
                    order.place(node, depth);
                }
            }
        }
    }
}
