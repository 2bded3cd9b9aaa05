//! Edge-direction reversal
//!
//! The transpose of a directed graph has the same nodes with every edge
//! reversed. An undirected graph is its own transpose.

use std::ops::{Deref, DerefMut};

use crate::error::Warning;
use crate::graph::Graph;

/// Reverse every edge of `graph` in place
///
/// Returns a warning, and leaves the graph untouched, when it is undirected.
pub fn transpose_in_place(graph: &mut Graph) -> Option<Warning> {
    if !graph.directed() {
        return Some(Warning::UndirectedTranspose.log());
    }
    graph.reverse_edges();
    tracing::trace!(edges = graph.edge_count(), "graph_transposed");
    None
}

/// Copy `graph` and transpose the copy, leaving the original untouched
pub fn transposed(graph: &Graph) -> (Graph, Option<Warning>) {
    let mut copy = graph.clone();
    let warning = transpose_in_place(&mut copy);
    (copy, warning)
}

/// Holds a graph transposed for as long as the guard lives
///
/// The original orientation is restored when the guard is dropped, on every
/// exit path.
pub struct Transposed<'g> {
    graph: &'g mut Graph,
}

impl<'g> Transposed<'g> {
    pub fn new(graph: &'g mut Graph) -> Self {
        transpose_in_place(graph);
        Transposed { graph }
    }
}

impl Deref for Transposed<'_> {
    type Target = Graph;

    fn deref(&self) -> &Graph {
        self.graph
    }
}

impl DerefMut for Transposed<'_> {
    fn deref_mut(&mut self) -> &mut Graph {
        self.graph
    }
}

impl Drop for Transposed<'_> {
    fn drop(&mut self) {
        transpose_in_place(self.graph);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge_list(graph: &Graph) -> Vec<String> {
        graph.edges().map(|e| graph.edge_name(e)).collect()
    }

    #[test]
    fn test_transpose_reverses_directed_edges() {
        let mut graph = Graph::from_triples(true, [("A", "B", Some(1)), ("B", "C", Some(2))]);
        assert!(transpose_in_place(&mut graph).is_none());

        assert_eq!(edge_list(&graph), ["B A", "C B"]);
        let a = graph.find_node("A").unwrap();
        let c = graph.find_node("C").unwrap();
        assert_eq!(graph.node(a).degree(), 0);
        assert_eq!(graph.node(c).degree(), 1);
        assert!(graph.find_edge(c, graph.find_node("B").unwrap()).is_some());
    }

    #[test]
    fn test_transpose_twice_restores_graph() {
        let mut graph = Graph::from_triples(
            true,
            [("A", "B", Some(4)), ("B", "C", None), ("C", "A", Some(1))],
        );
        let before = edge_list(&graph);

        transpose_in_place(&mut graph);
        transpose_in_place(&mut graph);

        assert_eq!(edge_list(&graph), before);
    }

    #[test]
    fn test_transposed_copy_leaves_original() {
        let graph = Graph::from_triples(true, [("A", "B", Some(5))]);
        let (copy, warning) = transposed(&graph);

        assert!(warning.is_none());
        assert_eq!(edge_list(&graph), ["A B"]);
        assert_eq!(edge_list(&copy), ["B A"]);
        assert!(copy.directed());
        let edge = copy.edges().next().unwrap();
        assert_eq!(copy.edge(edge).weight(), Some(5));
    }

    #[test]
    fn test_undirected_transpose_is_noop() {
        let mut graph = Graph::from_triples(false, [("A", "B", None)]);
        assert_eq!(
            transpose_in_place(&mut graph),
            Some(Warning::UndirectedTranspose)
        );
        assert_eq!(edge_list(&graph), ["A B"]);

        let (copy, warning) = transposed(&graph);
        assert_eq!(warning, Some(Warning::UndirectedTranspose));
        assert_eq!(edge_list(&copy), ["A B"]);
    }

    #[test]
    fn test_guard_restores_on_drop() {
        let mut graph = Graph::from_triples(true, [("A", "B", None)]);
        {
            let reversed = Transposed::new(&mut graph);
            assert_eq!(edge_list(&reversed), ["B A"]);
        }
        assert_eq!(edge_list(&graph), ["A B"]);
    }
}
