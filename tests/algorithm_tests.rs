//! Integration tests for the graph algorithms
//!
//! These run the public API end to end on the scenarios the engine is
//! expected to handle.

mod common;

use bga::graph::algos::{
    kruskal, minimum_spanning_tree, prim, shortest_path, strongly_connected_components, AStar,
    Dfs, Dijkstra, HeuristicMode, MstAlgorithm,
};
use bga::graph::{transpose_in_place, transposed, Graph, INFINITE_DISTANCE};
use bga::{GraphError, Warning};
use common::{node, scattered, unweighted, weighted};

// ============================================================================
// Graph model
// ============================================================================

#[test]
fn test_add_node_and_edge_are_idempotent() {
    let mut graph = Graph::new(false);
    let a = graph.add_node("A");
    let b = graph.add_node("B");
    let first = graph.add_edge(a, b, Some(3));

    assert_eq!(graph.add_node("A"), a);
    assert_eq!(graph.add_edge(b, a, Some(9)), first);
    assert_eq!(graph.connect("A", "B", None), first);
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.edge(first).weight(), Some(3));
}

#[test]
fn test_negative_weight_is_accepted_with_warning() {
    let graph = weighted(true, &[("A", "B", -4)]);
    assert_eq!(graph.edge_count(), 1);
    assert!(matches!(
        graph.warnings(),
        [Warning::NegativeWeight { weight: -4, .. }]
    ));
}

// ============================================================================
// Traversal
// ============================================================================

#[test]
fn test_search_visits_each_reachable_node_once() {
    let graph = scattered(true, 30, 70, 7);
    let root = node(&graph, "n00");
    let trace = Dfs::new(&graph).search(root);
    let order = trace.discovery_order();

    let mut unique = order.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), order.len());
    assert_eq!(order.first(), Some(&root));
    assert_eq!(trace.finishing_order().len(), order.len());
}

#[test]
fn test_topological_sort_on_cycle_completes() {
    let graph = unweighted(true, &[("A", "B"), ("B", "A")]);
    let order = Dfs::new(&graph).topological_sort().unwrap();

    assert!(order.has_cycle());
    let placed: usize = order.levels.iter().map(Vec::len).sum();
    assert_eq!(placed, 2);
}

#[test]
fn test_topological_sort_rejects_undirected() {
    let graph = unweighted(false, &[("A", "B")]);
    assert!(matches!(
        Dfs::new(&graph).topological_sort(),
        Err(GraphError::NotDirected { .. })
    ));
}

// ============================================================================
// Transpose and SCC
// ============================================================================

#[test]
fn test_double_transpose_is_identity() {
    let mut graph = weighted(true, &[("A", "B", 1), ("B", "C", 2), ("C", "A", 3)]);
    let edges = |g: &Graph| -> Vec<String> { g.edges().map(|e| g.edge_name(e)).collect() };
    let before = edges(&graph);

    assert!(transpose_in_place(&mut graph).is_none());
    assert_eq!(edges(&graph), ["B A", "C B", "A C"]);
    transpose_in_place(&mut graph);
    assert_eq!(edges(&graph), before);
}

#[test]
fn test_transposed_copy_leaves_original() {
    let graph = unweighted(true, &[("A", "B")]);
    let (copy, warning) = transposed(&graph);

    assert!(warning.is_none());
    assert!(copy.find_edge(node(&copy, "B"), node(&copy, "A")).is_some());
    assert!(graph.find_edge(node(&graph, "A"), node(&graph, "B")).is_some());
    assert!(graph.find_edge(node(&graph, "B"), node(&graph, "A")).is_none());
}

#[test]
fn test_two_cycle_is_one_component() {
    let mut graph = unweighted(true, &[("A", "B"), ("B", "A")]);
    let components = strongly_connected_components(&mut graph).unwrap();

    assert_eq!(components.len(), 1);
    assert_eq!(components.groups[0].len(), 2);
}

#[test]
fn test_components_partition_nodes() {
    let mut graph = scattered(true, 25, 40, 11);
    let components = strongly_connected_components(&mut graph).unwrap();

    let total: usize = components.groups.iter().map(Vec::len).sum();
    assert_eq!(total, graph.node_count());
    for id in graph.nodes() {
        assert!(components.component_of(id).is_some());
    }
}

// ============================================================================
// Spanning trees
// ============================================================================

#[test]
fn test_triangle_spanning_tree() {
    let graph = weighted(false, &[("A", "B", 1), ("B", "C", 2), ("A", "C", 4)]);
    for algorithm in [MstAlgorithm::Kruskal, MstAlgorithm::Prim] {
        let tree = minimum_spanning_tree(&graph, algorithm).unwrap();
        assert_eq!(tree.total_weight(), 3, "{}", algorithm);
        assert_eq!(tree.edges().count(), 2);
    }
}

#[test]
fn test_kruskal_and_prim_weights_match_on_connected_graphs() {
    for seed in 1..=8 {
        let mut graph = scattered(false, 15, 45, seed);
        // chain every node so the graph is connected
        for i in 1..15 {
            graph.connect(&format!("n{:02}", i - 1), &format!("n{:02}", i), Some(25));
        }

        let by_kruskal = kruskal(&graph).unwrap();
        let by_prim = prim(&graph).unwrap();
        assert_eq!(by_kruskal.total_weight(), by_prim.total_weight(), "seed {}", seed);
        assert_eq!(by_kruskal.tree_count(), 1);
        assert_eq!(by_prim.len(), graph.node_count());
    }
}

#[test]
fn test_spanning_tree_on_empty_graph() {
    let graph = Graph::new(false);
    assert!(matches!(
        minimum_spanning_tree(&graph, MstAlgorithm::Prim),
        Err(GraphError::EmptyGraph { .. })
    ));
}

// ============================================================================
// Shortest paths
// ============================================================================

#[test]
fn test_dijkstra_prefers_two_hop_path() {
    let graph = weighted(true, &[("A", "B", 1), ("B", "C", 1), ("A", "C", 5)]);
    let tree = Dijkstra::new(&graph).build(node(&graph, "A"));

    assert_eq!(tree.distance(node(&graph, "C")), 2);
    assert_eq!(tree.predecessor(node(&graph, "C")), Some(node(&graph, "B")));
}

#[test]
fn test_dijkstra_unreachable_nodes() {
    let graph = weighted(true, &[("A", "B", 1), ("C", "D", 1)]);
    let tree = Dijkstra::new(&graph).build(node(&graph, "A"));

    for name in ["C", "D"] {
        assert_eq!(tree.distance(node(&graph, name)), INFINITE_DISTANCE);
        assert_eq!(tree.predecessor(node(&graph, name)), None);
    }
}

#[test]
fn test_astar_matches_dijkstra() {
    for (seed, directed) in [(3, true), (5, false), (9, true), (13, false)] {
        let graph = scattered(directed, 20, 50, seed);
        let source = node(&graph, "n00");
        let reference = Dijkstra::new(&graph).build(source);

        for destination in graph.nodes() {
            let tree = AStar::new(&graph).build(source, destination);
            assert_eq!(
                tree.distance(destination),
                reference.distance(destination),
                "seed {} to {}",
                seed,
                graph.node_name(destination)
            );
        }
    }
}

#[test]
fn test_shortest_path_route() {
    let graph = weighted(false, &[("A", "B", 2), ("B", "C", 2), ("A", "C", 7), ("C", "D", 1)]);
    let tree = shortest_path(&graph, "A", Some("D"), HeuristicMode::Exact).unwrap();
    let route = tree.route(&graph, node(&graph, "D")).unwrap();

    let names: Vec<&str> = route.nodes().iter().map(|n| graph.node_name(*n)).collect();
    assert_eq!(names, ["A", "B", "C", "D"]);
    assert_eq!(route.distance, 5);
}

#[test]
fn test_shortest_path_no_path() {
    let graph = weighted(true, &[("A", "B", 1), ("C", "A", 1)]);
    let tree = shortest_path(&graph, "A", Some("C"), HeuristicMode::Exact).unwrap();

    let err = tree.route(&graph, node(&graph, "C")).unwrap_err();
    assert_eq!(err.to_string(), "no path found from A to C");
}
