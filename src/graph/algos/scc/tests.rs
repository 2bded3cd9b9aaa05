use super::*;
use crate::error::GraphError;
use crate::graph::algos::dfs::Dfs;

fn directed(edges: &[(&str, &str)]) -> Graph {
    Graph::from_triples(true, edges.iter().map(|(a, b)| (*a, *b, None)))
}

fn group_names(graph: &Graph, components: &Components) -> Vec<Vec<String>> {
    components
        .groups
        .iter()
        .map(|group| {
            let mut names: Vec<String> = group
                .iter()
                .map(|n| graph.node_name(*n).to_string())
                .collect();
            names.sort();
            names
        })
        .collect()
}

fn edge_list(graph: &Graph) -> Vec<String> {
    graph.edges().map(|e| graph.edge_name(e)).collect()
}

/// Whether `to` is reachable from `from` by following edges forward
fn reaches(graph: &Graph, from: NodeId, to: NodeId) -> bool {
    Dfs::new(graph).search(from).discovery_order().contains(&to)
}

#[test]
fn test_two_node_cycle_is_one_component() {
    let mut graph = directed(&[("A", "B"), ("B", "A")]);
    let components = strongly_connected_components(&mut graph).unwrap();

    assert_eq!(group_names(&graph, &components), [vec!["A", "B"]]);
}

#[test]
fn test_components_of_mixed_graph() {
    let mut graph = directed(&[
        ("A", "B"),
        ("B", "C"),
        ("C", "A"),
        ("C", "D"),
        ("D", "E"),
        ("E", "D"),
        ("F", "F"),
        ("G", "E"),
    ]);
    let components = strongly_connected_components(&mut graph).unwrap();

    let mut groups = group_names(&graph, &components);
    groups.sort();
    assert_eq!(
        groups,
        [
            vec!["A", "B", "C"],
            vec!["D", "E"],
            vec!["F"],
            vec!["G"],
        ]
    );
}

#[test]
fn test_component_order_follows_finishing_stack() {
    let mut graph = directed(&[("A", "B"), ("B", "C")]);
    let components = strongly_connected_components(&mut graph).unwrap();

    // A finishes last, so its component is discovered first
    let names: Vec<Vec<String>> = group_names(&graph, &components);
    assert_eq!(names, [vec!["A"], vec!["B"], vec!["C"]]);
}

#[test]
fn test_same_component_iff_mutually_reachable() {
    let mut graph = directed(&[
        ("a", "b"),
        ("b", "c"),
        ("c", "a"),
        ("c", "d"),
        ("d", "e"),
        ("e", "f"),
        ("f", "d"),
        ("g", "a"),
    ]);
    let components = strongly_connected_components(&mut graph).unwrap();

    let nodes: Vec<NodeId> = graph.nodes().collect();
    for &u in &nodes {
        for &v in &nodes {
            let same = components.component_of(u) == components.component_of(v);
            let mutual = reaches(&graph, u, v) && reaches(&graph, v, u);
            assert_eq!(same, mutual, "{} / {}", graph.node_name(u), graph.node_name(v));
        }
    }
}

#[test]
fn test_build_restores_orientation() {
    let mut graph = directed(&[("A", "B"), ("B", "C"), ("C", "A"), ("C", "D")]);
    let before = edge_list(&graph);

    strongly_connected_components(&mut graph).unwrap();

    assert_eq!(edge_list(&graph), before);
    let d = graph.find_node("D").unwrap();
    assert_eq!(graph.node(d).degree(), 0);
}

#[test]
fn test_build_is_repeatable() {
    let mut graph = directed(&[("A", "B"), ("B", "A"), ("B", "C")]);
    let mut kosaraju = Kosaraju::new();

    let first = kosaraju.build(&mut graph).unwrap();
    let second = kosaraju.build(&mut graph).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_single_isolated_node() {
    let mut graph = Graph::new(true);
    graph.add_node("solo");
    let components = strongly_connected_components(&mut graph).unwrap();
    assert_eq!(components.len(), 1);
}

#[test]
fn test_requires_directed_graph() {
    let mut graph = Graph::from_triples(false, [("A", "B", None)]);
    let err = strongly_connected_components(&mut graph).unwrap_err();
    assert!(matches!(err, GraphError::NotDirected { .. }));
    assert_eq!(edge_list(&graph), ["A B"]);
}
