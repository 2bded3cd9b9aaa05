use bga::graph::{Graph, NodeId, Weight};

#[allow(dead_code)]
pub fn weighted(directed: bool, edges: &[(&str, &str, Weight)]) -> Graph {
    Graph::from_triples(directed, edges.iter().map(|(a, b, w)| (*a, *b, Some(*w))))
}

#[allow(dead_code)]
pub fn unweighted(directed: bool, edges: &[(&str, &str)]) -> Graph {
    Graph::from_triples(directed, edges.iter().map(|(a, b)| (*a, *b, None)))
}

#[allow(dead_code)]
pub fn node(graph: &Graph, name: &str) -> NodeId {
    graph
        .find_node(name)
        .unwrap_or_else(|| panic!("node {} missing", name))
}

/// Deterministic pseudo-random weighted graph (xorshift)
#[allow(dead_code)]
pub fn scattered(directed: bool, nodes: usize, edges: usize, seed: u64) -> Graph {
    let mut state = seed.max(1);
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    let mut graph = Graph::new(directed);
    for i in 0..nodes {
        graph.add_node(&format!("n{:02}", i));
    }
    for _ in 0..edges {
        let a = (next() % nodes as u64) as usize;
        let b = (next() % nodes as u64) as usize;
        let w = (next() % 20) as Weight + 1;
        graph.connect(&format!("n{:02}", a), &format!("n{:02}", b), Some(w));
    }
    graph
}
