use serde::Serialize;
use std::fmt;

use crate::error::GraphError;

/// Edge weight and path distance
///
/// Signed so that negative weights can be carried (with a warning) instead
/// of being rejected.
pub type Weight = i64;

/// Cost charged for traversing an edge that carries no weight
pub const UNWEIGHTED_COST: Weight = 1;

/// Sentinel distance for nodes not (yet) reached from the source
pub const INFINITE_DISTANCE: Weight = Weight::MAX;

/// Handle of a node in its graph's node arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        NodeId(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle of an edge in its graph's edge arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EdgeId(usize);

impl EdgeId {
    pub(crate) fn new(index: usize) -> Self {
        EdgeId(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Storage ordering of an edge
///
/// Edges order by cost first, then by their `"<n1> <n2>"` name. The id
/// keeps two distinct edges with the same name apart.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct EdgeKey {
    cost: Weight,
    name: String,
    id: EdgeId,
}

impl EdgeKey {
    pub(crate) fn new(cost: Weight, name: String, id: EdgeId) -> Self {
        EdgeKey { cost, name, id }
    }

    pub fn cost(&self) -> Weight {
        self.cost
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }
}

/// Whether edges have a direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphMode {
    Directed,
    #[default]
    Undirected,
}

impl GraphMode {
    pub fn is_directed(self) -> bool {
        self == GraphMode::Directed
    }
}

impl From<bool> for GraphMode {
    fn from(directed: bool) -> Self {
        if directed {
            GraphMode::Directed
        } else {
            GraphMode::Undirected
        }
    }
}

impl std::str::FromStr for GraphMode {
    type Err = GraphError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "directed" => Ok(GraphMode::Directed),
            "undirected" => Ok(GraphMode::Undirected),
            other => Err(GraphError::invalid_value("graph mode", other)),
        }
    }
}

impl fmt::Display for GraphMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphMode::Directed => write!(f, "directed"),
            GraphMode::Undirected => write!(f, "undirected"),
        }
    }
}

/// Visitation state of a node during a depth-first walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mark {
    #[default]
    Unvisited,
    InProgress,
    Done,
}

/// Per-run visitation marks, indexed by node handle
///
/// Owned by a single algorithm run so that runs never share state.
#[derive(Debug, Clone, Default)]
pub struct Marks(Vec<Mark>);

impl Marks {
    pub fn new(node_count: usize) -> Self {
        Marks(vec![Mark::Unvisited; node_count])
    }

    /// Set every node back to `Unvisited`
    pub fn reset(&mut self, node_count: usize) {
        self.0.clear();
        self.0.resize(node_count, Mark::Unvisited);
    }

    pub fn get(&self, node: NodeId) -> Mark {
        self.0.get(node.index()).copied().unwrap_or_default()
    }

    pub fn set(&mut self, node: NodeId, mark: Mark) {
        if let Some(slot) = self.0.get_mut(node.index()) {
            *slot = mark;
        }
    }

    pub fn is_done(&self, node: NodeId) -> bool {
        self.get(node) == Mark::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_key_orders_by_cost_then_name() {
        let cheap = EdgeKey::new(1, "Z Y".to_string(), EdgeId::new(0));
        let pricey = EdgeKey::new(2, "A B".to_string(), EdgeId::new(1));
        let tie = EdgeKey::new(1, "A B".to_string(), EdgeId::new(2));

        assert!(cheap < pricey);
        assert!(tie < cheap);
    }

    #[test]
    fn test_graph_mode_from_str() {
        assert_eq!("Directed".parse::<GraphMode>().unwrap(), GraphMode::Directed);
        assert_eq!(
            "undirected".parse::<GraphMode>().unwrap(),
            GraphMode::Undirected
        );
        let err = "both".parse::<GraphMode>().unwrap_err();
        assert_eq!(err.to_string(), "invalid graph mode: both");
        assert_eq!(GraphMode::from(true).to_string(), "directed");
    }

    #[test]
    fn test_marks_reset() {
        let mut marks = Marks::new(3);
        marks.set(NodeId::new(1), Mark::Done);
        assert!(marks.is_done(NodeId::new(1)));

        marks.reset(3);
        assert_eq!(marks.get(NodeId::new(1)), Mark::Unvisited);
        // Out of range handles read as unvisited
        assert_eq!(marks.get(NodeId::new(10)), Mark::Unvisited);
    }
}
