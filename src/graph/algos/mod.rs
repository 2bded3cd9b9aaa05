//! Graph algorithm implementations
//!
//! Contains concrete implementations of graph algorithms:
//! - `dfs`: Depth-first search and level-bucketed topological sort
//! - `scc`: Kosaraju strongly connected components
//! - `mst`: Kruskal and Prim spanning trees
//! - `dijkstra`: Single-source shortest paths
//! - `astar`: Point-to-point shortest paths
//! - `shared`: Path tree used by both shortest path searches

pub mod astar;
pub mod dfs;
pub mod dijkstra;
pub mod mst;
pub mod scc;
pub mod shared;

pub use astar::{shortest_path, AStar, HeuristicMode};
pub use dfs::{Dfs, TopologicalOrder, Trace, TraceEvent, TraceKind};
pub use dijkstra::Dijkstra;
pub use mst::{kruskal, minimum_spanning_tree, prim, MstAlgorithm, SpanningTree, TreeNode};
pub use scc::{strongly_connected_components, Components, Kosaraju};
pub use shared::{PathNode, PathTree, Route, RouteStep};
