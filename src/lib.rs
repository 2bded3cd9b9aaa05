//! BGA Core Library
//!
//! In-memory graph algorithms over a named-node graph: depth-first search,
//! level-bucketed topological sort, Kosaraju strongly connected components,
//! Kruskal and Prim spanning trees, Dijkstra and A* shortest paths.

pub mod config;
pub mod error;
pub mod format;
pub mod graph;
pub mod heap;
pub mod logging;

pub use error::{GraphError, Result, Warning};
pub use graph::Graph;
