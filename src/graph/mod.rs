//! Graph model and algorithms
//!
//! Provides the graph itself and the operations run against it:
//! - `model`: nodes, edges and the graph arenas
//! - `types`: handles, weights and per-run marks
//! - `transpose`: edge reversal, in place or on a copy
//! - `algos`: traversal, components, spanning trees and shortest paths

pub mod algos;
pub mod model;
pub mod transpose;
pub mod types;

pub use model::{Edge, Graph, Node};
pub use transpose::{transpose_in_place, transposed, Transposed};
pub use types::{
    EdgeId, EdgeKey, GraphMode, NodeId, Weight, INFINITE_DISTANCE, UNWEIGHTED_COST,
};
