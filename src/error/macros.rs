//! Error macros for bga

/// Return `NotDirected` unless the graph is directed
#[macro_export]
macro_rules! bail_not_directed {
    ($graph:expr, $operation:expr) => {
        if !$graph.directed() {
            return Err($crate::error::GraphError::not_directed($operation));
        }
    };
}

/// Return `EmptyGraph` when the graph has no nodes
#[macro_export]
macro_rules! bail_empty {
    ($graph:expr, $operation:expr) => {
        if $graph.node_count() == 0 {
            return Err($crate::error::GraphError::empty_graph($operation));
        }
    };
}
