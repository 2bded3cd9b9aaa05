//! Error and warning types for bga
//!
//! Errors abort an operation before any result is produced:
//! - wrong graph shape for an algorithm (undirected graph for SCC, empty graph for MST)
//! - lookup misses (unknown node name)
//! - configuration failures (unreadable or malformed TOML)
//!
//! Warnings never abort. They travel inside the result of the operation that
//! raised them and are logged at `warn` level when they are raised.

mod macros;

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::graph::Weight;

/// Exit codes for front ends embedding the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad algorithm name, bad option (2)
    Usage = 2,
    /// Data error - unknown node, wrong graph shape (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during bga operations
#[derive(Error, Debug)]
pub enum GraphError {
    // Data errors (exit code 3)
    #[error("{operation} requires a directed graph")]
    NotDirected { operation: String },

    #[error("{operation} requires a graph with at least one node")]
    EmptyGraph { operation: String },

    #[error("node not found: {name}")]
    NodeNotFound { name: String },

    #[error("no path found from {from} to {to}")]
    NoPath { from: String, to: String },

    // Usage errors (exit code 2)
    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    #[error("unsupported {context}: {value} (supported: {supported})")]
    Unsupported {
        context: String,
        value: String,
        supported: String,
    },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("formatting error: {0}")]
    Fmt(#[from] fmt::Error),
}

impl GraphError {
    /// Create an error for an algorithm that only runs on directed graphs
    pub fn not_directed(operation: &str) -> Self {
        GraphError::NotDirected {
            operation: operation.to_string(),
        }
    }

    /// Create an error for an algorithm that needs at least one node
    pub fn empty_graph(operation: &str) -> Self {
        GraphError::EmptyGraph {
            operation: operation.to_string(),
        }
    }

    /// Create an error for an unknown node name
    pub fn node_not_found(name: impl fmt::Display) -> Self {
        GraphError::NodeNotFound {
            name: name.to_string(),
        }
    }

    /// Create an error for an unreachable destination
    pub fn no_path(from: impl fmt::Display, to: impl fmt::Display) -> Self {
        GraphError::NoPath {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl fmt::Display) -> Self {
        GraphError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an unsupported value
    pub fn unsupported(
        context: &str,
        value: impl fmt::Display,
        supported: impl fmt::Display,
    ) -> Self {
        GraphError::Unsupported {
            context: context.to_string(),
            value: value.to_string(),
            supported: supported.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            GraphError::InvalidValue { .. } | GraphError::Unsupported { .. } => ExitCode::Usage,

            GraphError::NotDirected { .. }
            | GraphError::EmptyGraph { .. }
            | GraphError::NodeNotFound { .. }
            | GraphError::NoPath { .. } => ExitCode::Data,

            GraphError::Io(_)
            | GraphError::Toml(_)
            | GraphError::TomlSer(_)
            | GraphError::Json(_)
            | GraphError::Fmt(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            GraphError::NotDirected { .. } => "not_directed",
            GraphError::EmptyGraph { .. } => "empty_graph",
            GraphError::NodeNotFound { .. } => "node_not_found",
            GraphError::NoPath { .. } => "no_path",
            GraphError::InvalidValue { .. } => "invalid_value",
            GraphError::Unsupported { .. } => "unsupported",
            GraphError::Io(_) => "io_error",
            GraphError::Toml(_) | GraphError::TomlSer(_) => "toml_error",
            GraphError::Json(_) => "json_error",
            GraphError::Fmt(_) => "format_error",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for bga operations
pub type Result<T> = std::result::Result<T, GraphError>;

/// Non-fatal conditions reported alongside a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// An edge was added with a negative weight
    NegativeWeight {
        from: String,
        to: String,
        weight: Weight,
    },
    /// Topological sort re-entered a node that was still in progress
    CycleDetected { node: String },
    /// A spanning tree was requested on a directed graph
    DirectedSpanningTree { algorithm: String },
    /// Transposing an undirected graph leaves it unchanged
    UndirectedTranspose,
    /// The directed flag changed after edges were added
    DirectedFlagChanged { directed: bool, edges: usize },
    /// Switching to undirected found both `from -> to` and `to -> from`; this one was dropped
    ReverseEdgeDropped { from: String, to: String },
    /// Point-to-point search fell back to single-source because the destination is unknown
    UnknownDestination { name: String },
    /// A node kept improving past the relaxation limit; a negative cycle reaches it
    NegativeCycle { node: String },
}

impl Warning {
    /// Emit this warning through `tracing` and hand it back for collection
    pub fn log(self) -> Self {
        tracing::warn!(warning = %self, "graph_warning");
        self
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::NegativeWeight { from, to, weight } => {
                write!(f, "negative weight {} for the edge {} {}", weight, from, to)
            }
            Warning::CycleDetected { node } => write!(
                f,
                "cycle detected at node {}, that branch of the sort was abandoned",
                node
            ),
            Warning::DirectedSpanningTree { algorithm } => write!(
                f,
                "{} may produce an invalid tree or more than one spanning tree on a directed graph",
                algorithm
            ),
            Warning::UndirectedTranspose => {
                write!(f, "transpose of an undirected graph is the same graph")
            }
            Warning::DirectedFlagChanged { directed, edges } => write!(
                f,
                "graph switched to {} with {} existing edges, incidence rebuilt",
                if *directed { "directed" } else { "undirected" },
                edges
            ),
            Warning::ReverseEdgeDropped { from, to } => write!(
                f,
                "edge {} {} dropped, the graph is undirected and {} {} already joins them",
                from, to, to, from
            ),
            Warning::UnknownDestination { name } => write!(
                f,
                "node {} not found in the graph, using single source shortest paths",
                name
            ),
            Warning::NegativeCycle { node } => write!(
                f,
                "negative cycle reaches node {}, its distance is not final",
                node
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(GraphError::not_directed("scc").exit_code(), ExitCode::Data);
        assert_eq!(GraphError::node_not_found("X").exit_code(), ExitCode::Data);
        assert_eq!(
            GraphError::unsupported("mst algorithm", "boruvka", "kruskal, prim").exit_code(),
            ExitCode::Usage
        );
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert_eq!(GraphError::from(io).exit_code(), ExitCode::Failure);
        assert_eq!(i32::from(ExitCode::Data), 3);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GraphError::not_directed("topological sort").to_string(),
            "topological sort requires a directed graph"
        );
        assert_eq!(
            GraphError::no_path("A", "D").to_string(),
            "no path found from A to D"
        );
    }

    #[test]
    fn test_to_json_envelope() {
        let json = GraphError::node_not_found("Z").to_json();
        assert_eq!(json["error"]["code"], 3);
        assert_eq!(json["error"]["type"], "node_not_found");
        assert_eq!(json["error"]["message"], "node not found: Z");
    }

    #[test]
    fn test_write_failure_propagates() {
        fn render(out: &mut impl fmt::Write) -> Result<()> {
            writeln!(out, "level 1 : A")?;
            Ok(())
        }

        /// Accepts nothing
        struct Full;
        impl fmt::Write for Full {
            fn write_str(&mut self, _: &str) -> fmt::Result {
                Err(fmt::Error)
            }
        }

        let mut out = String::new();
        render(&mut out).unwrap();
        assert_eq!(out, "level 1 : A\n");

        let err = render(&mut Full).unwrap_err();
        assert!(matches!(err, GraphError::Fmt(_)));
        assert_eq!(err.exit_code(), ExitCode::Failure);
        assert_eq!(err.to_json()["error"]["type"], "format_error");
    }

    #[test]
    fn test_warning_serializes_with_kind_tag() {
        let warning = Warning::CycleDetected {
            node: "A".to_string(),
        };
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["kind"], "cycle_detected");
        assert_eq!(json["node"], "A");
    }
}
