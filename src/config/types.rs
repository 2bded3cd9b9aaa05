//! Configuration type definitions

use serde::{Deserialize, Serialize};

use crate::format::OutputFormat;
use crate::graph::algos::{HeuristicMode, MstAlgorithm};

/// Engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Point-to-point search settings
    #[serde(default)]
    pub shortest_path: ShortestPathConfig,

    /// Spanning tree settings
    #[serde(default)]
    pub mst: MstConfig,

    /// Rendering settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Configuration for shortest path searches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortestPathConfig {
    /// How A* precomputes its distance estimates: "exact" or "single-pass"
    #[serde(default)]
    pub heuristic: HeuristicMode,
}

/// Configuration for spanning trees
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MstConfig {
    /// Algorithm used when none is named: "kruskal" or "prim"
    #[serde(default)]
    pub algorithm: MstAlgorithm,
}

/// Configuration for rendered output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// "human" or "json"
    #[serde(default)]
    pub format: OutputFormat,

    /// Spaces per nesting level in search traces (default 1)
    #[serde(default = "default_trace_indent")]
    pub trace_indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            format: OutputFormat::default(),
            trace_indent: default_trace_indent(),
        }
    }
}

fn default_trace_indent() -> usize {
    1
}
