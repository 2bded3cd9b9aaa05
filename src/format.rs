//! Output format handling for bga
//!
//! Supports two output formats:
//! - human: the line-oriented dumps a terminal front end prints
//! - json: stable, machine-readable JSON with node handles resolved to names

use std::fmt;
use std::fmt::Write as _;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{GraphError, Result, Warning};
use crate::graph::algos::{
    Components, PathTree, Route, SpanningTree, TopologicalOrder, Trace, TraceKind,
};
use crate::graph::types::{NodeId, Weight, INFINITE_DISTANCE};
use crate::graph::Graph;

/// Output format for rendered results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for machine consumption
    Json,
}

impl FromStr for OutputFormat {
    type Err = GraphError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            other => Err(GraphError::unsupported("output format", other, "human, json")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

fn to_json(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn names(graph: &Graph, nodes: &[NodeId]) -> Vec<String> {
    nodes
        .iter()
        .map(|n| graph.node_name(*n).to_string())
        .collect()
}

/// `null` for unreached distances
fn distance_value(distance: Weight) -> Value {
    if distance == INFINITE_DISTANCE {
        Value::Null
    } else {
        json!(distance)
    }
}

/// Render the graph mode followed by every edge in storage order
pub fn render_graph(graph: &Graph, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Human => {
            let mut out = format!("graph {}\n", graph.mode());
            for id in graph.edges() {
                out.push_str(&graph.edge_name(id));
                if let Some(weight) = graph.edge(id).weight() {
                    write!(out, " {}", weight)?;
                }
                out.push('\n');
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let edges: Vec<Value> = graph
                .edges()
                .map(|id| {
                    let edge = graph.edge(id);
                    json!({
                        "from": graph.node_name(edge.n1()),
                        "to": graph.node_name(edge.n2()),
                        "weight": edge.weight(),
                    })
                })
                .collect();
            let nodes: Vec<&str> = graph.nodes().map(|n| graph.node_name(n)).collect();
            to_json(&json!({
                "mode": graph.mode(),
                "nodes": nodes,
                "edges": edges,
            }))
        }
    }
}

/// Render a search trace, indenting `indent` spaces per nesting level
pub fn render_trace(
    graph: &Graph,
    trace: &Trace,
    format: OutputFormat,
    indent: usize,
) -> Result<String> {
    match format {
        OutputFormat::Human => {
            let mut out = String::new();
            for event in &trace.events {
                let pad = " ".repeat(event.depth * indent);
                let suffix = match event.kind {
                    TraceKind::Visiting => "visiting",
                    TraceKind::Visited => "visited.",
                };
                writeln!(out, "{}{} {}", pad, graph.node_name(event.node), suffix)?;
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let events: Vec<Value> = trace
                .events
                .iter()
                .map(|e| {
                    json!({
                        "kind": e.kind,
                        "node": graph.node_name(e.node),
                        "depth": e.depth,
                    })
                })
                .collect();
            to_json(&json!({
                "root": graph.node_name(trace.root),
                "events": events,
            }))
        }
    }
}

/// Render topological levels, skipping empty ones; human levels count from 1
pub fn render_levels(
    graph: &Graph,
    order: &TopologicalOrder,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Human => {
            let mut out = String::new();
            for (level, nodes) in order.non_empty_levels() {
                writeln!(out, "level {} : {}", level + 1, names(graph, nodes).join(" "))?;
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let levels: Vec<Value> = order
                .non_empty_levels()
                .map(|(level, nodes)| json!({ "level": level, "nodes": names(graph, nodes) }))
                .collect();
            to_json(&json!({
                "levels": levels,
                "warnings": order.warnings,
            }))
        }
    }
}

/// Render component groups in discovery order
pub fn render_components(
    graph: &Graph,
    components: &Components,
    format: OutputFormat,
) -> Result<String> {
    let groups = components
        .groups
        .iter()
        .enumerate()
        .filter(|(_, group)| !group.is_empty());
    match format {
        OutputFormat::Human => {
            let mut out = String::new();
            for (index, group) in groups {
                writeln!(out, "SCC Group {} : {}", index, names(graph, group).join(" "))?;
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let groups: Vec<Vec<String>> = groups.map(|(_, group)| names(graph, group)).collect();
            to_json(&json!({ "components": groups }))
        }
    }
}

/// Render a spanning tree as `parent child weight` lines in node name order
///
/// Roots print with `root` as their parent.
pub fn render_tree(graph: &Graph, tree: &SpanningTree, format: OutputFormat) -> Result<String> {
    let mut entries: Vec<_> = tree.tree_nodes().collect();
    entries.sort_by(|a, b| graph.node_name(a.node).cmp(graph.node_name(b.node)));
    let parent_name = |parent: Option<NodeId>| parent.map(|p| graph.node_name(p));

    match format {
        OutputFormat::Human => {
            let mut out = String::new();
            for entry in entries {
                writeln!(
                    out,
                    "{} {} {}",
                    parent_name(entry.parent).unwrap_or("root"),
                    graph.node_name(entry.node),
                    entry.weight
                )?;
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let nodes: Vec<Value> = entries
                .iter()
                .map(|entry| {
                    json!({
                        "node": graph.node_name(entry.node),
                        "parent": parent_name(entry.parent),
                        "weight": entry.weight,
                    })
                })
                .collect();
            to_json(&json!({
                "algorithm": tree.algorithm,
                "total_weight": tree.total_weight(),
                "trees": tree.tree_count(),
                "nodes": nodes,
                "warnings": tree.warnings,
            }))
        }
    }
}

/// Render a path tree as a table of distances and predecessor edges
pub fn render_path_tree(graph: &Graph, tree: &PathTree, format: OutputFormat) -> Result<String> {
    let mut entries: Vec<_> = tree.path_nodes().collect();
    entries.sort_by(|a, b| graph.node_name(a.node).cmp(graph.node_name(b.node)));

    match format {
        OutputFormat::Human => {
            let mut out = String::from("nd dist_from_src edge\n== ============= ====\n");
            for entry in entries {
                let distance = if entry.distance == INFINITE_DISTANCE {
                    "inf".to_string()
                } else {
                    entry.distance.to_string()
                };
                let name = graph.node_name(entry.node);
                let predecessor = entry.predecessor.map_or("none", |p| graph.node_name(p));
                writeln!(
                    out,
                    "{} {} [{}  {} {}]",
                    name, distance, predecessor, name, entry.weight
                )?;
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let nodes: Vec<Value> = entries
                .iter()
                .map(|entry| {
                    json!({
                        "node": graph.node_name(entry.node),
                        "predecessor": entry.predecessor.map(|p| graph.node_name(p)),
                        "weight": entry.weight,
                        "distance": distance_value(entry.distance),
                    })
                })
                .collect();
            to_json(&json!({
                "source": graph.node_name(tree.source),
                "nodes": nodes,
                "warnings": tree.warnings,
            }))
        }
    }
}

/// Render a route as one `from to weight` line per edge and its total
pub fn render_route(graph: &Graph, route: &Route, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Human => {
            let mut out = String::new();
            for step in &route.steps {
                writeln!(
                    out,
                    "{} {} {}",
                    graph.node_name(step.from),
                    graph.node_name(step.to),
                    step.weight
                )?;
            }
            writeln!(
                out,
                "{} to {} distance {}",
                graph.node_name(route.source),
                graph.node_name(route.destination),
                route.distance
            )?;
            Ok(out)
        }
        OutputFormat::Json => {
            let steps: Vec<Value> = route
                .steps
                .iter()
                .map(|step| {
                    json!({
                        "from": graph.node_name(step.from),
                        "to": graph.node_name(step.to),
                        "weight": step.weight,
                    })
                })
                .collect();
            to_json(&json!({
                "source": graph.node_name(route.source),
                "destination": graph.node_name(route.destination),
                "distance": route.distance,
                "steps": steps,
            }))
        }
    }
}

/// Render warnings, one `warning: ...` line each
pub fn render_warnings(warnings: &[Warning], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(warnings
            .iter()
            .map(|w| format!("warning: {}\n", w))
            .collect()),
        OutputFormat::Json => to_json(&json!({ "warnings": warnings })),
    }
}
