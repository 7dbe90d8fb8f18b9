//! Export a link graph to Graphviz DOT format.

use std::io::Write;

use crate::error::Result;
use crate::graph::LinkGraph;

/// Options for DOT export.
#[derive(Debug, Clone, Default)]
pub struct DotOptions {
    /// Identity of a node to draw highlighted, typically the traversal root.
    pub highlight_root: Option<String>,
    /// Label nodes with the last identity segment instead of the full identity.
    pub short_labels: bool,
    /// Write each distinct edge once.
    pub collapse_duplicates: bool,
}

/// Statistics from the export operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportStats {
    pub nodes: usize,
    pub edges: usize,
}

/// Write `graph` as a `digraph` to `writer`.
pub fn export_dot<W: Write>(
    graph: &LinkGraph,
    writer: &mut W,
    options: &DotOptions,
) -> Result<ExportStats> {
    let mut stats = ExportStats::default();

    writeln!(writer, "digraph zettelgraph {{")?;
    writeln!(writer, "    node [shape=box];")?;

    for identity in graph.nodes() {
        let mut attrs = Vec::new();
        if options.short_labels {
            let label = identity.rsplit('/').next().unwrap_or(identity);
            attrs.push(format!("label={}", quote(label)));
        }
        if options.highlight_root.as_deref() == Some(identity) {
            attrs.push("style=filled".to_string());
            attrs.push("fillcolor=lightblue".to_string());
        }

        if attrs.is_empty() {
            writeln!(writer, "    {};", quote(identity))?;
        } else {
            writeln!(writer, "    {} [{}];", quote(identity), attrs.join(", "))?;
        }
        stats.nodes += 1;
    }

    if options.collapse_duplicates {
        for edge in graph.unique_edges() {
            writeln!(writer, "    {} -> {};", quote(&edge.from), quote(&edge.to))?;
            stats.edges += 1;
        }
    } else {
        for edge in graph.edges() {
            writeln!(writer, "    {} -> {};", quote(&edge.from), quote(&edge.to))?;
            stats.edges += 1;
        }
    }

    writeln!(writer, "}}")?;
    Ok(stats)
}

/// Quote a string as a DOT identifier.
fn quote(s: &str) -> String {
    let escaped = s.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n");
    format!("\"{}\"", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_graph() -> LinkGraph {
        let mut graph = LinkGraph::with_root("root");
        graph.add_edge("root", "topics/rust");
        graph.add_edge("root", "topics/rust");
        graph.add_edge("topics/rust", "root");
        graph
    }

    fn render(graph: &LinkGraph, options: &DotOptions) -> (String, ExportStats) {
        let mut out = Vec::new();
        let stats = export_dot(graph, &mut out, options).unwrap();
        (String::from_utf8(out).unwrap(), stats)
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(quote("a\\b"), "\"a\\\\b\"");
    }

    #[test]
    fn test_export_default() {
        let (dot, stats) = render(&sample_graph(), &DotOptions::default());
        assert_eq!(
            dot,
            "digraph zettelgraph {\n    node [shape=box];\n    \"root\";\n    \"topics/rust\";\n    \
             \"root\" -> \"topics/rust\";\n    \"root\" -> \"topics/rust\";\n    \
             \"topics/rust\" -> \"root\";\n}\n"
        );
        assert_eq!(stats, ExportStats { nodes: 2, edges: 3 });
    }

    #[test]
    fn test_export_options() {
        let options = DotOptions {
            highlight_root: Some("root".to_string()),
            short_labels: true,
            collapse_duplicates: true,
        };
        let (dot, stats) = render(&sample_graph(), &options);

        assert!(dot.contains("\"root\" [label=\"root\", style=filled, fillcolor=lightblue];"));
        assert!(dot.contains("\"topics/rust\" [label=\"rust\"];"));
        assert_eq!(stats.edges, 2);
    }
}
