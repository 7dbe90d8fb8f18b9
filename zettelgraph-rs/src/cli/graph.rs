//! The `graph` command.

use crate::cli::args::GraphArgs;
use crate::cli::output::Output;
use crate::config::Config;
use crate::error::Result;
use crate::export::{DotOptions, export_dot};
use crate::graph::{Edge, Traversal, build_graph};
use crate::vault::Vault;
use serde::Serialize;
use std::collections::BTreeSet;

/// Structured output of the `graph` command.
#[derive(Debug, Serialize)]
pub struct GraphOutput {
    pub root: String,
    pub nodes: Vec<String>,
    pub edges: Vec<Edge>,
    pub visited: BTreeSet<String>,
    pub missing: BTreeSet<String>,
    pub backlink_edges: usize,
}

impl From<Traversal> for GraphOutput {
    fn from(traversal: Traversal) -> Self {
        Self {
            nodes: traversal.graph.nodes().map(str::to_string).collect(),
            edges: traversal.graph.edges().to_vec(),
            root: traversal.root,
            visited: traversal.visited,
            missing: traversal.missing,
            backlink_edges: traversal.backlink_edges,
        }
    }
}

pub fn run(vault: &Vault, config: &Config, args: &GraphArgs, output: &Output) -> Result<()> {
    let root = vault.resolve_note(&args.note)?;

    let mut graph_config = config.graph.clone();
    if let Some(limit) = args.sample_limit {
        graph_config.sample_limit = usize::try_from(limit).unwrap_or(usize::MAX);
    }
    if let Some(depth) = args.max_depth {
        graph_config.max_depth = depth;
    }

    let traversal = build_graph(vault, vault.resolver(), &graph_config, &root, !args.no_backlinks)?;

    if !traversal.missing.is_empty() {
        output.warn(&format!(
            "{} linked notes could not be loaded",
            traversal.missing.len()
        ));
    }

    let text = if args.dot {
        let options = DotOptions {
            highlight_root: Some(traversal.root.clone()),
            short_labels: args.short_labels,
            collapse_duplicates: args.collapse,
        };
        let mut buffer = Vec::new();
        export_dot(&traversal.graph, &mut buffer, &options)?;
        String::from_utf8_lossy(&buffer).into_owned()
    } else {
        let mut rendered = output.render(&GraphOutput::from(traversal))?;
        rendered.push('\n');
        rendered
    };

    match &args.output {
        Some(path) => output.write_file(path, &text),
        None => {
            output.print_raw(&text);
            Ok(())
        }
    }
}
