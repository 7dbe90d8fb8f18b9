//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "zettelgraph")]
#[command(author, version, about = "Explore the link graph of a markdown note collection", long_about = None)]
pub struct Cli {
    /// Path to the note collection (overrides config default)
    #[arg(long, global = true, env = "ZETTELGRAPH_VAULT")]
    pub vault: Option<PathBuf>,

    /// Output as JSON (default)
    #[arg(long, global = true, conflicts_with_all = ["yaml", "toml"])]
    pub json: bool,

    /// Output as YAML
    #[arg(long, global = true, conflicts_with_all = ["json", "toml"])]
    pub yaml: bool,

    /// Output as TOML
    #[arg(long, global = true, conflicts_with_all = ["json", "yaml"])]
    pub toml: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (can be repeated)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.yaml {
            OutputFormat::Yaml
        } else if self.toml {
            OutputFormat::Toml
        } else {
            OutputFormat::Json
        }
    }

    /// Log level filter implied by `-q` and `-v`.
    pub fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Error;
        }
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Toml,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the link graph reachable from a note
    #[command(visible_alias = "g")]
    Graph(GraphArgs),

    /// List the references found in a note
    #[command(visible_alias = "l")]
    Links(NoteArgs),

    /// Find lines in other notes that mention a note
    #[command(visible_alias = "b")]
    Backlinks(NoteArgs),

    /// Words per link in a note
    #[command(name = "link-ratio", visible_alias = "lr")]
    LinkRatio(NoteArgs),
}

#[derive(Parser, Debug)]
pub struct NoteArgs {
    /// Note path or identity
    pub note: String,
}

#[derive(Parser, Debug)]
pub struct GraphArgs {
    /// Root note path or identity
    pub note: String,

    /// Write Graphviz DOT instead of structured output
    #[arg(long)]
    pub dot: bool,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip backlink inference
    #[arg(long)]
    pub no_backlinks: bool,

    /// Maximum destinations followed per note (overrides config)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub sample_limit: Option<u64>,

    /// Maximum exploration depth, 0 for unbounded (overrides config)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Label DOT nodes with the last identity segment
    #[arg(long, requires = "dot")]
    pub short_labels: bool,

    /// Draw each distinct DOT edge once
    #[arg(long, requires = "dot")]
    pub collapse: bool,
}
