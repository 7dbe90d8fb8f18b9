//! zettelgraph - explore the link graph of a folder of markdown notes.
//!
//! # Overview
//!
//! Starting from a root note, zettelgraph follows explicit markdown links and
//! `[[wikilinks]]` through the collection, then infers backlinks from notes
//! that mention the root by name:
//! - Path/identity resolution with relative `../` handling
//! - Unified reference extraction over a parsed markdown tree
//! - Depth-first exploration with per-note sampling and an optional depth bound
//! - Backlink inference restricted to the notes mentioning the root
//! - Graphviz DOT export
//!
//! # Example
//!
//! ```no_run
//! use zettelgraph::{build_graph, Config, Vault};
//!
//! let config = Config::default();
//! let vault = Vault::new("/path/to/wiki", &config).unwrap();
//!
//! let traversal = build_graph(&vault, vault.resolver(), &config.graph, "zettelKasten", true).unwrap();
//! for edge in traversal.graph.edges() {
//!     println!("{} -> {}", edge.from, edge.to);
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod graph;
pub mod parser;
pub mod types;
pub mod vault;

// Re-export main types at crate root
pub use config::Config;
pub use error::{Result, ZettelError};
pub use graph::{build_graph, GraphBuilder, LinkGraph, PathResolver, Target, Traversal};
pub use types::*;
pub use vault::{MentionSearch, NoteStore, Vault};
