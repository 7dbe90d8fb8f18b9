//! Link graph construction.
//!
//! [`GraphBuilder`] explores outbound references from a root note,
//! [`BacklinkMerger`] adds inferred edges among the notes that mention it.

pub mod backlinks;
pub mod builder;
pub mod extract;
mod link_graph;
pub mod resolution;

#[cfg(test)]
pub(crate) mod testing;

pub use backlinks::BacklinkMerger;
pub use builder::{GraphBuilder, Traversal, TraversalOptions, build_graph, load_targets, sample_targets};
pub use extract::{Reference, ReferenceKind, extract, extract_destinations};
pub use link_graph::{Edge, LinkGraph};
pub use resolution::{PathResolver, Target, is_external, resolve_relative};
