//! CLI command implementations.

pub mod args;
pub mod output;

pub mod backlinks;
pub mod graph;
pub mod link_ratio;
pub mod links;

pub use args::{Cli, Commands};
pub use output::Output;
