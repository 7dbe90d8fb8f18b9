//! Graph export for external renderers.
//!
//! Currently supports Graphviz DOT.

mod dot;

pub use dot::{export_dot, DotOptions, ExportStats};
