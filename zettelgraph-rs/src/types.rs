//! Shared types for zettelgraph.

use serde::Serialize;
use std::path::PathBuf;

/// A `[[wikilink]]` or `![[embed]]` found in note text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiLink {
    /// The link target, without heading or block reference.
    pub target: String,

    /// Optional display alias (the part after |).
    pub alias: Option<String>,

    /// Whether this is an embed (![[...]]) rather than a link.
    pub embed: bool,
}

/// A line of a note that contains a literal search term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mention {
    /// Storage path of the note.
    pub path: PathBuf,

    /// Line number (1-indexed).
    pub line: usize,

    /// The full line, trimmed.
    pub text: String,
}
