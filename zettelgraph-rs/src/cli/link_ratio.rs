//! The `link-ratio` command.

use crate::cli::args::NoteArgs;
use crate::cli::output::Output;
use crate::error::Result;
use crate::graph::extract;
use crate::parser::parse_document;
use crate::vault::{NoteStore, Vault};
use serde::Serialize;

/// Penalty multiplier applied to notes without any links.
const UNLINKED_FACTOR: usize = 10;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct LinkRatioOutput {
    pub note: String,
    pub words: usize,
    pub links: usize,
    pub ratio: usize,
}

/// Words per link, or `words * 10` when there are no links.
pub fn link_ratio(content: &str) -> (usize, usize, usize) {
    let words = content.split_whitespace().count();
    let document = parse_document(content);
    let links = extract(&document).count();

    let ratio = if links == 0 {
        words * UNLINKED_FACTOR
    } else {
        words / links
    };
    (words, links, ratio)
}

pub fn run(vault: &Vault, args: &NoteArgs, output: &Output) -> Result<()> {
    let identity = vault.resolve_note(&args.note)?;
    let content = vault.read(&vault.note_path(&identity))?;
    let (words, links, ratio) = link_ratio(&content);

    output.print(&LinkRatioOutput {
        note: identity,
        words,
        links,
        ratio,
    })
}
