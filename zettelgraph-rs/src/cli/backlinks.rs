//! The `backlinks` command.

use crate::cli::args::NoteArgs;
use crate::cli::output::Output;
use crate::error::Result;
use crate::parser::zettel_id;
use crate::types::Mention;
use crate::vault::Vault;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct BacklinksOutput {
    pub term: String,
    pub mentions: Vec<Mention>,
}

/// Term searched for when looking up mentions of `identity`.
///
/// The file stem, or its Zettel ID when the stem looks like
/// `YYYYMMDDhhmmss-title`.
pub fn search_term(identity: &str) -> &str {
    let stem = identity.rsplit('/').next().unwrap_or(identity).trim();
    zettel_id(stem).unwrap_or(stem)
}

pub fn run(vault: &Vault, args: &NoteArgs, output: &Output) -> Result<()> {
    let identity = vault.resolve_note(&args.note)?;
    let term = search_term(&identity);
    let mentions = vault.find_mentions(term)?;

    output.print(&BacklinksOutput {
        term: term.to_string(),
        mentions,
    })
}
