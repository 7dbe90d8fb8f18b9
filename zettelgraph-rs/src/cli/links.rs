//! The `links` command.

use crate::cli::args::NoteArgs;
use crate::cli::output::Output;
use crate::error::Result;
use crate::graph::{Reference, ReferenceKind, Target, extract};
use crate::parser::parse_document;
use crate::vault::{NoteStore, Vault};
use serde::Serialize;

/// One reference found in a note.
#[derive(Debug, Serialize)]
pub struct LinkOutput {
    pub destination: String,
    pub label: String,
    pub kind: &'static str,
    /// Identity the destination resolves to; absent for external targets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub external: bool,
}

#[derive(Debug, Serialize)]
pub struct LinksOutput {
    pub note: String,
    pub links: Vec<LinkOutput>,
}

fn kind_name(reference: &Reference<'_>) -> &'static str {
    match reference.kind {
        ReferenceKind::Markdown => "markdown",
        ReferenceKind::Wiki { embed: true, .. } => "embed",
        ReferenceKind::Wiki { .. } => "wiki",
    }
}

pub fn run(vault: &Vault, args: &NoteArgs, output: &Output) -> Result<()> {
    let identity = vault.resolve_note(&args.note)?;
    let resolver = vault.resolver();
    let content = vault.read(&vault.note_path(&identity))?;
    let document = parse_document(&content);
    let folder = resolver.folder_of(&identity);

    let links = extract(&document)
        .map(|reference| {
            let target = resolver.resolve_destination(&folder, &reference.destination);
            LinkOutput {
                label: reference.label_text(),
                kind: kind_name(&reference),
                external: matches!(target, Target::External(_)),
                note: target.as_note().map(str::to_string),
                destination: reference.destination,
            }
        })
        .collect();

    output.print(&LinksOutput {
        note: identity,
        links,
    })
}
