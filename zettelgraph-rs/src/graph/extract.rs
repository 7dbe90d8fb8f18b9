//! Reference extraction from parsed notes.
//!
//! Explicit markdown links and `[[wikilinks]]` found in text are reported
//! through one lazy, depth-first iterator, each exactly once and in document
//! order. Code, HTML, images and media embeds never produce references.

use crate::parser::{is_media_embed, parse_document, parse_wikilinks, plain_text};
use crate::parser::{ContainerKind, Document, Node};
use crate::types::WikiLink;
use std::collections::VecDeque;

/// How a reference was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceKind {
    /// `[label](destination)`
    Markdown,
    /// `[[destination]]`, `[[destination|alias]]` or `![[destination]]`
    Wiki { alias: Option<String>, embed: bool },
}

/// A raw outbound reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference<'a> {
    /// Destination exactly as written (wikilinks without heading/block part).
    pub destination: String,
    /// Label nodes of a markdown link; empty for wikilinks.
    pub label: &'a [Node],
    pub kind: ReferenceKind,
}

impl Reference<'_> {
    fn from_wikilink(link: WikiLink) -> Self {
        Reference {
            destination: link.target,
            label: &[],
            kind: ReferenceKind::Wiki {
                alias: link.alias,
                embed: link.embed,
            },
        }
    }

    /// Human readable label.
    pub fn label_text(&self) -> String {
        match &self.kind {
            ReferenceKind::Markdown => plain_text(self.label),
            ReferenceKind::Wiki { alias, .. } => {
                alias.clone().unwrap_or_else(|| self.destination.clone())
            }
        }
    }
}

/// Lazy iterator over the references of a document.
pub struct References<'a> {
    stack: Vec<&'a Node>,
    pending: VecDeque<Reference<'a>>,
}

/// Walk `document` and yield every reference it contains.
pub fn extract(document: &Document) -> References<'_> {
    References {
        stack: document.children.iter().rev().collect(),
        pending: VecDeque::new(),
    }
}

impl<'a> Iterator for References<'a> {
    type Item = Reference<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(reference) = self.pending.pop_front() {
                return Some(reference);
            }

            match self.stack.pop()? {
                Node::Link {
                    destination,
                    children,
                    ..
                } => {
                    return Some(Reference {
                        destination: destination.clone(),
                        label: children,
                        kind: ReferenceKind::Markdown,
                    });
                }
                Node::Container {
                    kind: ContainerKind::Image,
                    ..
                } => {}
                Node::Container { children, .. } => self.stack.extend(children.iter().rev()),
                Node::Text(text) => self.pending.extend(
                    parse_wikilinks(text)
                        .into_iter()
                        .filter(|link| !(link.embed && is_media_embed(&link.target)))
                        .map(Reference::from_wikilink),
                ),
                Node::Code(_) | Node::Html(_) | Node::Break => {}
            }
        }
    }
}

/// Parse note text and collect the raw destinations of all its references.
pub fn extract_destinations(content: &str) -> Vec<String> {
    let document = parse_document(content);
    extract(&document).map(|r| r.destination).collect()
}
