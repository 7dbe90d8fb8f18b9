//! Parsers for markdown notes.

pub mod document;
pub mod wikilink;

pub use document::{parse_document, plain_text, ContainerKind, Document, Node};
pub use wikilink::{is_media_embed, parse_wikilinks, zettel_id};
