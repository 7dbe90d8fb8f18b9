//! Bracket-notation (`[[target]]`) link scanning.

use crate::types::WikiLink;
use regex::Regex;
use std::sync::LazyLock;

// Wikilink pattern: [[target]] or [[target|alias]] or [[target#heading]] or [[target#^block]]
// The target can contain most characters except | and ]
// After #, we have either a heading (no ^) or ^blockid
static WIKILINK: LazyLock<Regex> = LazyLock::new(|| {
    // (!)?                     - Optional ! for embeds (group 1)
    // \[\[                     - Opening [[
    // ([^\]\|#\n]+)            - Target (group 2)
    // (?:#\^([a-zA-Z0-9_-]+))? - Block reference (group 3)
    // (?:#([^\]\|\n]+))?       - Heading reference (group 4)
    // (?:\|([^\]\n]+))?        - Alias (group 5)
    // \]\]                     - Closing ]]
    Regex::new(r"(!?)\[\[([^\]\|#\n]+)(?:#\^([a-zA-Z0-9_-]+))?(?:#([^\]\|\n]+))?(?:\|([^\]\n]+))?\]\]")
        .unwrap()
});

// Zettlr-style note names: a 14 digit timestamp id followed by a title.
static ZETTEL_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{14})-").unwrap());

/// Scan text for every wikilink and embed, in order of appearance.
pub fn parse_wikilinks(text: &str) -> Vec<WikiLink> {
    if !text.contains("[[") {
        return Vec::new();
    }

    WIKILINK
        .captures_iter(text)
        .filter_map(|cap| {
            let target = cap.get(2)?.as_str().trim();
            if target.is_empty() {
                return None;
            }
            Some(WikiLink {
                target: target.to_string(),
                alias: cap.get(5).map(|m| m.as_str().to_string()),
                embed: cap.get(1).is_some_and(|m| !m.as_str().is_empty()),
            })
        })
        .collect()
}

/// The 14 digit id of a `YYYYMMDDhhmmss-title` note name, if it has one.
pub fn zettel_id(name: &str) -> Option<&str> {
    ZETTEL_NAME
        .captures(name)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
}

/// Check if a string looks like an image or media embed.
pub fn is_media_embed(target: &str) -> bool {
    let lower = target.to_lowercase();
    [
        ".png", ".jpg", ".jpeg", ".gif", ".webp", ".svg", ".bmp", ".mp3", ".wav", ".ogg", ".mp4",
        ".webm", ".pdf",
    ]
    .iter()
    .any(|ext| lower.ends_with(ext))
}
