//! Mapping between storage paths, note identities and link destinations.
//!
//! A note identity is the path of the note relative to the collection root,
//! with `/` separators and without the file extension:
//! `<root>/projects/rust/ownership.md` has identity `projects/rust/ownership`.
//!
//! Link destinations are resolved against the folder of the note containing
//! them. Leading `../` markers climb one folder each; climbing past the root
//! is tolerated and simply stops at the root.

use crate::config::Config;
use crate::error::{Result, ZettelError};
use regex::Regex;
use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

// scheme://..., plus the schemes that are written without slashes
static URI_SCHEME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[a-z][a-z0-9+.\-]*://|mailto:|tel:|data:|file:)").unwrap()
});

/// Identity prefixes that never name a note in the collection.
const NON_NOTE_PREFIXES: [&str; 3] = ["http", "file", "~"];

/// A classified link destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// A note identity inside the collection.
    Note(String),
    /// Anything that cannot be traversed: URLs, home-relative paths,
    /// same-page anchors, empty destinations.
    External(String),
}

impl Target {
    /// The note identity, if this target is traversable.
    pub fn as_note(&self) -> Option<&str> {
        match self {
            Target::Note(identity) => Some(identity),
            Target::External(_) => None,
        }
    }
}

/// Converts between storage paths and note identities.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
    extension: String,
    folder_trim: usize,
}

impl PathResolver {
    /// Create a resolver for a collection root and note extension (without dot).
    pub fn new(root: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            root: root.into(),
            extension: extension.trim_start_matches('.').to_string(),
            folder_trim: 1,
        }
    }

    /// Create a resolver from user configuration.
    pub fn from_config(root: impl Into<PathBuf>, config: &Config) -> Self {
        Self::new(root, config.extension()).with_folder_trim(config.graph.folder_trim)
    }

    /// Set how many trailing identity segments [`folder_of`](Self::folder_of) drops.
    pub fn with_folder_trim(mut self, folder_trim: usize) -> Self {
        self.folder_trim = folder_trim;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Derive the identity of the note stored at `path`.
    ///
    /// Fails with [`ZettelError::InvalidPath`] when `path` is not inside the
    /// collection root.
    pub fn identity_from_path(&self, path: &Path) -> Result<String> {
        let invalid = || ZettelError::InvalidPath {
            path: path.to_path_buf(),
            root: self.root.clone(),
        };

        let relative = path.strip_prefix(&self.root).map_err(|_| invalid())?;

        let mut segments = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(part) => segments.push(part.to_string_lossy()),
                Component::CurDir => {}
                _ => return Err(invalid()),
            }
        }
        if segments.is_empty() {
            return Err(invalid());
        }

        let joined = segments.join("/");
        Ok(self.strip_extension(&joined).to_string())
    }

    /// Storage path of the note with the given identity.
    pub fn path_from_identity(&self, identity: &str) -> PathBuf {
        self.root.join(format!("{}.{}", identity, self.extension))
    }

    /// Folder used as the base for relative references found in `identity`.
    pub fn folder_of(&self, identity: &str) -> String {
        let segments: Vec<&str> = identity.split('/').collect();
        let keep = segments.len().saturating_sub(self.folder_trim);
        segments[..keep].join("/")
    }

    /// Drop a trailing `.<extension>` suffix.
    pub fn strip_extension<'a>(&self, identity: &'a str) -> &'a str {
        identity
            .strip_suffix(self.extension.as_str())
            .and_then(|rest| rest.strip_suffix('.'))
            .unwrap_or(identity)
    }

    /// Classify a raw destination found in a note located in `folder`.
    pub fn resolve_destination(&self, folder: &str, raw: &str) -> Target {
        let raw = raw.trim();
        if is_external(raw) {
            return Target::External(raw.to_string());
        }

        let path_part = raw.split('#').next().unwrap_or_default();
        if path_part.is_empty() {
            return Target::External(raw.to_string());
        }

        let decoded = urlencoding::decode(path_part).unwrap_or(Cow::Borrowed(path_part));
        let resolved = resolve_relative(folder, &decoded);
        let identity = self.strip_extension(&resolved);

        if identity.is_empty() || NON_NOTE_PREFIXES.iter().any(|p| identity.starts_with(p)) {
            return Target::External(raw.to_string());
        }
        Target::Note(identity.to_string())
    }
}

/// Whether a raw destination points outside the note collection.
pub fn is_external(raw: &str) -> bool {
    raw.starts_with('~') || URI_SCHEME.is_match(raw)
}

/// Resolve `reference` relative to `folder`.
///
/// Each leading `../` pops one folder segment (a no-op once the folder is
/// exhausted); leading `./` markers are dropped. The remaining folder and
/// reference are joined and any leading `/` is trimmed.
pub fn resolve_relative(folder: &str, reference: &str) -> String {
    let mut segments: Vec<&str> = folder.split('/').filter(|s| !s.is_empty()).collect();
    let mut rest = reference;

    loop {
        if let Some(stripped) = rest.strip_prefix("../") {
            segments.pop();
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix("./") {
            rest = stripped;
        } else if rest == ".." {
            segments.pop();
            rest = "";
        } else {
            break;
        }
    }

    let rest = rest.trim_start_matches('/');
    if segments.is_empty() {
        return rest.to_string();
    }
    if rest.is_empty() {
        return segments.join("/");
    }
    format!("{}/{}", segments.join("/"), rest)
}
