//! Note storage and literal mention search over a folder of markdown notes.

use crate::config::Config;
use crate::error::{Result, ZettelError};
use crate::graph::resolution::PathResolver;
use crate::types::Mention;
use glob::glob;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Read access to note text by storage path.
pub trait NoteStore {
    /// Whether a note is stored at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Read the note at `path`. Fails with [`ZettelError::NoteNotFound`] if absent.
    fn read(&self, path: &Path) -> Result<String>;
}

/// Literal full-text search across the note collection.
pub trait MentionSearch {
    /// Storage paths of notes whose text contains `literal`.
    fn search(&self, literal: &str) -> Result<Vec<PathBuf>>;
}

/// A collection of notes rooted at a folder.
#[derive(Debug, Clone)]
pub struct Vault {
    /// Root path of the vault (canonicalized).
    pub root: PathBuf,
    resolver: PathResolver,
}

impl Vault {
    /// Open a vault at `root` using the extension and folder rule from `config`.
    pub fn new(root: impl Into<PathBuf>, config: &Config) -> Result<Self> {
        let root = root.into();

        if !root.is_dir() {
            return Err(ZettelError::VaultNotFound(root));
        }
        let root = root.canonicalize()?;
        let resolver = PathResolver::from_config(&root, config);

        Ok(Self { root, resolver })
    }

    /// Open a vault with default settings.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        Self::new(root, &Config::default())
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Storage path of the note with the given identity.
    pub fn note_path(&self, identity: &str) -> PathBuf {
        self.resolver.path_from_identity(identity)
    }

    /// Check if a note with the given identity exists.
    pub fn note_exists(&self, identity: &str) -> bool {
        self.note_path(identity).is_file()
    }

    /// Turn a user supplied note reference into an identity.
    ///
    /// `query` may be a path to an existing file (which must lie inside the
    /// vault) or an identity, with or without extension.
    pub fn resolve_note(&self, query: &str) -> Result<String> {
        let query = query.trim();
        let as_path = Path::new(query);

        if as_path.is_file() {
            let canonical = as_path.canonicalize()?;
            return self.resolver.identity_from_path(&canonical);
        }

        let identity = self
            .resolver
            .strip_extension(query.trim_start_matches('/'))
            .to_string();
        if identity.is_empty() || !self.note_exists(&identity) {
            return Err(ZettelError::NoteNotFound(PathBuf::from(query)));
        }
        Ok(identity)
    }

    /// List all notes in the vault as storage paths, sorted.
    pub fn list_notes(&self) -> Result<Vec<PathBuf>> {
        let pattern = self.root.join(format!("**/*.{}", self.resolver.extension()));
        let pattern_str = pattern.to_string_lossy();

        let mut notes = Vec::new();

        for entry in glob(&pattern_str)? {
            match entry {
                Ok(path) => {
                    let Ok(relative) = path.strip_prefix(&self.root) else {
                        continue;
                    };
                    // Skip hidden files and directories
                    let hidden = relative
                        .components()
                        .any(|c| c.as_os_str().to_string_lossy().starts_with('.'));
                    if !hidden && path.is_file() {
                        notes.push(path);
                    }
                }
                Err(e) => {
                    warn!("glob error: {}", e);
                }
            }
        }

        notes.sort();
        Ok(notes)
    }

    /// Every line, across all notes, that contains `term`.
    pub fn find_mentions(&self, term: &str) -> Result<Vec<Mention>> {
        let mut mentions = Vec::new();
        if term.is_empty() {
            return Ok(mentions);
        }

        for path in self.list_notes()? {
            let Some(content) = self.read_for_search(&path) else {
                continue;
            };
            for (index, line) in content.lines().enumerate() {
                if line.contains(term) {
                    mentions.push(Mention {
                        path: path.clone(),
                        line: index + 1,
                        text: line.trim().to_string(),
                    });
                }
            }
        }

        Ok(mentions)
    }

    fn read_for_search(&self, path: &Path) -> Option<String> {
        match std::fs::read_to_string(path) {
            Ok(content) => Some(content),
            Err(e) => {
                debug!("skipping {} during search: {}", path.display(), e);
                None
            }
        }
    }
}

impl NoteStore for Vault {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ZettelError::NoteNotFound(path.to_path_buf())
            } else {
                ZettelError::Io(e)
            }
        })
    }
}

impl MentionSearch for Vault {
    fn search(&self, literal: &str) -> Result<Vec<PathBuf>> {
        if literal.is_empty() {
            return Ok(Vec::new());
        }

        let mut found = Vec::new();
        for path in self.list_notes()? {
            if let Some(content) = self.read_for_search(&path) {
                if content.contains(literal) {
                    found.push(path);
                }
            }
        }
        Ok(found)
    }
}
