//! In-memory note store for graph tests.

use crate::error::{Result, ZettelError};
use crate::graph::resolution::PathResolver;
use crate::vault::{MentionSearch, NoteStore};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

pub struct MemoryStore {
    resolver: PathResolver,
    notes: BTreeMap<PathBuf, String>,
    reads: RefCell<HashMap<PathBuf, usize>>,
    phantoms: Vec<PathBuf>,
    search_fails: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            resolver: PathResolver::new("/vault", "md"),
            notes: BTreeMap::new(),
            reads: RefCell::new(HashMap::new()),
            phantoms: Vec::new(),
            search_fails: false,
        }
    }

    pub fn with_note(mut self, identity: &str, content: &str) -> Self {
        let path = self.resolver.path_from_identity(identity);
        self.notes.insert(path, content.to_string());
        self
    }

    /// Report `path` as a search hit even though it cannot be read.
    pub fn with_phantom_hit(mut self, path: impl Into<PathBuf>) -> Self {
        self.phantoms.push(path.into());
        self
    }

    pub fn with_failing_search(mut self) -> Self {
        self.search_fails = true;
        self
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    pub fn max_reads(&self) -> usize {
        self.reads.borrow().values().copied().max().unwrap_or(0)
    }

    pub fn total_reads(&self) -> usize {
        self.reads.borrow().values().sum()
    }
}

impl NoteStore for MemoryStore {
    fn exists(&self, path: &Path) -> bool {
        self.notes.contains_key(path)
    }

    fn read(&self, path: &Path) -> Result<String> {
        *self.reads.borrow_mut().entry(path.to_path_buf()).or_default() += 1;
        self.notes
            .get(path)
            .cloned()
            .ok_or_else(|| ZettelError::NoteNotFound(path.to_path_buf()))
    }
}

impl MentionSearch for MemoryStore {
    fn search(&self, literal: &str) -> Result<Vec<PathBuf>> {
        if self.search_fails {
            return Err(ZettelError::Other("search backend unavailable".to_string()));
        }
        let mut found: Vec<PathBuf> = self
            .notes
            .iter()
            .filter(|(_, content)| content.contains(literal))
            .map(|(path, _)| path.clone())
            .collect();
        found.extend(self.phantoms.iter().cloned());
        Ok(found)
    }
}
