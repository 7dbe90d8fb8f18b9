//! Backlink inference for the root note.
//!
//! Notes whose text mentions the root identity are treated as related to it.
//! Their references are added to the graph, restricted to the mentioning set
//! plus the root, so the merge never pulls unrelated notes in.

use crate::error::Result;
use crate::graph::builder::{Traversal, load_targets};
use crate::graph::resolution::{PathResolver, Target};
use crate::vault::{MentionSearch, NoteStore};
use log::{debug, info, warn};
use std::collections::BTreeSet;

/// Adds inferred edges among the notes that mention a traversal's root.
pub struct BacklinkMerger<'s, S: ?Sized> {
    store: &'s S,
    resolver: &'s PathResolver,
    aggregator: Option<String>,
}

impl<'s, S: NoteStore + MentionSearch + ?Sized> BacklinkMerger<'s, S> {
    pub fn new(store: &'s S, resolver: &'s PathResolver) -> Self {
        Self {
            store,
            resolver,
            aggregator: None,
        }
    }

    /// Skip the given index note as a source unless it is itself the root.
    pub fn with_aggregator(mut self, aggregator: Option<&str>) -> Self {
        self.aggregator = aggregator.map(str::to_string);
        self
    }

    /// Identities of notes whose text contains the literal `identity`.
    pub fn mentioning(&self, identity: &str) -> Result<BTreeSet<String>> {
        let paths = self.store.search(identity)?;
        Ok(paths
            .iter()
            .filter_map(|path| match self.resolver.identity_from_path(path) {
                Ok(id) => Some(id),
                Err(e) => {
                    warn!("ignoring search hit: {}", e);
                    None
                }
            })
            .collect())
    }

    /// Merge inferred edges into `traversal`. Returns the number of edges added.
    pub fn merge(&self, traversal: &mut Traversal) -> usize {
        let root = traversal.root.clone();
        let mentioning = match self.mentioning(&root) {
            Ok(mentioning) => mentioning,
            Err(e) => {
                warn!("mention search for {} failed, skipping backlinks: {}", root, e);
                return 0;
            }
        };
        debug!("{} notes mention {}", mentioning.len(), root);

        let mut relevant = mentioning.clone();
        relevant.insert(root.clone());

        let mut added = 0;
        for source in &mentioning {
            if self.is_aggregator(source) && !self.is_aggregator(&root) {
                debug!("skipping aggregator note {}", source);
                continue;
            }

            let targets = match load_targets(self.store, self.resolver, source) {
                Ok(targets) => targets,
                Err(e) => {
                    debug!("skipping {}: {}", source, e);
                    continue;
                }
            };

            for identity in targets.iter().filter_map(Target::as_note) {
                if relevant.contains(identity) {
                    traversal.graph.add_edge(source, identity);
                    added += 1;
                }
            }
        }

        info!("merged {} backlink edges into {}", added, root);
        traversal.backlink_edges += added;
        added
    }

    fn is_aggregator(&self, identity: &str) -> bool {
        self.aggregator.as_deref() == Some(identity)
    }
}
