//! Frontier-based exploration of the link graph from a root note.
//!
//! The frontier is a stack, so exploration is depth-first and reproducible
//! for a given collection (unless sampling kicks in, see [`sample_targets`]).
//! Every note is read and expanded at most once, so cycles terminate without
//! a depth bound. With a depth bound, the smallest depth at which each note has
//! been reached is tracked; when a shorter path turns up after a note was
//! already expanded, the improvement is passed on to the notes it links to
//! without reading it again.

use crate::config::GraphConfig;
use crate::error::{Result, ZettelError};
use crate::graph::backlinks::BacklinkMerger;
use crate::graph::extract::extract;
use crate::graph::link_graph::LinkGraph;
use crate::graph::resolution::{PathResolver, Target};
use crate::parser::parse_document;
use crate::vault::{MentionSearch, NoteStore};
use log::{debug, info, warn};
use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use std::collections::{BTreeSet, HashMap};

/// Limits applied while exploring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalOptions {
    /// Destinations per note above which a uniform random sample is taken.
    pub sample_limit: usize,
    /// Notes whose shortest distance from the root exceeds this are kept as
    /// leaves and never expanded.
    pub max_depth: Option<usize>,
}

impl Default for TraversalOptions {
    fn default() -> Self {
        Self::from(&GraphConfig::default())
    }
}

impl From<&GraphConfig> for TraversalOptions {
    fn from(config: &GraphConfig) -> Self {
        Self {
            sample_limit: config.sample_limit.max(1),
            max_depth: config.max_depth(),
        }
    }
}

/// Result of exploring from a root note.
#[derive(Debug, Clone)]
pub struct Traversal {
    pub root: String,
    pub graph: LinkGraph,
    /// Identities whose expansion was attempted.
    pub visited: BTreeSet<String>,
    /// Identities that were linked to but could not be loaded.
    pub missing: BTreeSet<String>,
    /// Edges added by backlink inference.
    pub backlink_edges: usize,
}

impl Traversal {
    fn new(root: &str) -> Self {
        Self {
            root: root.to_string(),
            graph: LinkGraph::with_root(root),
            visited: BTreeSet::new(),
            missing: BTreeSet::new(),
            backlink_edges: 0,
        }
    }
}

/// Explores outbound references starting at a root note.
pub struct GraphBuilder<'s, S: ?Sized, R = ThreadRng> {
    store: &'s S,
    resolver: &'s PathResolver,
    options: TraversalOptions,
    rng: R,
}

impl<'s, S: NoteStore + ?Sized> GraphBuilder<'s, S> {
    /// Create a builder sampling with the thread-local RNG.
    pub fn new(store: &'s S, resolver: &'s PathResolver, options: TraversalOptions) -> Self {
        Self {
            store,
            resolver,
            options,
            rng: rand::thread_rng(),
        }
    }
}

impl<'s, S: NoteStore + ?Sized, R: Rng> GraphBuilder<'s, S, R> {
    /// Replace the sampling RNG, e.g. with a seeded one.
    pub fn with_rng<R2: Rng>(self, rng: R2) -> GraphBuilder<'s, S, R2> {
        GraphBuilder {
            store: self.store,
            resolver: self.resolver,
            options: self.options,
            rng,
        }
    }

    /// Explore from `root` until the frontier is empty.
    ///
    /// Fails only when the root note itself does not exist. Notes that cannot
    /// be loaded later on are recorded in [`Traversal::missing`].
    pub fn run(&mut self, root: &str) -> Result<Traversal> {
        let root_path = self.resolver.path_from_identity(root);
        if !self.store.exists(&root_path) {
            return Err(ZettelError::NoteNotFound(root_path));
        }

        let mut traversal = Traversal::new(root);
        let mut frontier = Frontier::new(root, self.options.max_depth);

        while let Some((current, depth)) = frontier.pop() {
            if traversal.visited.contains(&current) {
                // Reached again by a shorter path.
                frontier.relax(&current, depth);
                continue;
            }
            debug!(
                "expanding {} (depth {}, {} pending)",
                current,
                depth,
                frontier.len()
            );

            match load_targets(self.store, self.resolver, &current) {
                Ok(targets) => {
                    if targets.len() > self.options.sample_limit {
                        info!(
                            "{} has {} destinations, sampling {}",
                            current,
                            targets.len(),
                            self.options.sample_limit
                        );
                    }
                    let targets = sample_targets(targets, self.options.sample_limit, &mut self.rng);

                    let mut linked = Vec::new();
                    for target in targets {
                        let Target::Note(identity) = target else {
                            continue;
                        };
                        let is_new = traversal.graph.add_node(&identity);
                        frontier.offer(&identity, depth + 1, is_new);
                        traversal.graph.add_edge(&current, &identity);
                        linked.push(identity);
                    }
                    frontier.remember(&current, linked);
                }
                Err(e) => {
                    if e.is_not_found() {
                        warn!("linked note {} does not exist", current);
                    } else {
                        warn!("cannot expand {}: {}", current, e);
                    }
                    traversal.missing.insert(current.clone());
                }
            }

            traversal.visited.insert(current);
        }

        info!(
            "explored {} notes, {} nodes, {} edges",
            traversal.visited.len(),
            traversal.graph.node_count(),
            traversal.graph.edge_count()
        );
        Ok(traversal)
    }
}

/// LIFO stack of `(identity, depth)` pairs.
///
/// Without a depth bound a note is pushed only when it first enters the graph.
/// With a bound, a note is pushed whenever it is reached at a depth within the
/// bound that beats every depth seen for it so far; stale entries are dropped
/// on pop.
struct Frontier {
    stack: Vec<(String, usize)>,
    max_depth: Option<usize>,
    best_depth: HashMap<String, usize>,
    linked: HashMap<String, Vec<String>>,
}

impl Frontier {
    fn new(root: &str, max_depth: Option<usize>) -> Self {
        Self {
            stack: vec![(root.to_string(), 0)],
            max_depth,
            best_depth: HashMap::from([(root.to_string(), 0)]),
            linked: HashMap::new(),
        }
    }

    fn len(&self) -> usize {
        self.stack.len()
    }

    fn pop(&mut self) -> Option<(String, usize)> {
        while let Some((identity, depth)) = self.stack.pop() {
            let stale = self.best_depth.get(&identity).is_some_and(|&best| depth > best);
            if !stale {
                return Some((identity, depth));
            }
        }
        None
    }

    /// Consider `identity`, just reached at `depth`.
    fn offer(&mut self, identity: &str, depth: usize, is_new: bool) {
        let Some(max) = self.max_depth else {
            if is_new {
                self.stack.push((identity.to_string(), depth));
            }
            return;
        };
        if depth > max {
            return;
        }
        if self.best_depth.get(identity).is_some_and(|&best| best <= depth) {
            return;
        }
        self.best_depth.insert(identity.to_string(), depth);
        self.stack.push((identity.to_string(), depth));
    }

    /// Record the notes an expanded note links to, for later depth updates.
    fn remember(&mut self, identity: &str, linked: Vec<String>) {
        if self.max_depth.is_some() {
            self.linked.insert(identity.to_string(), linked);
        }
    }

    /// Pass a smaller depth of an already expanded note on to its links.
    fn relax(&mut self, identity: &str, depth: usize) {
        let Some(linked) = self.linked.remove(identity) else {
            return;
        };
        for next in &linked {
            self.offer(next, depth + 1, false);
        }
        self.linked.insert(identity.to_string(), linked);
    }
}

/// Load a note and classify every reference it contains.
pub fn load_targets<S: NoteStore + ?Sized>(
    store: &S,
    resolver: &PathResolver,
    identity: &str,
) -> Result<Vec<Target>> {
    let content = store.read(&resolver.path_from_identity(identity))?;
    let folder = resolver.folder_of(identity);
    let document = parse_document(&content);

    Ok(extract(&document)
        .map(|reference| resolver.resolve_destination(&folder, &reference.destination))
        .collect())
}

/// Keep at most `limit` items, chosen uniformly without replacement.
pub fn sample_targets<T: Clone, R: Rng + ?Sized>(items: Vec<T>, limit: usize, rng: &mut R) -> Vec<T> {
    if items.len() <= limit {
        return items;
    }
    items.choose_multiple(rng, limit).cloned().collect()
}

/// Explore from `root` and, if requested, merge inferred backlinks.
pub fn build_graph<S: NoteStore + MentionSearch + ?Sized>(
    store: &S,
    resolver: &PathResolver,
    config: &GraphConfig,
    root: &str,
    with_backlinks: bool,
) -> Result<Traversal> {
    info!("building graph for {}", root);
    let mut traversal =
        GraphBuilder::new(store, resolver, TraversalOptions::from(config)).run(root)?;

    if with_backlinks {
        let merger = BacklinkMerger::new(store, resolver).with_aggregator(config.aggregator_note());
        merger.merge(&mut traversal);
    }
    Ok(traversal)
}
