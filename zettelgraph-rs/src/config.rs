//! User configuration: where the notes live and how the link graph is explored.
//!
//! Configuration is read from TOML. The file location is taken from
//! `$ZETTELGRAPH_CONFIG` when set, otherwise `<config_dir>/zettelgraph/config.toml`.
//! A missing file is not an error; every field has a default.
//!
//! ```toml
//! vault = "~/wiki"
//! extension = "md"
//!
//! [graph]
//! sample_limit = 6000
//! max_depth = 1000
//! aggregator_note = "zettelKasten"
//! folder_trim = 1
//! ```

use crate::error::{Result, ZettelError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "ZETTELGRAPH_CONFIG";

/// Default number of destinations kept for a single note before sampling.
pub const DEFAULT_SAMPLE_LIMIT: usize = 6000;

/// Default bound on traversal depth.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Default hub note excluded from backlink inference.
pub const DEFAULT_AGGREGATOR_NOTE: &str = "zettelKasten";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root folder of the note collection. `~/` is expanded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vault: Option<PathBuf>,

    /// Note file extension, without the dot.
    pub extension: String,

    /// Traversal settings.
    pub graph: GraphConfig,
}

/// Settings for graph construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Destinations per note above which a uniform random sample is taken.
    pub sample_limit: usize,

    /// Maximum traversal depth from the root. `0` disables the bound.
    pub max_depth: usize,

    /// Hub note skipped during backlink inference. Empty disables the rule.
    pub aggregator_note: String,

    /// Number of trailing identity segments dropped to obtain a note's folder.
    ///
    /// `1` resolves relative links against the note's own folder. Collections
    /// whose links were written relative to the parent of that folder need `2`.
    pub folder_trim: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vault: None,
            extension: "md".to_string(),
            graph: GraphConfig::default(),
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            sample_limit: DEFAULT_SAMPLE_LIMIT,
            max_depth: DEFAULT_MAX_DEPTH,
            aggregator_note: DEFAULT_AGGREGATOR_NOTE.to_string(),
            folder_trim: 1,
        }
    }
}

impl GraphConfig {
    /// The depth bound, if any.
    pub fn max_depth(&self) -> Option<usize> {
        (self.max_depth > 0).then_some(self.max_depth)
    }

    /// The aggregator note identity, if any.
    pub fn aggregator_note(&self) -> Option<&str> {
        let note = self.aggregator_note.trim();
        (!note.is_empty()).then_some(note)
    }
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self> {
        match config_file_path() {
            Some(path) if path.is_file() => Self::load_from(&path),
            Some(path) => {
                log::debug!("no config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ZettelError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.extension.trim().is_empty() {
            return Err(ZettelError::ConfigError(
                "extension must not be empty".to_string(),
            ));
        }
        if self.graph.sample_limit == 0 {
            return Err(ZettelError::ConfigError(
                "graph.sample_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The extension without a leading dot.
    pub fn extension(&self) -> &str {
        self.extension.trim().trim_start_matches('.')
    }

    /// Pick the vault root: CLI override, then config, then `~/wiki`.
    pub fn resolve_vault_path(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        let chosen = cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.vault.clone())
            .or_else(|| dirs::home_dir().map(|home| home.join("wiki")))
            .ok_or_else(|| {
                ZettelError::ConfigError("no vault configured and no home directory".to_string())
            })?;

        let expanded = expand_home(&chosen);
        if !expanded.is_dir() {
            return Err(ZettelError::VaultNotFound(expanded));
        }
        Ok(expanded)
    }
}

fn config_file_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("zettelgraph").join("config.toml"))
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}
