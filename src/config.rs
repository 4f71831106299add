//! Application configuration.
//!
//! The configuration is loaded from a JSON file, by default
//! `$XDG_CONFIG_HOME/wslabel/config.json`, or from the path given with
//! `--config <path>`.  Every field is optional.
//!
//! # Example
//!
//! ```json
//! {
//!   "empty_policy": "preserve-existing",
//!   "builtin_aliases": true,
//!   "aliases": {
//!     "firefox": "Web",
//!     "org.gnome.Nautilus": "Files"
//!   },
//!   "rename_on_title": false
//! }
//! ```

use crate::alias::AliasTable;
use crate::label::{EmptyPolicy, LabelSynthesizer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Top-level configuration.
///
/// A minimal `{}` file is valid; unknown keys are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How to label a workspace without windows.
    pub empty_policy: EmptyPolicy,
    /// Start from the compiled-in glyph table.
    pub builtin_aliases: bool,
    /// Extra aliases, applied over the built-in ones.
    pub aliases: BTreeMap<String, String>,
    /// Explicit IPC socket, bypassing discovery.
    pub socket_path: Option<PathBuf>,
    /// Also run a pass on `window::title` events.
    pub rename_on_title: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            empty_policy: EmptyPolicy::default(),
            builtin_aliases: true,
            aliases: BTreeMap::new(),
            socket_path: None,
            rename_on_title: false,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Like [`load`](Config::load), but a file that doesn't exist is
    /// `Ok(None)` rather than an error.  A file that exists but can't be
    /// read or parsed is still an error.
    pub fn load_optional(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    /// The alias table described by this configuration.
    pub fn alias_table(&self) -> AliasTable {
        let mut table = if self.builtin_aliases {
            AliasTable::builtin()
        } else {
            AliasTable::new()
        };
        table.extend(&self.aliases);
        table
    }

    /// A synthesizer wired with this configuration's aliases and policy.
    pub fn synthesizer(&self) -> LabelSynthesizer {
        LabelSynthesizer::new(self.alias_table(), self.empty_policy)
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);
