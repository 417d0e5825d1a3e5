//! Layered configuration
//!
//! Sources, later wins:
//! 1. built-in defaults
//! 2. `<config dir>/fwdport/config.toml`
//! 3. `<git-dir>/fwdport/config.toml`

use crate::error::{Error, Result};
use crate::pending::state_dir;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Filename of both the user and repository config files.
const CONFIG_FILE: &str = "config.toml";

/// What to do when a merge stops on conflicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictMode {
    /// Wait for the operator in the same session when attached to a terminal
    #[default]
    Prompt,
    /// Save the step and exit; finish with `fwdport continue`
    Suspend,
}

/// Effective configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Length passed to `git rev-parse --short=N`
    pub abbrev_length: Option<usize>,
    /// Conflict handling
    pub conflict_mode: ConflictMode,
}

/// One config file; unset fields leave the lower layer alone
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    abbrev_length: Option<usize>,
    conflict_mode: Option<ConflictMode>,
}

impl Config {
    fn apply(&mut self, layer: ConfigFile) {
        if layer.abbrev_length.is_some() {
            self.abbrev_length = layer.abbrev_length;
        }
        if let Some(mode) = layer.conflict_mode {
            self.conflict_mode = mode;
        }
    }
}

/// Path of the user-level config file, if the platform has a config dir
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("fwdport").join(CONFIG_FILE))
}

/// Path of the repository-level config file
pub fn repo_config_path(git_dir: &Path) -> PathBuf {
    state_dir(git_dir).join(CONFIG_FILE)
}

/// Load the effective configuration for the repository at `git_dir`
pub fn load_config(git_dir: &Path) -> Result<Config> {
    let mut paths = Vec::new();
    if let Some(user) = user_config_path() {
        paths.push(user);
    }
    paths.push(repo_config_path(git_dir));
    load_config_from(&paths)
}

/// Load configuration from explicit files, lowest precedence first
pub fn load_config_from(paths: &[PathBuf]) -> Result<Config> {
    let mut config = Config::default();
    for path in paths {
        if let Some(layer) = read_layer(path)? {
            config.apply(layer);
        }
    }
    if config.abbrev_length == Some(0) {
        return Err(Error::Config("abbrev_length must be at least 1".to_string()));
    }
    Ok(config)
}

fn read_layer(path: &Path) -> Result<Option<ConfigFile>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
    let layer = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))?;
    Ok(Some(layer))
}
