//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::prompts::DEFAULT_STYLE;

/// Environment variable holding the Clipdrop API key.
pub const CLIPDROP_KEY_ENV: &str = "CLIPDROP_API_KEY";

/// Supplies the Clipdrop API key at request time. `None` means not configured.
pub type KeySource = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// API key configuration.
    #[serde(default)]
    pub keys: KeysConfig,

    /// Default values used when the matching CLI flag is absent.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// API key configuration.
#[derive(Default, Deserialize)]
pub struct KeysConfig {
    /// Clipdrop API key.
    pub clipdrop: Option<String>,
}

impl std::fmt::Debug for KeysConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeysConfig")
            .field("clipdrop", &self.clipdrop.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Default parameter values from config file.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Default art style.
    pub style: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            style: DEFAULT_STYLE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Key source that re-reads `CLIPDROP_API_KEY` on every call and falls
    /// back to the file key.
    #[must_use]
    pub fn clipdrop_key_source(&self) -> KeySource {
        let file_key = self.keys.clipdrop.clone();
        Arc::new(move || {
            let env_key = std::env::var(CLIPDROP_KEY_ENV).ok();
            resolve_key(env_key, file_key.clone())
        })
    }
}

/// Pick the environment key over the file key. Blank values count as absent,
/// so an empty variable does not hide a key in the file.
fn resolve_key(env_key: Option<String>, file_key: Option<String>) -> Option<String> {
    let present = |key: &String| !key.trim().is_empty();
    env_key.filter(present).or_else(|| file_key.filter(present))
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `CLIPGEN_CONFIG` environment variable
/// 3. `~/.config/clipgen/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("CLIPGEN_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/clipgen/config.toml")
    } else {
        PathBuf::from("clipgen.toml")
    }
}
