//
//  config.rs
//  cdbm
//

use serde::Deserialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::bookmark::PrettyStyle;
use crate::error::{CdbmError, Result};

/// Name of the config file inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Default store file name inside the config directory.
pub const STORE_FILE: &str = "store.json";

/// Top-level cdbm configuration (`config.toml`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CdbmConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Where bookmarks are kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    /// Store file. `~/` is expanded; relative paths are taken from the config
    /// directory.
    #[serde(default)]
    pub path: Option<String>,
}

/// How `list` and `show` render bookmarks.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Force styling on or off. Unset means "only on a terminal".
    #[serde(default)]
    pub color: Option<bool>,
    /// Show full directory paths.
    #[serde(default = "default_full_path")]
    pub full_path: bool,
    /// Width of the label column.
    #[serde(default = "default_label_width")]
    pub label_width: usize,
}

fn default_full_path() -> bool {
    true
}

fn default_label_width() -> usize {
    12
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: None,
            full_path: default_full_path(),
            label_width: default_label_width(),
        }
    }
}

impl CdbmConfig {
    /// Load config from a TOML file. A missing file yields the defaults; a
    /// file that exists but cannot be read or parsed is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(CdbmError::Config {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })
            }
        };

        toml::from_str(&contents).map_err(|e| CdbmError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Resolve the store file path.
    ///
    /// Precedence: explicit override (flag / env), then `[store].path`, then
    /// `<config dir>/store.json`. `None` when there is no override and no
    /// config directory to anchor the rest.
    pub fn resolve_store_path(
        &self,
        override_path: Option<&Path>,
        config_dir: Option<&Path>,
        home: Option<&Path>,
    ) -> Option<PathBuf> {
        if let Some(path) = override_path {
            return Some(path.to_path_buf());
        }

        let config_dir = config_dir?;
        let path = match self.store.path.as_deref() {
            Some(configured) => {
                let expanded = expand_home(configured, home);
                if expanded.is_absolute() {
                    expanded
                } else {
                    config_dir.join(expanded)
                }
            }
            None => config_dir.join(STORE_FILE),
        };
        Some(path)
    }

    /// Build the rendering style. `auto_color` is used when `color` is unset.
    pub fn pretty_style(&self, auto_color: bool) -> PrettyStyle {
        PrettyStyle {
            color: self.display.color.unwrap_or(auto_color),
            full_path: self.display.full_path,
            label_width: self.display.label_width,
        }
    }
}

/// `$XDG_CONFIG_HOME/cdbm`, falling back to `~/.config/cdbm`.
pub fn default_config_dir() -> Option<PathBuf> {
    config_dir_from(std::env::var_os("XDG_CONFIG_HOME"), dirs::home_dir())
}

fn config_dir_from(xdg_config_home: Option<OsString>, home: Option<PathBuf>) -> Option<PathBuf> {
    match xdg_config_home.filter(|dir| !dir.is_empty()) {
        Some(dir) => Some(PathBuf::from(dir).join("cdbm")),
        None => home.map(|home| home.join(".config").join("cdbm")),
    }
}

/// Expand a leading `~` or `~/` against `home`.
fn expand_home(path: &str, home: Option<&Path>) -> PathBuf {
    match (path, home) {
        ("~", Some(home)) => home.to_path_buf(),
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}
