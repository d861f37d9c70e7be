//! Config file location.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// File name inside the config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name under the XDG config root.
const APP_DIR_NAME: &str = "moviefind";

/// Resolves the config file path.
///
/// - If `dir` is `Some`, returns `{dir}/config.toml`.
/// - Else if `XDG_CONFIG_HOME` is set and non-empty, returns
///   `$XDG_CONFIG_HOME/moviefind/config.toml`.
/// - Otherwise returns `~/.config/moviefind/config.toml`.
///
/// # Errors
///
/// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is usable (when `dir` is `None`).
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    let xdg = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);
    let home = std::env::var_os("HOME").map(PathBuf::from);
    config_path_from(dir.map(PathBuf::as_path), xdg.as_deref(), home.as_deref())
}

fn config_path_from(dir: Option<&Path>, xdg: Option<&Path>, home: Option<&Path>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE_NAME));
    }
    if let Some(x) = xdg.filter(|x| !x.as_os_str().is_empty()) {
        return Ok(x.join(APP_DIR_NAME).join(CONFIG_FILE_NAME));
    }
    match home.filter(|h| !h.as_os_str().is_empty()) {
        Some(h) => Ok(h.join(".config").join(APP_DIR_NAME).join(CONFIG_FILE_NAME)),
        None => bail!("HOME environment variable is not set"),
    }
}
