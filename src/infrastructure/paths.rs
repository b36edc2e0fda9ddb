//! Path handling for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is mounted under `/host`, which points
//! to the cwd of the last focused terminal (or the folder Zellij was started
//! from). Dataset paths from the configuration are resolved against it.

use std::path::{Path, PathBuf};

/// Sandbox mount point of the host filesystem.
pub const HOST_ROOT: &str = "/host";

/// Returns the directory holding the plugin's own files (trace output).
///
/// # Examples
///
/// ```
/// use licensemap::infrastructure::get_state_dir;
///
/// let dir = get_state_dir();
/// assert_eq!(dir.to_str().unwrap(), "/host/.local/share/zellij/licensemap");
/// ```
#[must_use]
pub fn get_state_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT).join(".local/share/zellij").join("licensemap")
}

/// Expands tilde paths to use the `/host` prefix.
///
/// # Examples
///
/// ```
/// use licensemap::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/dados"), "/host/dados");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/srv/dados"), "/srv/dados");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', HOST_ROOT, 1)
    } else if path == "~" {
        HOST_ROOT.to_string()
    } else {
        path.to_string()
    }
}

/// Resolves a data file against the configured data directory.
///
/// Absolute and tilde paths are taken as they are; anything else is joined to
/// `data_dir`, which itself is relative to `/host` unless absolute.
///
/// # Examples
///
/// ```
/// use licensemap::infrastructure::resolve_data_path;
///
/// assert_eq!(
///     resolve_data_path("dados", "pedidos_licenca.geojson"),
///     "/host/dados/pedidos_licenca.geojson"
/// );
/// assert_eq!(resolve_data_path("dados", "/srv/limite.geojson"), "/srv/limite.geojson");
/// assert_eq!(resolve_data_path("~/gis", "rios.geojson"), "/host/gis/rios.geojson");
/// ```
#[must_use]
pub fn resolve_data_path(data_dir: &str, file: &str) -> String {
    let file = expand_tilde(file);
    if Path::new(&file).is_absolute() {
        return file;
    }

    let dir = expand_tilde(data_dir);
    let dir = if Path::new(&dir).is_absolute() {
        PathBuf::from(dir)
    } else {
        PathBuf::from(HOST_ROOT).join(dir)
    };

    dir.join(file).to_string_lossy().into_owned()
}

/// Removes the `/host` prefix for display.
#[must_use]
pub fn strip_host_prefix(path: &str) -> String {
    path.strip_prefix(HOST_ROOT).unwrap_or(path).to_string()
}
