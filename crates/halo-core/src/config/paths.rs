//! Standard locations for halo configuration files

use std::path::PathBuf;

/// Directory holding halo configuration
///
/// Returns: `<platform config dir>/halo` (e.g. `~/.config/halo` on Linux),
/// or `./halo` when the platform has no config directory.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("halo")
}

/// Path of a named config file inside [`default_config_dir`]
pub fn default_config_path(filename: &str) -> PathBuf {
    default_config_dir().join(filename)
}
