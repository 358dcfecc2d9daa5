//! YAML configuration loading and saving
//!
//! A missing or malformed file never stops the player: loading falls back to
//! defaults and logs why. Saving is the only fallible direction.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Load configuration from a YAML file
///
/// Returns `T::default()` when the file is absent, unreadable or unparsable.
///
/// ```ignore
/// let config: ViewConfig = load_config(Path::new("view.yaml"));
/// ```
pub fn load_config<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    log::info!("load_config: Loading from {:?}", path);

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("load_config: {:?} doesn't exist, using defaults", path);
            return T::default();
        }
        Err(e) => {
            log::warn!("load_config: Failed to read {:?}: {}, using defaults", path, e);
            return T::default();
        }
    };

    match serde_yaml::from_str::<T>(&contents) {
        Ok(config) => {
            log::info!("load_config: Loaded {:?}", path);
            config
        }
        Err(e) => {
            log::warn!("load_config: Failed to parse {:?}: {}, using defaults", path, e);
            T::default()
        }
    }
}

/// Save configuration to a YAML file, creating parent directories
///
/// The YAML is written to a sibling `.tmp` file and renamed into place, so an
/// interrupted save leaves the previous file intact.
pub fn save_config<T>(config: &T, path: &Path) -> Result<()>
where
    T: Serialize,
{
    let yaml = serde_yaml::to_string(config).context("Cannot serialize config to YAML")?;

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create config directory {:?}", dir))?;
    }

    let staging = path.with_extension("yaml.tmp");
    std::fs::write(&staging, &yaml)
        .with_context(|| format!("Cannot write {:?}", staging))?;
    std::fs::rename(&staging, path)
        .with_context(|| format!("Cannot move {:?} into place", staging))?;

    log::info!("save_config: Wrote {} bytes to {:?}", yaml.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewConfig;

    #[test]
    fn test_load_nonexistent_returns_default() {
        let config: ViewConfig = load_config(Path::new("/nonexistent/halo/view.yaml"));
        assert_eq!(config, ViewConfig::default());
    }

    #[test]
    fn test_load_malformed_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.yaml");
        std::fs::write(&path, "resolution: [not, a, number]").unwrap();

        let config: ViewConfig = load_config(&path);
        assert_eq!(config, ViewConfig::default());
    }

    #[test]
    fn test_save_creates_parent_dirs_and_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("halo").join("view.yaml");

        let mut config = ViewConfig::default();
        config.resolution = 96;
        config.boost.max_multiplier = 3.0;

        save_config(&config, &path).unwrap();
        let loaded: ViewConfig = load_config(&path);

        assert_eq!(loaded.resolution, 96);
        assert_eq!(loaded.boost.max_multiplier, 3.0);
        assert!(!path.with_extension("yaml.tmp").exists(), "Staging file should be renamed away");
    }

    #[test]
    fn test_save_overwrites_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.yaml");

        let mut config = ViewConfig::default();
        save_config(&config, &path).unwrap();
        config.window_seconds = 4.0;
        save_config(&config, &path).unwrap();

        let loaded: ViewConfig = load_config(&path);
        assert_eq!(loaded.window_seconds, 4.0);
    }
}
