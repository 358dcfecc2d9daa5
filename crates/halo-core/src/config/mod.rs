//! Display configuration for the halo waveform view
//!
//! Every tunable the view pipeline uses (resolution, window length, phantom
//! padding, boost thresholds, transition timing) lives in [`ViewConfig`] and is
//! passed to the engine at construction. Nothing in the pipeline reads global
//! constants.
//!
//! # Usage
//!
//! ```ignore
//! use halo_core::config::{default_config_path, load_config, save_config, ViewConfig};
//!
//! let path = default_config_path("view.yaml");
//! let config: ViewConfig = load_config(&path);
//! config.validate()?;
//!
//! save_config(&config, &path)?;
//! ```

mod error;
mod io;
mod paths;
mod view;

pub use error::{ConfigError, ConfigResult};
pub use io::{load_config, save_config};
pub use paths::{default_config_dir, default_config_path};
pub use view::{
    BoostConfig, TransitionConfig, ViewConfig, MAX_PADDING_SECONDS, MAX_WINDOW_SECONDS,
};
