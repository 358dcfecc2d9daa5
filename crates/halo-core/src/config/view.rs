//! View pipeline configuration
//!
//! Stored as YAML, e.g.:
//!
//! ```yaml
//! resolution: 256
//! window_seconds: 2.0
//! phantom_padding_seconds: 30.0
//! idle_epsilon: 0.0001
//! boost:
//!   min_threshold: 0.3
//!   max_multiplier: 4.0
//!   hysteresis: 0.05
//!   lerp_speed: 0.1
//!   epsilon: 0.000001
//! transition:
//!   duration_ms: 600
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::{ConfigError, ConfigResult};

/// Longest accepted focused window, in seconds
pub const MAX_WINDOW_SECONDS: f64 = 60.0;

/// Longest accepted phantom padding, in seconds
pub const MAX_PADDING_SECONDS: f64 = 3_600.0;

/// Root configuration for the waveform view pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Number of magnitudes delivered to the renderer per frame (N)
    pub resolution: usize,
    /// Length of the focused window around the playhead, in seconds
    pub window_seconds: f64,
    /// Synthetic silence appended after the track end, in seconds
    pub phantom_padding_seconds: f64,
    /// Playhead fractions below this count as "at the start" when choosing
    /// between the overview and the focused view
    pub idle_epsilon: f64,
    /// Quiet-window boost settings
    pub boost: BoostConfig,
    /// Overview/focused cross-fade settings
    pub transition: TransitionConfig,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            resolution: 256,
            window_seconds: 2.0,
            phantom_padding_seconds: 30.0,
            idle_epsilon: 1e-4,
            boost: BoostConfig::default(),
            transition: TransitionConfig::default(),
        }
    }
}

impl ViewConfig {
    /// Check every field the pipeline relies on
    pub fn validate(&self) -> ConfigResult<()> {
        if self.resolution == 0 {
            return Err(ConfigError::ZeroResolution(self.resolution));
        }
        if !(self.window_seconds > 0.0 && self.window_seconds <= MAX_WINDOW_SECONDS) {
            return Err(ConfigError::InvalidWindow(self.window_seconds));
        }
        if !(self.phantom_padding_seconds >= 0.0
            && self.phantom_padding_seconds <= MAX_PADDING_SECONDS)
        {
            return Err(ConfigError::InvalidPadding(self.phantom_padding_seconds));
        }
        if !(self.idle_epsilon.is_finite() && self.idle_epsilon >= 0.0) {
            return Err(ConfigError::InvalidIdleEpsilon(self.idle_epsilon));
        }
        self.boost.validate()
    }
}

/// Adaptive gain for quiet windows
///
/// A window whose peak sits below `min_threshold` of the track maximum is
/// boosted toward that threshold, never beyond `max_multiplier`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoostConfig {
    /// Window peak / track peak ratio below which boosting kicks in
    pub min_threshold: f32,
    /// Upper bound for the boost factor (and the output ceiling multiplier)
    pub max_multiplier: f32,
    /// Minimum change in the candidate factor before the target moves
    pub hysteresis: f32,
    /// Fraction of the remaining distance covered per frame
    pub lerp_speed: f32,
    /// Floor for the peak ratio in the boost division
    pub epsilon: f32,
}

impl Default for BoostConfig {
    fn default() -> Self {
        Self {
            min_threshold: 0.3,
            max_multiplier: 4.0,
            hysteresis: 0.05,
            lerp_speed: 0.1,
            epsilon: 1e-6,
        }
    }
}

impl BoostConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.max_multiplier.is_finite() && self.max_multiplier >= 1.0) {
            return Err(ConfigError::InvalidMaxMultiplier(self.max_multiplier));
        }
        if !(self.min_threshold > 0.0 && self.min_threshold <= 1.0) {
            return Err(ConfigError::InvalidThreshold(self.min_threshold));
        }
        if !(self.lerp_speed > 0.0 && self.lerp_speed <= 1.0) {
            return Err(ConfigError::InvalidLerpSpeed(self.lerp_speed));
        }
        if !(self.hysteresis.is_finite() && self.hysteresis >= 0.0) {
            return Err(ConfigError::InvalidHysteresis(self.hysteresis));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(ConfigError::InvalidEpsilon(self.epsilon));
        }
        Ok(())
    }

    /// Clamp hand-edited values into their supported ranges
    ///
    /// NaN fields fall back to their defaults.
    pub fn sanitize(&mut self) {
        let defaults = Self::default();
        let or_default = |v: f32, d: f32| if v.is_nan() { d } else { v };

        self.max_multiplier = or_default(self.max_multiplier, defaults.max_multiplier).clamp(1.0, 64.0);
        self.min_threshold = or_default(self.min_threshold, defaults.min_threshold).clamp(1e-3, 1.0);
        self.lerp_speed = or_default(self.lerp_speed, defaults.lerp_speed).clamp(1e-3, 1.0);
        self.hysteresis = or_default(self.hysteresis, defaults.hysteresis).clamp(0.0, self.max_multiplier);
        self.epsilon = or_default(self.epsilon, defaults.epsilon).clamp(f32::MIN_POSITIVE, 1.0);
    }
}

/// Timing of the overview/focused cross-fade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Full fade duration in milliseconds (0 switches instantly)
    pub duration_ms: u64,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self { duration_ms: 600 }
    }
}

impl TransitionConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}
