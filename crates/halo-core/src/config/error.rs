//! Configuration error types

use thiserror::Error;

/// A display configuration the pipeline cannot run with
///
/// These indicate broken configuration rather than bad audio, so they are
/// reported once when an engine is built instead of being tolerated per frame.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Display resolution must produce at least one magnitude
    #[error("Display resolution must be positive, got {0}")]
    ZeroResolution(usize),

    /// Window duration must be positive and at most `MAX_WINDOW_SECONDS`
    #[error("Window duration must be in (0, 60] seconds, got {0}s")]
    InvalidWindow(f64),

    /// Phantom padding must be non-negative and at most `MAX_PADDING_SECONDS`
    #[error("Phantom padding must be in [0, 3600] seconds, got {0}s")]
    InvalidPadding(f64),

    /// Idle epsilon must be a non-negative, finite fraction
    #[error("Idle playhead epsilon must be non-negative and finite, got {0}")]
    InvalidIdleEpsilon(f64),

    /// Boost ceiling below unity would attenuate instead of boost
    #[error("Maximum boost multiplier must be >= 1.0, got {0}")]
    InvalidMaxMultiplier(f32),

    /// Quiet-window threshold must be a ratio in (0, 1]
    #[error("Boost threshold must be in (0, 1], got {0}")]
    InvalidThreshold(f32),

    /// Interpolation speed must be in (0, 1]
    #[error("Boost lerp speed must be in (0, 1], got {0}")]
    InvalidLerpSpeed(f32),

    /// Hysteresis must be a non-negative, finite factor delta
    #[error("Boost hysteresis must be non-negative and finite, got {0}")]
    InvalidHysteresis(f32),

    /// Epsilon guards a division and must be strictly positive
    #[error("Boost epsilon must be positive and finite, got {0}")]
    InvalidEpsilon(f32),
}

/// Result type for configuration validation
pub type ConfigResult<T> = Result<T, ConfigError>;
