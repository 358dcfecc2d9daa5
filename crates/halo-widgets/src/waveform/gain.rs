//! Adaptive boost for quiet focused windows
//!
//! A quiet passage decimated against the track's loudest moment would render
//! as a flat ring. The normalizer lifts such windows toward a minimum share of
//! the global maximum, and does it gradually so the ring never pops.
//!
//! # Algorithm
//!
//! 1. `ratio = window_peak / G`
//! 2. Below `min_threshold` (and not silent) the candidate boost is
//!    `min_threshold / max(ratio, epsilon)`, clamped to `[1, max_multiplier]`;
//!    otherwise the candidate is unity.
//! 3. The target only follows the candidate when they differ by more than the
//!    hysteresis, so small peak jitter does not retarget every frame.
//! 4. The applied factor moves a fixed fraction of the way to the target each
//!    frame (one-pole low-pass).
//! 5. Output is `min(value * factor, G * max_multiplier)`.

use halo_core::config::BoostConfig;

/// Smoothed boost factors; both stay within `[1, max_multiplier]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoostState {
    /// Factor applied to the current frame
    pub current_factor: f32,
    /// Factor the current one is gliding toward
    pub target_factor: f32,
}

impl Default for BoostState {
    fn default() -> Self {
        Self {
            current_factor: 1.0,
            target_factor: 1.0,
        }
    }
}

/// Session-scoped gain normalizer
///
/// Reset on every track load so a quiet ending does not carry its boost into
/// the next track's intro.
#[derive(Debug, Clone)]
pub struct GainNormalizer {
    config: BoostConfig,
    state: BoostState,
}

impl GainNormalizer {
    pub fn new(config: BoostConfig) -> Self {
        Self {
            config,
            state: BoostState::default(),
        }
    }

    pub fn config(&self) -> &BoostConfig {
        &self.config
    }

    pub fn state(&self) -> BoostState {
        self.state
    }

    /// Back to unity gain
    pub fn reset(&mut self) {
        self.state = BoostState::default();
    }

    /// Boost that would lift a window with `raw_peak` to the threshold
    pub fn candidate_boost(&self, raw_peak: f32, max_amplitude: f32) -> f32 {
        let ratio = raw_peak / max_amplitude;
        let boost = if ratio < self.config.min_threshold && raw_peak > 0.0 {
            self.config.min_threshold / ratio.max(self.config.epsilon)
        } else {
            1.0
        };
        boost.clamp(1.0, self.config.max_multiplier)
    }

    /// Retarget (with hysteresis) and advance the applied factor one frame
    ///
    /// Returns the factor to apply this frame.
    pub fn step(&mut self, raw_peak: f32, max_amplitude: f32) -> f32 {
        let candidate = self.candidate_boost(raw_peak, max_amplitude);
        let max = self.config.max_multiplier;

        if (candidate - self.state.target_factor).abs() > self.config.hysteresis {
            log::debug!(
                "GainNormalizer: retarget {:.3} -> {:.3} (peak {:.4} / max {:.4})",
                self.state.target_factor,
                candidate,
                raw_peak,
                max_amplitude
            );
            self.state.target_factor = candidate;
        }

        let current = self.state.current_factor;
        let next = current + (self.state.target_factor - current) * self.config.lerp_speed;
        self.state.current_factor = next.clamp(1.0, max);
        self.state.current_factor
    }

    /// Boost a decimated window in place
    ///
    /// Returns false (leaving `series` and the boost state untouched) when
    /// `max_amplitude` is not a positive finite number.
    pub fn normalize_in_place(&mut self, series: &mut [f32], max_amplitude: f32) -> bool {
        if !(max_amplitude.is_finite() && max_amplitude > 0.0) {
            log::debug!(
                "GainNormalizer: skipping boost, global max amplitude is {}",
                max_amplitude
            );
            return false;
        }

        let raw_peak = series.iter().copied().fold(0.0_f32, f32::max);
        let factor = self.step(raw_peak, max_amplitude);
        let ceiling = max_amplitude * self.config.max_multiplier;

        for value in series.iter_mut() {
            *value = (*value * factor).min(ceiling);
        }
        true
    }

    /// Boosted copy of a decimated window
    pub fn normalize(&mut self, series: &[f32], max_amplitude: f32) -> Vec<f32> {
        let mut out = series.to_vec();
        self.normalize_in_place(&mut out, max_amplitude);
        out
    }
}
