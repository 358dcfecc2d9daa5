//! Per-session view engine
//!
//! Owns the only mutable state of the view pipeline: one overview cache slot,
//! one boost state, the transition animator and the diagnostics already
//! reported. Construct one per player; reset it with the session.
//!
//! Per frame:
//!
//! ```text
//!  playhead ─▶ window extraction ─▶ decimate ─▶ gain ─▶ focused ─┐
//!                                                                 ├─▶ blend / select ─▶ ViewFrame
//!  buffer ─────────────────────────▶ overview cache ─▶ overview ──┘
//! ```
//!
//! The engine is `Send` but not shared: drive it from the render task only.

use std::time::Duration;

use halo_core::config::{ConfigError, ViewConfig};
use halo_core::WaveformBuffer;

use super::blend::{blend, select_view, ViewSelection};
use super::decimate::decimate_into;
use super::diagnostics::{DiagnosticLog, InputIssue};
use super::gain::{BoostState, GainNormalizer};
use super::overview::OverviewCache;
use super::transition::{ViewTarget, ViewTransition};
use super::window::{ViewWindow, WindowParams, WindowRegion};

/// Playback state for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Normalized playhead (0.0 to 1.0)
    pub playhead: f64,
    /// Whether audio is currently playing
    pub is_playing: bool,
    /// Explicit blend factor from an external animator; when `None` the
    /// engine's own [`ViewTransition`] decides
    pub transition: Option<f32>,
}

impl FrameInput {
    pub fn new(playhead: f64, is_playing: bool) -> Self {
        Self {
            playhead,
            is_playing,
            transition: None,
        }
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct ViewFrame {
    /// Exactly `resolution` non-negative magnitudes
    pub series: Vec<f32>,
    /// Normalization reference (the track's global max amplitude)
    pub max_amplitude: f32,
    /// Which branch produced `series`
    pub selection: ViewSelection,
}

pub struct ViewEngine {
    config: ViewConfig,
    overview: OverviewCache,
    gain: GainNormalizer,
    transition: ViewTransition,
    diagnostics: DiagnosticLog,
    /// Scratch buffer for the raw window, reused across frames
    window_scratch: Vec<f32>,
}

impl ViewEngine {
    /// Build an engine, rejecting configurations the pipeline cannot run with
    pub fn new(config: ViewConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        log::info!(
            "ViewEngine: resolution {}, window {:.2}s, phantom padding {:.1}s",
            config.resolution,
            config.window_seconds,
            config.phantom_padding_seconds
        );

        Ok(Self {
            gain: GainNormalizer::new(config.boost.clone()),
            transition: ViewTransition::new(config.transition.duration()),
            overview: OverviewCache::new(),
            diagnostics: DiagnosticLog::new(),
            window_scratch: Vec::new(),
            config,
        })
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn resolution(&self) -> usize {
        self.config.resolution
    }

    /// Change the display resolution; the overview is recomputed lazily
    ///
    /// # Panics
    /// If `resolution` is zero.
    pub fn set_resolution(&mut self, resolution: usize) {
        assert!(resolution > 0, "display resolution must be positive");
        if resolution != self.config.resolution {
            log::debug!(
                "ViewEngine: resolution {} -> {}",
                self.config.resolution,
                resolution
            );
            self.config.resolution = resolution;
        }
    }

    pub fn boost_state(&self) -> BoostState {
        self.gain.state()
    }

    pub fn transition(&self) -> &ViewTransition {
        &self.transition
    }

    /// Begin fading toward the overview or the focused view
    pub fn begin_transition(&mut self, target: ViewTarget) {
        self.transition.start(target);
    }

    /// Advance the built-in transition by one frame's elapsed time
    pub fn advance_transition(&mut self, dt: Duration) {
        self.transition.advance(dt);
    }

    /// A new track was loaded: drop the cached overview and session state
    pub fn load(&mut self, buffer: &WaveformBuffer) {
        log::info!(
            "ViewEngine: loaded track ({} samples @ {} Hz, {:.2}s, peak {:.4})",
            buffer.len(),
            buffer.sample_rate(),
            buffer.duration_secs(),
            buffer.max_amplitude()
        );
        self.reset();
    }

    /// Reset session state (cache, boost, transition, reported diagnostics)
    pub fn reset(&mut self) {
        self.overview.invalidate();
        self.gain.reset();
        self.transition.reset();
        self.diagnostics.clear();
    }

    /// Whole-track series at the configured resolution (cached)
    pub fn overview(&mut self, buffer: &WaveformBuffer) -> &[f32] {
        if buffer.is_empty() {
            self.diagnostics.report(InputIssue::EmptyBuffer);
        }
        self.overview.get_or_compute(buffer, self.config.resolution)
    }

    /// Window descriptor for this frame, after coercing invalid inputs
    pub fn view_window(&mut self, buffer: &WaveformBuffer, playhead: f64) -> ViewWindow {
        let params = WindowParams::from_buffer(buffer, playhead, &self.config);
        let (params, issues) = params.sanitize(buffer.len());
        self.diagnostics.report_all(issues);
        ViewWindow::compute(&params, buffer.len())
    }

    /// Boosted window series around `playhead`, advancing the boost state
    pub fn focused(&mut self, buffer: &WaveformBuffer, playhead: f64) -> Vec<f32> {
        if buffer.is_empty() {
            self.diagnostics.report(InputIssue::EmptyBuffer);
        }

        let window = self.view_window(buffer, playhead);
        let mut raw = std::mem::take(&mut self.window_scratch);
        raw.resize(window.window_len, 0.0);
        window.extract_into(buffer.samples(), &mut raw);

        if window.region() == WindowRegion::Wrapped {
            log::trace!(
                "ViewEngine: window wrapped at sample {} (padded length {})",
                window.start_sample,
                window.padded_len()
            );
        }

        let mut series = vec![0.0; self.config.resolution];
        decimate_into(&raw, &mut series);
        self.window_scratch = raw;

        if !self.gain.normalize_in_place(&mut series, buffer.max_amplitude()) && !buffer.is_empty() {
            self.diagnostics.report(InputIssue::InvalidMaxAmplitude);
        }

        series
    }

    /// Produce the series for one animation frame
    pub fn frame(&mut self, buffer: &WaveformBuffer, input: &FrameInput) -> ViewFrame {
        let transition = match input.transition {
            Some(t) if !t.is_finite() => {
                self.diagnostics.report(InputIssue::NonFiniteTransition);
                self.transition.progress()
            }
            Some(t) => Some(t),
            None => self.transition.progress(),
        };

        // Branch selection and extraction must see the same position
        let playhead = if input.playhead.is_finite() {
            input.playhead.clamp(0.0, 1.0)
        } else {
            self.diagnostics.report(InputIssue::NonFinitePlayhead);
            0.0
        };

        let selection = select_view(
            transition,
            input.is_playing,
            playhead,
            self.config.idle_epsilon,
        );

        let series = match selection {
            ViewSelection::Overview => self.overview(buffer).to_vec(),
            ViewSelection::Focused => self.focused(buffer, playhead),
            ViewSelection::Blended { t } => {
                let focused = self.focused(buffer, playhead);
                blend(self.overview(buffer), &focused, t)
            }
        };

        ViewFrame {
            series,
            max_amplitude: buffer.max_amplitude(),
            selection,
        }
    }
}
