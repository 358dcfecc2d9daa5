//! Focused-window extraction with phantom silence and wraparound
//!
//! The focused view shows a fixed-length slice of audio starting at the
//! playhead. To let that view animate smoothly past the end of the track, the
//! track is treated as if a stretch of silence (the phantom padding) followed
//! it, and positions beyond the padded length wrap back to the start:
//!
//! ```text
//!  0                     L                    L + padding
//!  |====== real audio ===|----- phantom -------|   then wraps to 0
//!
//!  InBounds        [start ........ end)                  end <= L
//!  PartialPhantom               [start ..|000000)        start < L < end
//!  Phantom                               [0000000000)    L <= start
//!  Wrapped   ..head)                  [start ..tail|     circular read
//! ```
//!
//! Every extraction returns a fresh buffer of exactly `W` samples, whatever
//! region the window falls in. Tracks shorter than one window use the same
//! rules; the modulo reduction against the padded length keeps them looping.

use halo_core::config::{ViewConfig, MAX_PADDING_SECONDS, MAX_WINDOW_SECONDS};
use halo_core::{WaveformBuffer, DEFAULT_SAMPLE_RATE, MAX_SAMPLE_RATE};

use super::diagnostics::{InputIssue, IssueSet};

// =============================================================================
// Extraction Parameters
// =============================================================================

/// Raw per-frame inputs to window extraction
///
/// May contain anything a collaborator hands over; call [`sanitize`] before
/// computing a [`ViewWindow`].
///
/// [`sanitize`]: WindowParams::sanitize
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowParams {
    /// Normalized playhead (0.0 = start, 1.0 = end)
    pub playhead: f64,
    /// Track duration in seconds, as reported by the loader
    pub duration_secs: f64,
    /// Samples per second
    pub sample_rate: f64,
    /// Window length in seconds
    pub window_seconds: f64,
    /// Phantom silence after the track end, in seconds
    pub padding_seconds: f64,
}

impl WindowParams {
    /// Gather parameters for a loaded buffer and display config
    pub fn from_buffer(buffer: &WaveformBuffer, playhead: f64, config: &ViewConfig) -> Self {
        Self {
            playhead,
            duration_secs: buffer.duration_secs(),
            sample_rate: buffer.sample_rate() as f64,
            window_seconds: config.window_seconds,
            padding_seconds: config.phantom_padding_seconds,
        }
    }

    /// Coerce invalid values to safe defaults
    ///
    /// - non-finite playhead → 0.0; finite playheads are clamped to [0, 1]
    /// - sample rate not in (0, [`MAX_SAMPLE_RATE`]] → [`DEFAULT_SAMPLE_RATE`]
    /// - non-positive or non-finite duration → `buffer_len / sample_rate`
    /// - negative or NaN padding → 0.0, oversized padding → [`MAX_PADDING_SECONDS`]
    /// - negative or NaN window → 0.0 (empty window), oversized window →
    ///   [`MAX_WINDOW_SECONDS`]
    ///
    /// Returns the sanitized parameters and the set of coercions applied.
    pub fn sanitize(&self, buffer_len: usize) -> (Self, IssueSet) {
        let mut issues = IssueSet::new();
        let mut params = *self;

        if !params.playhead.is_finite() {
            issues.insert(InputIssue::NonFinitePlayhead);
            params.playhead = 0.0;
        }
        params.playhead = params.playhead.clamp(0.0, 1.0);

        if !(params.sample_rate > 0.0 && params.sample_rate <= MAX_SAMPLE_RATE as f64) {
            issues.insert(InputIssue::InvalidSampleRate);
            params.sample_rate = DEFAULT_SAMPLE_RATE as f64;
        }

        if !(params.duration_secs.is_finite() && params.duration_secs > 0.0) {
            // An empty track legitimately has zero duration
            if buffer_len > 0 {
                issues.insert(InputIssue::InvalidDuration);
            }
            params.duration_secs = buffer_len as f64 / params.sample_rate;
        }

        if !(params.padding_seconds >= 0.0 && params.padding_seconds <= MAX_PADDING_SECONDS) {
            issues.insert(InputIssue::InvalidPadding);
            params.padding_seconds = if params.padding_seconds > MAX_PADDING_SECONDS {
                MAX_PADDING_SECONDS
            } else {
                0.0
            };
        }

        if !(params.window_seconds >= 0.0 && params.window_seconds <= MAX_WINDOW_SECONDS) {
            issues.insert(InputIssue::InvalidWindow);
            params.window_seconds = if params.window_seconds > MAX_WINDOW_SECONDS {
                MAX_WINDOW_SECONDS
            } else {
                0.0
            };
        }

        (params, issues)
    }
}

// =============================================================================
// View Window
// =============================================================================

/// Which part of the virtual (padded, looping) timeline a window covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowRegion {
    /// Entirely inside the real audio
    InBounds,
    /// Starts in real audio, runs into the phantom silence
    PartialPhantom,
    /// Entirely inside the phantom silence (or the track is empty)
    Phantom,
    /// Start wrapped past the padded length; reads the tail then the head
    Wrapped,
}

/// View Window descriptor, recomputed every frame from the playhead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewWindow {
    /// First sample under the playhead (before wraparound)
    pub start_sample: usize,
    /// `start_sample + window_len`
    pub end_sample: usize,
    /// Phantom silence appended after the real audio
    pub padding_samples: usize,
    /// Window length W
    pub window_len: usize,
    /// Real audio length L
    pub buffer_len: usize,
}

impl ViewWindow {
    /// Derive the window for already-sanitized parameters
    pub fn compute(params: &WindowParams, buffer_len: usize) -> Self {
        let rate = params.sample_rate;
        let current_time = params.playhead * params.duration_secs;
        let start_sample = (current_time * rate).round().max(0.0) as usize;
        let window_len = (params.window_seconds * rate).round().max(0.0) as usize;
        let padding_samples = (params.padding_seconds * rate).floor().max(0.0) as usize;

        Self {
            start_sample,
            end_sample: start_sample.saturating_add(window_len),
            padding_samples,
            window_len,
            buffer_len,
        }
    }

    /// Real audio plus phantom silence
    #[inline]
    pub fn padded_len(&self) -> usize {
        self.buffer_len.saturating_add(self.padding_samples)
    }

    /// True if the start lies beyond the padded length and wraps around
    #[inline]
    pub fn is_wrapped(&self) -> bool {
        self.padded_len() > 0 && self.start_sample >= self.padded_len()
    }

    /// Start position after reduction modulo the padded length
    #[inline]
    pub fn effective_start(&self) -> usize {
        if self.is_wrapped() {
            self.start_sample % self.padded_len()
        } else {
            self.start_sample
        }
    }

    pub fn region(&self) -> WindowRegion {
        let start = self.effective_start();
        let len = self.buffer_len;

        if start >= len {
            WindowRegion::Phantom
        } else if start.saturating_add(self.window_len) <= len {
            WindowRegion::InBounds
        } else if self.is_wrapped() {
            WindowRegion::Wrapped
        } else {
            WindowRegion::PartialPhantom
        }
    }

    /// Copy this window out of `samples` into a new buffer of `window_len`
    ///
    /// `samples` is the buffer the window was computed for; if it is shorter
    /// than `buffer_len` the missing part reads as silence.
    pub fn extract(&self, samples: &[f32]) -> Vec<f32> {
        let mut out = vec![0.0; self.window_len];
        self.extract_into(samples, &mut out);
        out
    }

    /// [`extract`](Self::extract) into a caller-owned buffer of `window_len`
    pub fn extract_into(&self, samples: &[f32], out: &mut [f32]) {
        assert_eq!(out.len(), self.window_len, "output must hold exactly one window");
        out.fill(0.0);

        let len = self.buffer_len.min(samples.len());
        let start = self.effective_start();
        if start >= len || self.window_len == 0 {
            return;
        }

        match self.region() {
            WindowRegion::InBounds => {
                // Zero-padding covers a caller buffer shorter than buffer_len
                let end = start.saturating_add(self.window_len).min(len);
                out[..end - start].copy_from_slice(&samples[start..end]);
            }
            WindowRegion::PartialPhantom => {
                let tail = len - start;
                out[..tail].copy_from_slice(&samples[start..len]);
            }
            WindowRegion::Phantom => {}
            WindowRegion::Wrapped => {
                let tail = len - start;
                out[..tail].copy_from_slice(&samples[start..len]);

                // Head fills what the tail left, bounded by the track
                let head = (self.window_len - tail).min(len);
                out[tail..tail + head].copy_from_slice(&samples[..head]);
            }
        }
    }
}

// =============================================================================
// Convenience
// =============================================================================

/// Extract the focused window for `buffer` at `playhead`
///
/// Invalid inputs are coerced (see [`WindowParams::sanitize`]) and logged;
/// the result always has `round(window_seconds * sample_rate)` samples.
pub fn prepare_window(buffer: &WaveformBuffer, playhead: f64, config: &ViewConfig) -> Vec<f32> {
    let params = WindowParams::from_buffer(buffer, playhead, config);
    let (params, issues) = params.sanitize(buffer.len());
    for issue in issues.iter() {
        log::warn!("prepare_window: {}", issue.describe());
    }

    let window = ViewWindow::compute(&params, buffer.len());
    window.extract(buffer.samples())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Buffer whose sample i has value i + 1 (so silence is distinguishable)
    fn ramp(len: usize) -> Vec<f32> {
        (0..len).map(|i| (i + 1) as f32).collect()
    }

    /// Parameters with a 1 Hz "sample rate" so seconds == samples
    fn params(playhead: f64, len: usize, window: usize, padding: usize) -> WindowParams {
        WindowParams {
            playhead,
            duration_secs: len as f64,
            sample_rate: 1.0,
            window_seconds: window as f64,
            padding_seconds: padding as f64,
        }
    }

    fn window_at(start: usize, window_len: usize, padding: usize, len: usize) -> ViewWindow {
        ViewWindow {
            start_sample: start,
            end_sample: start.saturating_add(window_len),
            padding_samples: padding,
            window_len,
            buffer_len: len,
        }
    }

    #[test]
    fn test_derived_values() {
        let p = WindowParams {
            playhead: 0.5,
            duration_secs: 10.0,
            sample_rate: 100.0,
            window_seconds: 0.5,
            padding_seconds: 0.255,
        };
        let window = ViewWindow::compute(&p, 1_000);
        assert_eq!(window.start_sample, 500);
        assert_eq!(window.window_len, 50);
        assert_eq!(window.end_sample, 550);
        assert_eq!(window.padding_samples, 25, "Padding is floored");
        assert_eq!(window.padded_len(), 1_025);
    }

    #[test]
    fn test_in_bounds_slice() {
        let samples = ramp(20);
        let window = ViewWindow::compute(&params(0.25, 20, 4, 10), 20);
        assert_eq!(window.region(), WindowRegion::InBounds);
        assert_eq!(window.extract(&samples), vec![6.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn test_window_ending_exactly_at_track_end_is_in_bounds() {
        let samples = ramp(8);
        let window = window_at(4, 4, 10, 8);
        assert_eq!(window.region(), WindowRegion::InBounds);
        assert_eq!(window.extract(&samples), vec![5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn test_partial_phantom_pads_with_silence() {
        let samples = ramp(10);
        let window = window_at(8, 5, 10, 10);
        assert_eq!(window.region(), WindowRegion::PartialPhantom);
        assert_eq!(window.extract(&samples), vec![9.0, 10.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_full_phantom_is_silence() {
        let samples = ramp(10);
        let window = window_at(12, 4, 10, 10);
        assert_eq!(window.region(), WindowRegion::Phantom);
        assert_eq!(window.extract(&samples), vec![0.0; 4]);
    }

    #[test]
    fn test_wrapped_contiguous_slice() {
        let samples = ramp(10);
        // padded = 15, start 17 wraps to 2
        let window = window_at(17, 4, 5, 10);
        assert!(window.is_wrapped());
        assert_eq!(window.effective_start(), 2);
        assert_eq!(window.region(), WindowRegion::InBounds);
        assert_eq!(window.extract(&samples), vec![3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_wrapped_circular_read() {
        let samples = ramp(10);
        // padded = 15, start 23 wraps to 8: tail [8, 10) then head [0, 2)
        let window = window_at(23, 4, 5, 10);
        assert_eq!(window.region(), WindowRegion::Wrapped);
        assert_eq!(window.extract(&samples), vec![9.0, 10.0, 1.0, 2.0]);
    }

    #[test]
    fn test_wrapped_into_phantom_is_silence() {
        let samples = ramp(10);
        // padded = 15, start 27 wraps to 12, inside the phantom region
        let window = window_at(27, 3, 5, 10);
        assert!(window.is_wrapped());
        assert_eq!(window.region(), WindowRegion::Phantom);
        assert_eq!(window.extract(&samples), vec![0.0; 3]);
    }

    #[test]
    fn test_wrapped_head_is_bounded_by_track() {
        // L = 4 shorter than W = 7: tail [1, 4) + head [0, 4)
        let samples = ramp(4);
        let window = window_at(7, 7, 2, 4); // padded = 6, start 7 -> 1
        assert_eq!(window.region(), WindowRegion::Wrapped);
        assert_eq!(
            window.extract(&samples),
            vec![2.0, 3.0, 4.0, 1.0, 2.0, 3.0, 4.0]
        );

        // W = 10: tail 3 + head 4, then silence
        let wide = window_at(7, 10, 2, 4);
        assert_eq!(
            wide.extract(&samples),
            vec![2.0, 3.0, 4.0, 1.0, 2.0, 3.0, 4.0, 0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_wrap_uses_modulo_for_far_starts() {
        let samples = ramp(10);
        // padded = 12, 12 * 3 + 5 = 41 -> 5
        let window = window_at(41, 3, 2, 10);
        assert_eq!(window.effective_start(), 5);
        assert_eq!(window.extract(&samples), vec![6.0, 7.0, 8.0]);
    }

    #[test]
    fn test_short_audio_at_start() {
        // L = 3 < W = 6
        let samples = ramp(3);
        let window = ViewWindow::compute(&params(0.0, 3, 6, 4), 3);
        assert_eq!(window.region(), WindowRegion::PartialPhantom);
        assert_eq!(window.extract(&samples), vec![1.0, 2.0, 3.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_short_audio_without_padding_loops() {
        // No padding: padded = L = 3, playhead at the end wraps to 0
        let samples = ramp(3);
        let window = ViewWindow::compute(&params(1.0, 3, 6, 0), 3);
        assert!(window.is_wrapped());
        assert_eq!(window.effective_start(), 0);
        assert_eq!(window.region(), WindowRegion::Wrapped);
        assert_eq!(window.extract(&samples), vec![1.0, 2.0, 3.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_every_region_has_window_length() {
        let samples = ramp(50);
        for start in 0..200 {
            for (window_len, padding) in [(8, 0), (8, 13), (64, 5), (1, 1)] {
                let window = window_at(start, window_len, padding, 50);
                assert_eq!(
                    window.extract(&samples).len(),
                    window_len,
                    "start {} window {} padding {}",
                    start,
                    window_len,
                    padding
                );
            }
        }
    }

    #[test]
    fn test_empty_buffer_gives_silence() {
        let window = ViewWindow::compute(&params(0.3, 0, 5, 2), 0);
        assert_eq!(window.region(), WindowRegion::Phantom);
        assert_eq!(window.extract(&[]), vec![0.0; 5]);

        let no_padding = ViewWindow::compute(&params(0.0, 0, 5, 0), 0);
        assert_eq!(no_padding.extract(&[]), vec![0.0; 5]);
    }

    #[test]
    fn test_caller_buffer_shorter_than_declared() {
        let window = window_at(2, 4, 0, 10);
        assert_eq!(window.extract(&ramp(4)), vec![3.0, 4.0, 0.0, 0.0]);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let samples = ramp(30);
        let window = window_at(25, 8, 3, 30);
        assert_eq!(window.extract(&samples), window.extract(&samples));
        assert_eq!(samples, ramp(30), "Source must not be modified");
    }

    #[test]
    fn test_sanitize_coerces_invalid_inputs() {
        let raw = WindowParams {
            playhead: f64::NAN,
            duration_secs: -3.0,
            sample_rate: 0.0,
            window_seconds: 1.0,
            padding_seconds: f64::INFINITY,
        };
        let (p, issues) = raw.sanitize(88_200);

        assert_eq!(p.playhead, 0.0);
        assert_eq!(p.sample_rate, DEFAULT_SAMPLE_RATE as f64);
        assert!((p.duration_secs - 2.0).abs() < 1e-9);
        assert_eq!(p.padding_seconds, MAX_PADDING_SECONDS);
        assert!(issues.contains(InputIssue::NonFinitePlayhead));
        assert!(issues.contains(InputIssue::InvalidSampleRate));
        assert!(issues.contains(InputIssue::InvalidDuration));
        assert!(issues.contains(InputIssue::InvalidPadding));
        assert!(!issues.contains(InputIssue::InvalidWindow));
    }

    #[test]
    fn test_sanitize_bounds_oversized_lengths() {
        let raw = WindowParams {
            playhead: 0.5,
            duration_secs: 10.0,
            sample_rate: 1e12,
            window_seconds: 1e15,
            padding_seconds: -2.0,
        };
        let (p, issues) = raw.sanitize(441_000);

        assert_eq!(p.sample_rate, DEFAULT_SAMPLE_RATE as f64);
        assert_eq!(p.window_seconds, MAX_WINDOW_SECONDS);
        assert_eq!(p.padding_seconds, 0.0);
        assert!(issues.contains(InputIssue::InvalidSampleRate));
        assert!(issues.contains(InputIssue::InvalidWindow));
        assert!(issues.contains(InputIssue::InvalidPadding));
    }

    #[test]
    fn test_huge_padding_does_not_overflow() {
        let samples = ramp(10);
        let window = window_at(usize::MAX - 2, 4, usize::MAX, 10);
        assert_eq!(window.padded_len(), usize::MAX);
        assert!(!window.is_wrapped());
        assert_eq!(window.region(), WindowRegion::Phantom);
        assert_eq!(window.extract(&samples), vec![0.0; 4]);

        let in_track = window_at(8, usize::MAX, usize::MAX, 10);
        assert_eq!(in_track.region(), WindowRegion::PartialPhantom);
    }

    #[test]
    fn test_sanitize_clamps_playhead_silently() {
        let (p, issues) = params(1.7, 10, 2, 0).sanitize(10);
        assert_eq!(p.playhead, 1.0);
        assert!(issues.is_empty());

        let (p, _) = params(-0.5, 10, 2, 0).sanitize(10);
        assert_eq!(p.playhead, 0.0);
    }

    #[test]
    fn test_empty_track_zero_duration_is_not_an_issue() {
        let (_, issues) = params(0.0, 0, 2, 0).sanitize(0);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_prepare_window_near_end() {
        let config = ViewConfig {
            window_seconds: 1.0,
            phantom_padding_seconds: 30.0,
            ..Default::default()
        };
        let buffer = WaveformBuffer::new(vec![0.5; 1_000], 100);
        // 10 s track, playhead 0.95 -> start 950, W = 100
        let out = prepare_window(&buffer, 0.95, &config);
        assert_eq!(out.len(), 100);
        assert!(out[..50].iter().all(|&s| s == 0.5));
        assert!(out[50..].iter().all(|&s| s == 0.0));
    }
}
