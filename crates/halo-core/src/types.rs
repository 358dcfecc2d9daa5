//! Common types for Halo
//!
//! The loader decodes a track once and hands the pipeline a [`WaveformBuffer`].
//! The buffer is shared by reference count and never mutated afterwards, so the
//! render loop can hold on to it across frames without copying samples.

use std::fmt;
use std::sync::Arc;

/// Sample rate assumed when a collaborator reports an unusable one
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Highest sample rate the view pipeline accepts from a collaborator
pub const MAX_SAMPLE_RATE: u32 = 384_000;

/// Audio sample type (mono amplitude, nominally in -1.0..=1.0)
pub type Sample = f32;

/// Largest absolute sample value, ignoring non-finite samples
///
/// This is the Global Max Amplitude used as the normalization reference for
/// every frame. Returns 0.0 for empty or all-silent input.
pub fn global_max_amplitude(samples: &[Sample]) -> f32 {
    samples
        .iter()
        .copied()
        .filter(|s| s.is_finite())
        .map(f32::abs)
        .fold(0.0_f32, f32::max)
}

/// Decoded mono track, immutable for the lifetime of a loaded track
///
/// Cloning is cheap: clones share the same sample storage.
#[derive(Clone)]
pub struct WaveformBuffer {
    samples: Arc<[Sample]>,
    sample_rate: u32,
    duration_secs: f64,
    max_amplitude: f32,
}

impl WaveformBuffer {
    /// Wrap decoded samples, deriving the duration from the sample count
    pub fn new(samples: impl Into<Arc<[Sample]>>, sample_rate: u32) -> Self {
        let samples = samples.into();
        let duration_secs = if sample_rate > 0 {
            samples.len() as f64 / sample_rate as f64
        } else {
            0.0
        };
        Self::with_duration(samples, sample_rate, duration_secs)
    }

    /// Wrap decoded samples with a duration reported by the decoder
    ///
    /// Decoders sometimes report a duration that differs slightly from
    /// `len / sample_rate` (encoder delay, padding frames). The playhead maps
    /// onto this reported duration.
    pub fn with_duration(
        samples: impl Into<Arc<[Sample]>>,
        sample_rate: u32,
        duration_secs: f64,
    ) -> Self {
        let samples = samples.into();
        let max_amplitude = global_max_amplitude(&samples);

        log::debug!(
            "WaveformBuffer: {} samples @ {} Hz, {:.3}s, peak {:.4}",
            samples.len(),
            sample_rate,
            duration_secs,
            max_amplitude
        );

        Self {
            samples,
            sample_rate,
            duration_secs,
            max_amplitude,
        }
    }

    /// A buffer with no audio (placeholder before the first load)
    pub fn empty() -> Self {
        Self::new(Vec::new(), DEFAULT_SAMPLE_RATE)
    }

    #[inline]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Shared handle to the sample storage (identity of the loaded track)
    #[inline]
    pub fn shared_samples(&self) -> &Arc<[Sample]> {
        &self.samples
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    #[inline]
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Global Max Amplitude, computed once at construction
    #[inline]
    pub fn max_amplitude(&self) -> f32 {
        self.max_amplitude
    }

    /// True when both handles point at the same sample storage
    pub fn same_track(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.samples, &other.samples)
    }
}

impl Default for WaveformBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for WaveformBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaveformBuffer")
            .field("samples", &format!("<{} samples>", self.samples.len()))
            .field("sample_rate", &self.sample_rate)
            .field("duration_secs", &self.duration_secs)
            .field("max_amplitude", &self.max_amplitude)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_max_uses_magnitude() {
        assert_eq!(global_max_amplitude(&[0.1, -0.8, 0.5]), 0.8);
    }

    #[test]
    fn test_global_max_ignores_non_finite() {
        let samples = [0.2, f32::NAN, -0.4, f32::INFINITY];
        assert_eq!(global_max_amplitude(&samples), 0.4);
    }

    #[test]
    fn test_global_max_empty_is_zero() {
        assert_eq!(global_max_amplitude(&[]), 0.0);
    }

    #[test]
    fn test_duration_derived_from_length() {
        let buffer = WaveformBuffer::new(vec![0.0; 88_200], 44_100);
        assert!((buffer.duration_secs() - 2.0).abs() < 1e-9);
        assert_eq!(buffer.len(), 88_200);
    }

    #[test]
    fn test_zero_sample_rate_gives_zero_duration() {
        let buffer = WaveformBuffer::new(vec![0.5; 10], 0);
        assert_eq!(buffer.duration_secs(), 0.0);
        assert_eq!(buffer.max_amplitude(), 0.5);
    }

    #[test]
    fn test_clones_share_storage() {
        let buffer = WaveformBuffer::new(vec![0.25; 16], 48_000);
        let clone = buffer.clone();
        assert!(buffer.same_track(&clone));

        let other = WaveformBuffer::new(vec![0.25; 16], 48_000);
        assert!(!buffer.same_track(&other), "Equal contents are still a different track");
    }

    #[test]
    fn test_debug_does_not_dump_samples() {
        let buffer = WaveformBuffer::new(vec![0.123; 4], 48_000);
        let debug = format!("{:?}", buffer);
        assert!(debug.contains("<4 samples>"));
        assert!(!debug.contains("0.123,"));
    }
}
