//! Whole-track overview series with a single-entry cache
//!
//! The overview is the decimated envelope of the entire track, never
//! phantom-padded. It only changes when the track or the display resolution
//! changes, so it is computed once and re-served every frame after that.

use std::sync::{Arc, Weak};

use halo_core::WaveformBuffer;

use super::decimate::{decimate, decimate_par, PARALLEL_DECIMATION_THRESHOLD};

/// The one cached overview
#[derive(Debug)]
struct CacheEntry {
    series: Vec<f32>,
    resolution: usize,
    /// Identity of the track the series was computed from
    source: Weak<[f32]>,
}

impl CacheEntry {
    fn matches(&self, buffer: &WaveformBuffer, resolution: usize) -> bool {
        self.resolution == resolution
            && self.series.len() == resolution
            && Weak::ptr_eq(&self.source, &Arc::downgrade(buffer.shared_samples()))
    }
}

/// Single-slot memo of the full-track decimation
#[derive(Debug, Default)]
pub struct OverviewCache {
    entry: Option<CacheEntry>,
}

impl OverviewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the cached series matches this track and resolution
    pub fn is_cached_for(&self, buffer: &WaveformBuffer, resolution: usize) -> bool {
        self.entry
            .as_ref()
            .is_some_and(|entry| entry.matches(buffer, resolution))
    }

    /// Overview series for `buffer` at `resolution`, recomputing on a miss
    ///
    /// An empty buffer yields `resolution` zeros (and a warning) rather than
    /// an error.
    ///
    /// # Panics
    /// If `resolution` is zero.
    pub fn get_or_compute(&mut self, buffer: &WaveformBuffer, resolution: usize) -> &[f32] {
        assert!(resolution > 0, "overview resolution must be positive");

        let entry = match self.entry.take() {
            Some(entry) if entry.matches(buffer, resolution) => entry,
            _ => CacheEntry {
                series: Self::compute(buffer, resolution),
                resolution,
                source: Arc::downgrade(buffer.shared_samples()),
            },
        };

        &self.entry.insert(entry).series
    }

    /// Drop the cached series (track replaced or session reset)
    pub fn invalidate(&mut self) {
        if self.entry.take().is_some() {
            log::debug!("OverviewCache: invalidated");
        }
    }

    fn compute(buffer: &WaveformBuffer, resolution: usize) -> Vec<f32> {
        if buffer.is_empty() {
            log::warn!(
                "OverviewCache: empty waveform buffer, serving {} zeros",
                resolution
            );
            return vec![0.0; resolution];
        }

        let start_time = std::time::Instant::now();
        let series = if buffer.len() >= PARALLEL_DECIMATION_THRESHOLD {
            decimate_par(buffer.samples(), resolution)
        } else {
            decimate(buffer.samples(), resolution)
        };

        log::debug!(
            "OverviewCache: decimated {} samples to {} in {:?}",
            buffer.len(),
            resolution,
            start_time.elapsed()
        );

        series
    }
}
