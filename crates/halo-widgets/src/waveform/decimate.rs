//! Block-max decimation of samples to display resolution
//!
//! Reduces a sample sequence to exactly `resolution` magnitudes. Each output
//! value is the largest |sample| in its block, so short transients survive
//! the reduction instead of being averaged away.
//!
//! ```text
//! samples:  [ 1 -5 | 2  2 | 7 ]   resolution = 2, block = 5 / 2 = 2
//! output:   [   5  ,   2  ]       trailing 7 falls outside N * block
//! ```

use rayon::prelude::*;

/// Sample count above which the full-track overview is reduced in parallel
pub const PARALLEL_DECIMATION_THRESHOLD: usize = 1 << 20;

/// Magnitude of a sample, with non-finite samples treated as silence
#[inline]
fn magnitude(sample: f32) -> f32 {
    if sample.is_finite() {
        sample.abs()
    } else {
        0.0
    }
}

/// Largest magnitude in a block (0.0 for an empty block)
#[inline]
fn block_peak(block: &[f32]) -> f32 {
    block.iter().copied().map(magnitude).fold(0.0_f32, f32::max)
}

/// Decimate `samples` to exactly `resolution` non-negative magnitudes
///
/// - empty input produces `resolution` zeros
/// - input no longer than `resolution` is copied (as magnitudes) and
///   zero-padded, without interpolation
/// - longer input uses `block = len / resolution`; samples past
///   `resolution * block` are not part of any block
///
/// # Panics
/// If `resolution` is zero. A zero resolution is a configuration bug, not a
/// property of the audio.
pub fn decimate(samples: &[f32], resolution: usize) -> Vec<f32> {
    let mut out = vec![0.0; resolution];
    decimate_into(samples, &mut out);
    out
}

/// [`decimate`] into a caller-owned buffer; `out.len()` is the resolution
pub fn decimate_into(samples: &[f32], out: &mut [f32]) {
    let resolution = out.len();
    assert!(resolution > 0, "decimation resolution must be positive");

    if samples.len() <= resolution {
        for (dst, &src) in out.iter_mut().zip(samples) {
            *dst = magnitude(src);
        }
        out[samples.len()..].fill(0.0);
        return;
    }

    let block = samples.len() / resolution;
    for (dst, chunk) in out.iter_mut().zip(samples.chunks_exact(block)) {
        *dst = block_peak(chunk);
    }
}

/// [`decimate`] with the block reductions spread over the rayon pool
///
/// Produces the same output as [`decimate`]. Only worth it for whole-track
/// reductions; per-frame windows are far too small.
pub fn decimate_par(samples: &[f32], resolution: usize) -> Vec<f32> {
    assert!(resolution > 0, "decimation resolution must be positive");

    if samples.len() <= resolution {
        return decimate(samples, resolution);
    }

    let block = samples.len() / resolution;
    let mut out = Vec::with_capacity(resolution);
    samples[..resolution * block]
        .par_chunks(block)
        .map(block_peak)
        .collect_into_vec(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_gives_zeros() {
        assert_eq!(decimate(&[], 4), vec![0.0; 4]);
    }

    #[test]
    fn test_block_max_uses_magnitude() {
        assert_eq!(decimate(&[1.0, -5.0, 2.0, 2.0], 2), vec![5.0, 2.0]);
    }

    #[test]
    fn test_short_input_is_zero_padded() {
        assert_eq!(decimate(&[1.0, 2.0], 5), vec![1.0, 2.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_exact_length_is_copied() {
        assert_eq!(decimate(&[0.5, -0.25, 0.75], 3), vec![0.5, 0.25, 0.75]);
    }

    #[test]
    fn test_remainder_is_dropped() {
        // block = 5 / 2 = 2, the trailing 9.0 belongs to no block
        assert_eq!(decimate(&[1.0, 2.0, 3.0, 4.0, 9.0], 2), vec![2.0, 4.0]);
    }

    #[test]
    fn test_length_always_matches_resolution() {
        let samples: Vec<f32> = (0..1_003).map(|i| (i as f32 * 0.37).sin()).collect();
        for resolution in [1, 2, 7, 100, 1_002, 1_003, 1_004, 5_000] {
            assert_eq!(
                decimate(&samples, resolution).len(),
                resolution,
                "resolution {}",
                resolution
            );
        }
    }

    #[test]
    fn test_non_finite_samples_are_silence() {
        assert_eq!(decimate(&[f32::NAN, 0.5, f32::INFINITY, -0.25], 2), vec![0.5, 0.25]);
        assert_eq!(decimate(&[f32::NEG_INFINITY], 2), vec![0.0, 0.0]);
    }

    #[test]
    fn test_output_is_non_negative() {
        let samples: Vec<f32> = (0..300).map(|i| -((i % 17) as f32) / 17.0).collect();
        assert!(decimate(&samples, 32).iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let samples: Vec<f32> = (0..100_003)
            .map(|i| ((i as f32) * 0.013).sin() * ((i % 97) as f32 / 97.0))
            .collect();
        for resolution in [1, 64, 999, 100_003, 200_000] {
            assert_eq!(decimate_par(&samples, resolution), decimate(&samples, resolution));
        }
    }

    #[test]
    fn test_decimate_into_overwrites_stale_values() {
        let mut out = vec![9.0; 4];
        decimate_into(&[0.5], &mut out);
        assert_eq!(out, vec![0.5, 0.0, 0.0, 0.0]);
    }

    #[test]
    #[should_panic(expected = "resolution must be positive")]
    fn test_zero_resolution_panics() {
        decimate(&[1.0], 0);
    }
}
