//! Cross-fade between the overview and focused series
//!
//! Convention: `t = 0.0` is the overview (full-file) series, `t = 1.0` is the
//! focused (windowed, boosted) series.

/// Which series feeds the renderer this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewSelection {
    /// Whole-track envelope
    Overview,
    /// Boosted window around the playhead
    Focused,
    /// Mid-transition mix of both
    Blended { t: f32 },
}

/// Choose the series for a frame
///
/// | transitioning | playing | playhead ≈ 0 | selection |
/// |---------------|---------|--------------|-----------|
/// | yes           | any     | any          | Blended   |
/// | no            | no      | yes          | Overview  |
/// | no            | any     | no           | Focused   |
/// | no            | yes     | yes          | Focused   |
pub fn select_view(
    transition: Option<f32>,
    is_playing: bool,
    playhead: f64,
    idle_epsilon: f64,
) -> ViewSelection {
    if let Some(t) = transition {
        return ViewSelection::Blended { t: t.clamp(0.0, 1.0) };
    }

    if !is_playing && playhead.abs() <= idle_epsilon {
        ViewSelection::Overview
    } else {
        ViewSelection::Focused
    }
}

/// Elementwise `full * (1 - t) + windowed * t`
///
/// Exact at the endpoints: `t = 0` returns `full`, `t = 1` returns `windowed`.
///
/// # Panics
/// If the series lengths differ or `t` is not finite. Both are caller bugs;
/// every series in the pipeline has the configured resolution.
pub fn blend(full: &[f32], windowed: &[f32], t: f32) -> Vec<f32> {
    let mut out = vec![0.0; full.len()];
    blend_into(full, windowed, t, &mut out);
    out
}

/// [`blend`] into a caller-owned buffer of the same length
pub fn blend_into(full: &[f32], windowed: &[f32], t: f32, out: &mut [f32]) {
    assert_eq!(
        full.len(),
        windowed.len(),
        "blended series must have equal length"
    );
    assert_eq!(full.len(), out.len(), "blend output must match series length");
    assert!(t.is_finite(), "blend factor must be finite, got {}", t);

    let t = t.clamp(0.0, 1.0);
    if t == 0.0 {
        out.copy_from_slice(full);
        return;
    }
    if t == 1.0 {
        out.copy_from_slice(windowed);
        return;
    }

    let keep = 1.0 - t;
    for ((dst, &a), &b) in out.iter_mut().zip(full).zip(windowed) {
        *dst = a * keep + b * t;
    }
}
