//! View-data preparation for the halo circular waveform player
//!
//! This crate computes, every animation frame, the series of magnitudes a
//! circular renderer draws around its ring. It does no drawing itself.
//!
//! ## Views
//!
//! - **Overview**: the whole track, for the idle player
//! - **Focused**: a short window starting at the playhead, boosted when quiet
//! - **Blended**: a cross-fade between the two while switching views
//!
//! ## Current Features
//!
//! - **Decimation**: block-max reduction, parallel for long tracks
//! - **Phantom padding**: silence after the track end so the focused view
//!   scrolls out smoothly, then wraps to the start
//! - **Adaptive gain**: hysteresis and smoothing so boost changes never pop
//! - **Diagnostics**: invalid inputs are coerced and reported once per session

pub mod waveform;

// Pipeline entry point
pub use waveform::{FrameInput, ViewEngine, ViewFrame, ViewSelection};

// Stage utilities
pub use waveform::{
    blend, decimate, prepare_window, select_view, BoostState, GainNormalizer, OverviewCache,
    ViewTarget, ViewTransition, ViewWindow, WindowRegion,
};
