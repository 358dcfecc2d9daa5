//! Halo Core - Shared library for the circular waveform player
//!
//! Holds the types every other halo crate agrees on: the immutable
//! [`WaveformBuffer`] handed over by the audio loader, and the display
//! configuration that drives the view-data pipeline.

pub mod config;
pub mod types;

pub use types::*;
