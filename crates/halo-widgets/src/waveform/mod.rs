//! Waveform view-data pipeline
//!
//! Turns a loaded track and a playhead into the fixed-length magnitude series
//! the circular renderer draws each frame.
//!
//! ## Stages
//!
//! - **Decimation** (`decimate`): block-max reduction to display resolution
//! - **Overview** (`OverviewCache`): whole-track series, computed once per
//!   track and resolution
//! - **Window extraction** (`ViewWindow`): W samples under the playhead, with
//!   phantom silence after the track end and wraparound
//! - **Gain** (`GainNormalizer`): smoothed boost for quiet windows
//! - **Blend** (`blend`, `select_view`): overview/focused cross-fade
//! - **Transition** (`ViewTransition`): eased blend factor over time
//!
//! `ViewEngine` wires the stages together and owns all per-session state.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = ViewEngine::new(ViewConfig::default())?;
//! engine.load(&buffer);
//!
//! // Every frame:
//! let frame = engine.frame(&buffer, &FrameInput::new(playhead, is_playing));
//! renderer.draw_ring(&frame.series, frame.max_amplitude);
//! ```

mod blend;
mod decimate;
mod diagnostics;
mod engine;
mod gain;
mod overview;
mod transition;
mod window;

pub use blend::{blend, blend_into, select_view, ViewSelection};

pub use decimate::{decimate, decimate_into, decimate_par, PARALLEL_DECIMATION_THRESHOLD};

pub use diagnostics::{DiagnosticLog, InputIssue, IssueSet};

pub use engine::{FrameInput, ViewEngine, ViewFrame};

pub use gain::{BoostState, GainNormalizer};

pub use overview::OverviewCache;

pub use transition::{ViewTarget, ViewTransition};

pub use window::{prepare_window, ViewWindow, WindowParams, WindowRegion};
