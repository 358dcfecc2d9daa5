//! View Trace - headless run of the waveform view pipeline
//!
//! Synthesizes a test track (a tone with a quiet passage in the middle),
//! then drives a `ViewEngine` at 60 frames per second through a typical
//! session: idle overview, fade into the focused view, playback to the end
//! of the track and a fade back. Frame summaries go to the log.
//!
//! ## Command line flags
//!
//! - `--config PATH`: view config YAML (default: `~/.config/halo/view.yaml`)
//! - `--duration SECS`: length of the synthesized track (default: 20)
//! - `--resolution N`: override the configured display resolution
//!
//! Set `RUST_LOG=debug` to also see cache and boost retarget events.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use halo_core::config::{default_config_path, load_config, ViewConfig};
use halo_core::{WaveformBuffer, DEFAULT_SAMPLE_RATE};
use halo_widgets::{FrameInput, ViewEngine, ViewFrame, ViewTarget};

const FRAME_RATE: u32 = 60;
const TONE_HZ: f32 = 220.0;
const LOUD_AMPLITUDE: f32 = 0.8;
const QUIET_AMPLITUDE: f32 = 0.04;
/// Frames between log summaries (twice per second)
const SUMMARY_INTERVAL: u64 = 30;

struct Args {
    config_path: PathBuf,
    duration_secs: f64,
    resolution: Option<usize>,
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_args() -> Result<Args> {
    let args: Vec<String> = std::env::args().collect();

    let config_path = flag_value(&args, "--config")
        .map(PathBuf::from)
        .unwrap_or_else(|| default_config_path("view.yaml"));

    let duration_secs = match flag_value(&args, "--duration") {
        Some(value) => value
            .parse::<f64>()
            .with_context(|| format!("invalid --duration '{}'", value))?,
        None => 20.0,
    };
    if !(duration_secs.is_finite() && duration_secs > 0.0) {
        bail!("--duration must be a positive number of seconds");
    }

    let resolution = flag_value(&args, "--resolution")
        .map(|value| {
            value
                .parse::<usize>()
                .with_context(|| format!("invalid --resolution '{}'", value))
        })
        .transpose()?;

    Ok(Args {
        config_path,
        duration_secs,
        resolution,
    })
}

/// Sine tone, quiet between 40 % and 60 % of the track
fn synthesize_track(duration_secs: f64, sample_rate: u32) -> WaveformBuffer {
    let len = (duration_secs * sample_rate as f64).round() as usize;
    let quiet = (len * 2 / 5)..(len * 3 / 5);
    let step = std::f32::consts::TAU * TONE_HZ / sample_rate as f32;

    let samples: Vec<f32> = (0..len)
        .map(|i| {
            let amplitude = if quiet.contains(&i) {
                QUIET_AMPLITUDE
            } else {
                LOUD_AMPLITUDE
            };
            amplitude * (step * (i % sample_rate as usize) as f32).sin()
        })
        .collect();

    WaveformBuffer::new(samples, sample_rate)
}

fn summarize(frame_index: u64, playhead: f64, frame: &ViewFrame, engine: &ViewEngine) {
    let peak = frame.series.iter().copied().fold(0.0_f32, f32::max);
    let boost = engine.boost_state();
    log::info!(
        "frame {:>5} | playhead {:.3} | {:?} | peak {:.3} / {:.3} | boost {:.2} -> {:.2}",
        frame_index,
        playhead,
        frame.selection,
        peak,
        frame.max_amplitude,
        boost.current_factor,
        boost.target_factor
    );
}

fn main() -> Result<()> {
    // Initialize logger - set RUST_LOG=debug for verbose output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = parse_args()?;

    let mut config: ViewConfig = load_config(&args.config_path);
    config.boost.sanitize();
    if let Some(resolution) = args.resolution {
        config.resolution = resolution;
    }
    let mut engine = ViewEngine::new(config).context("invalid view configuration")?;

    let buffer = synthesize_track(args.duration_secs, DEFAULT_SAMPLE_RATE);
    engine.load(&buffer);

    let dt = Duration::from_secs(1) / FRAME_RATE;
    let playhead_step = dt.as_secs_f64() / args.duration_secs;
    let mut frame_index: u64 = 0;
    let mut playhead = 0.0_f64;

    let mut step = |engine: &mut ViewEngine, playhead: f64, is_playing: bool| {
        engine.advance_transition(dt);
        let frame = engine.frame(&buffer, &FrameInput::new(playhead, is_playing));
        if frame_index % SUMMARY_INTERVAL == 0 {
            summarize(frame_index, playhead, &frame, engine);
        }
        frame_index += 1;
    };

    log::info!("idle: overview for one second");
    for _ in 0..FRAME_RATE {
        step(&mut engine, playhead, false);
    }

    log::info!("play: fading into the focused view");
    engine.begin_transition(ViewTarget::Focused);
    while playhead < 1.0 {
        step(&mut engine, playhead, true);
        playhead = (playhead + playhead_step).min(1.0);
    }

    // Hold at the end: the window now sits in the phantom silence
    log::info!("end of track: holding for one second");
    for _ in 0..FRAME_RATE {
        step(&mut engine, playhead, true);
    }

    log::info!("stop: fading back to the overview");
    engine.begin_transition(ViewTarget::Overview);
    playhead = 0.0;
    while engine.transition().is_running() {
        step(&mut engine, playhead, false);
    }
    step(&mut engine, playhead, false);

    log::info!("done after {} frames", frame_index);
    Ok(())
}
