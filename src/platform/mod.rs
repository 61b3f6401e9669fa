//! Platform layer
//!
//! Frame-synchronous run loop: one tick per captured frame. Handles:
//! - Scoped capture and audio devices (released on every exit path)
//! - Dropped frames (skip the tick, keep going)
//! - Key commands, including quit
//! - Handing snapshots and cues to the renderer and audio sink

pub mod synthetic;

use std::ops::{Deref, DerefMut};

use crate::audio::{AudioSink, Cue};
use crate::error::{CaptureError, RunError};
use crate::input::{KeyCommand, RawTracking, SignalAdapter};
use crate::renderer::{FrameSnapshot, Renderer};
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, TickInput, tick};
use crate::tuning::ModeConfig;

/// A hardware handle that must be released exactly once
pub trait Device {
    fn name(&self) -> &str;
    /// Give the handle back; must tolerate being called more than once
    fn release(&mut self);
}

/// Releases the wrapped device when dropped
pub struct DeviceGuard<D: Device> {
    device: D,
}

impl<D: Device> DeviceGuard<D> {
    pub fn new(device: D) -> Self {
        log::debug!("Acquired {}", device.name());
        Self { device }
    }
}

impl<D: Device> Deref for DeviceGuard<D> {
    type Target = D;

    fn deref(&self) -> &D {
        &self.device
    }
}

impl<D: Device> DerefMut for DeviceGuard<D> {
    fn deref_mut(&mut self) -> &mut D {
        &mut self.device
    }
}

impl<D: Device> Drop for DeviceGuard<D> {
    fn drop(&mut self) {
        log::debug!("Releasing {}", self.device.name());
        self.device.release();
    }
}

/// One captured frame after tracking
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Capture time (seconds)
    pub timestamp: f64,
    pub tracking: RawTracking,
    /// Key pressed since the previous frame
    pub key: Option<char>,
}

/// Camera plus tracker
pub trait FrameSource: Device {
    /// Next frame; `Ok(None)` once the stream has ended
    fn next_frame(&mut self) -> Result<Option<Frame>, CaptureError>;
}

/// How a run ended
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub dropped_frames: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub high_score: u64,
    /// Ended by the quit key rather than the end of the stream
    pub quit: bool,
    pub cues: u64,
}

/// Drive one game mode until the stream ends or the player quits
pub fn run<S, A, R>(
    config: ModeConfig,
    settings: &Settings,
    source: S,
    audio: A,
    renderer: &mut R,
    seed: u64,
) -> Result<RunSummary, RunError>
where
    S: FrameSource,
    A: AudioSink,
    R: Renderer,
{
    let mut source = DeviceGuard::new(source);
    let mut audio = DeviceGuard::new(audio);
    config.validate()?;

    let first = match source.next_frame() {
        Ok(Some(frame)) => frame,
        Ok(None) => {
            return Err(RunError::NoInitialFrame {
                device: source.name().to_string(),
                source: CaptureError::Disconnected("stream was empty".to_string()),
            });
        }
        Err(err) => {
            return Err(RunError::NoInitialFrame {
                device: source.name().to_string(),
                source: err,
            });
        }
    };

    log::info!("Starting {} ({})", config.mode.title(), config.mode.as_str());
    let adapter = SignalAdapter::from_settings(settings);
    let playfield = config.playfield;
    let mut state = GameState::new(config, seed);
    let mut dropped_frames = 0;
    let mut cues = 0;
    let mut last_timestamp: Option<f64> = None;
    let mut quit = false;
    let mut next = Some(first);

    while let Some(frame) = next.take() {
        let command = frame.key.and_then(KeyCommand::from_key);
        if command == Some(KeyCommand::Quit) {
            log::info!("Quit requested");
            quit = true;
            break;
        }

        let dt = match last_timestamp {
            Some(previous) => (frame.timestamp - previous).max(0.0) as f32,
            None => crate::reference_dt(),
        };
        last_timestamp = Some(frame.timestamp);

        let input = TickInput {
            now: frame.timestamp,
            signal: adapter.adapt(&frame.tracking, playfield),
            command,
        };
        tick(&mut state, &input, dt);

        for event in state.drain_events() {
            log::trace!("{:?}", event);
            if let Some(cue) = Cue::for_event(&event) {
                audio.play(cue);
                cues += 1;
            }
        }
        renderer.present(&FrameSnapshot::capture(&state));

        next = loop {
            match source.next_frame() {
                Ok(frame) => break frame,
                Err(err) if err.is_transient() => {
                    dropped_frames += 1;
                    log::warn!("Skipping tick: {}", err);
                }
                Err(err) => {
                    return Err(RunError::CaptureLost {
                        ticks: state.time_ticks,
                        source: err,
                    });
                }
            }
        };
    }

    let summary = RunSummary {
        ticks: state.time_ticks,
        dropped_frames,
        phase: state.phase,
        score: state.board.score,
        high_score: state.high_score(),
        quit,
        cues,
    };
    log::info!(
        "Run finished after {} ticks ({} dropped): score {}, best {}",
        summary.ticks,
        summary.dropped_frames,
        summary.score,
        summary.high_score
    );
    Ok(summary)
}
