//! Scripted frame source
//!
//! Replays a prepared list of frames instead of a camera. Used by the demo
//! binary and by the run-loop tests.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use glam::Vec2;

use super::{Device, Frame, FrameSource};
use crate::error::CaptureError;
use crate::input::{DetectedHand, HandLabel, RawTracking};
use crate::tuning::GameMode;

/// Every Nth frame of a demo script is dropped
const DEMO_DROP_EVERY: usize = 97;

pub struct ScriptedSource {
    frames: VecDeque<Result<Frame, CaptureError>>,
    released: Rc<Cell<bool>>,
}

impl ScriptedSource {
    pub fn new(frames: Vec<Result<Frame, CaptureError>>) -> Self {
        Self {
            frames: frames.into(),
            released: Rc::new(Cell::new(false)),
        }
    }

    /// Flag that flips once the source has been released
    pub fn release_flag(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.released)
    }
}

impl Device for ScriptedSource {
    fn name(&self) -> &str {
        "scripted-camera"
    }

    fn release(&mut self) {
        self.frames.clear();
        self.released.set(true);
    }
}

impl FrameSource for ScriptedSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, CaptureError> {
        match self.frames.pop_front() {
            Some(Ok(frame)) => Ok(Some(frame)),
            Some(Err(err)) => Err(err),
            None => Ok(None),
        }
    }
}

/// Longest script `demo_script` will build (one hour at 30 fps)
pub const MAX_DEMO_FRAMES: usize = 30 * 60 * 60;

/// A plausible player for `mode`: hands that sweep, a head that bobs and jumps.
/// Non-finite or non-positive timings give an empty script.
pub fn demo_script(mode: GameMode, seconds: f64, fps: f64) -> Vec<Result<Frame, CaptureError>> {
    let frames = seconds * fps;
    if !frames.is_finite() || seconds <= 0.0 || fps <= 0.0 {
        log::warn!("No demo frames for {}s at {} fps", seconds, fps);
        return Vec::new();
    }
    let count = (frames.max(1.0) as usize).min(MAX_DEMO_FRAMES);
    (0..count)
        .map(|i| {
            if i > 0 && i % DEMO_DROP_EVERY == 0 {
                return Err(CaptureError::FrameDropped);
            }
            let t = i as f64 / fps;
            Ok(Frame {
                timestamp: t,
                tracking: demo_tracking(mode, t as f32),
                key: (mode == GameMode::KeyPong && i == 0).then_some('s'),
            })
        })
        .collect()
}

fn demo_tracking(mode: GameMode, t: f32) -> RawTracking {
    let sweep = 0.5 + 0.4 * (t * 0.9).sin();
    match mode {
        GameMode::Racer | GameMode::BubbleCatch | GameMode::BubbleRush => RawTracking {
            hands: vec![DetectedHand::at(HandLabel::Right, Vec2::new(sweep, 0.6))],
            nose: None,
        },
        GameMode::HandPong => RawTracking {
            hands: vec![
                DetectedHand::at(HandLabel::Left, Vec2::new(0.1, sweep)),
                DetectedHand::at(HandLabel::Right, Vec2::new(0.9, 1.0 - sweep)),
            ],
            nose: None,
        },
        GameMode::KeyPong => RawTracking::default(),
        GameMode::JumpAvoid => {
            // A sharp head rise once every two seconds
            let jumping = (t % 2.0) > 1.9;
            let y = if jumping { 0.2 } else { 0.5 };
            RawTracking {
                hands: Vec::new(),
                nose: Some(Vec2::new(sweep, y)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_shape() {
        let script = demo_script(GameMode::KeyPong, 10.0, 30.0);
        assert_eq!(script.len(), 300);
        assert_eq!(script[0].as_ref().ok().and_then(|f| f.key), Some('s'));
        assert!(matches!(script[DEMO_DROP_EVERY], Err(CaptureError::FrameDropped)));
    }

    #[test]
    fn test_script_rejects_unbounded_durations() {
        assert!(demo_script(GameMode::Racer, f64::INFINITY, 30.0).is_empty());
        assert!(demo_script(GameMode::Racer, f64::NAN, 30.0).is_empty());
        assert!(demo_script(GameMode::Racer, -5.0, 30.0).is_empty());
        assert!(demo_script(GameMode::Racer, 1.0, 0.0).is_empty());
        assert_eq!(demo_script(GameMode::JumpAvoid, 1e7, 30.0).len(), MAX_DEMO_FRAMES);
    }

    #[test]
    fn test_source_drains_then_ends() {
        let mut source = ScriptedSource::new(vec![Ok(Frame::default()), Err(CaptureError::FrameDropped)]);
        assert!(matches!(source.next_frame(), Ok(Some(_))));
        assert_eq!(source.next_frame().err(), Some(CaptureError::FrameDropped));
        assert!(matches!(source.next_frame(), Ok(None)));

        let released_flag = source.release_flag();
        source.release();
        assert!(released_flag.get());
    }
}
