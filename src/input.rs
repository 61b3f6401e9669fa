//! Tracking-to-signal adapter
//!
//! The hand/pose tracker is an external collaborator. It hands us normalized
//! landmarks per frame; the core only ever sees a [`TrackedSignal`] in
//! playfield pixels. A missing hand or head is a normal frame, never an
//! error.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::INDEX_FINGERTIP;
use crate::settings::Settings;
use crate::tuning::Playfield;

/// Handedness reported by the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandLabel {
    Left,
    Right,
}

/// One detected hand with landmarks normalized to `[0, 1]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedHand {
    pub label: HandLabel,
    pub landmarks: Vec<Vec2>,
}

impl DetectedHand {
    /// A hand whose 21 landmarks all sit on one normalized point
    pub fn at(label: HandLabel, point: Vec2) -> Self {
        Self {
            label,
            landmarks: vec![point; 21],
        }
    }

    fn centroid(&self) -> Option<Vec2> {
        if self.landmarks.is_empty() {
            return None;
        }
        let sum: Vec2 = self.landmarks.iter().copied().sum();
        Some(sum / self.landmarks.len() as f32)
    }

    fn fingertip(&self) -> Option<Vec2> {
        self.landmarks.get(INDEX_FINGERTIP).copied()
    }
}

/// Raw tracker output for one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTracking {
    pub hands: Vec<DetectedHand>,
    /// Pose nose landmark, normalized
    pub nose: Option<Vec2>,
}

/// Per-side hand positions in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HandPair {
    pub left: Option<Vec2>,
    pub right: Option<Vec2>,
}

impl HandPair {
    pub fn both(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }

    pub fn any(&self) -> bool {
        self.left.is_some() || self.right.is_some()
    }

    pub fn get(&self, label: HandLabel) -> Option<Vec2> {
        match label {
            HandLabel::Left => self.left,
            HandLabel::Right => self.right,
        }
    }
}

/// What the core consumes each tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackedSignal {
    /// Horizontal pointer (index fingertip of the first hand), pixels
    pub pointer_x: Option<f32>,
    pub hands: HandPair,
    /// Head (nose) position, pixels
    pub head: Option<Vec2>,
}

impl TrackedSignal {
    pub fn with_pointer(x: f32) -> Self {
        Self {
            pointer_x: Some(x),
            ..Default::default()
        }
    }

    pub fn with_hands(left: Option<Vec2>, right: Option<Vec2>) -> Self {
        Self {
            hands: HandPair { left, right },
            ..Default::default()
        }
    }

    pub fn with_head(head: Vec2) -> Self {
        Self {
            head: Some(head),
            ..Default::default()
        }
    }
}

/// Converts normalized tracker output into playfield pixels
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalAdapter {
    /// Flip x (`x -> 1 - x`) like a selfie view
    pub mirror: bool,
}

impl SignalAdapter {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            mirror: settings.mirror_input,
        }
    }

    fn to_pixels(&self, p: Vec2, playfield: Playfield) -> Vec2 {
        let x = if self.mirror { 1.0 - p.x } else { p.x };
        Vec2::new(x * playfield.width, p.y * playfield.height)
    }

    pub fn adapt(&self, raw: &RawTracking, playfield: Playfield) -> TrackedSignal {
        let mut signal = TrackedSignal {
            pointer_x: raw
                .hands
                .first()
                .and_then(DetectedHand::fingertip)
                .map(|tip| self.to_pixels(tip, playfield).x),
            head: raw.nose.map(|nose| self.to_pixels(nose, playfield)),
            ..Default::default()
        };
        for hand in &raw.hands {
            let Some(center) = hand.centroid() else {
                continue;
            };
            let slot = match hand.label {
                HandLabel::Left => &mut signal.hands.left,
                HandLabel::Right => &mut signal.hands.right,
            };
            // First detection of a label wins
            if slot.is_none() {
                *slot = Some(self.to_pixels(center, playfield));
            }
        }
        signal
    }
}

/// Keyboard commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyCommand {
    Quit,
    /// Resume when paused, restart when over
    RestartOrResume,
    Start,
    Pause,
}

impl KeyCommand {
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'q' => Some(KeyCommand::Quit),
            'r' => Some(KeyCommand::RestartOrResume),
            's' => Some(KeyCommand::Start),
            'p' => Some(KeyCommand::Pause),
            _ => None,
        }
    }
}
