//! Gesture debouncing
//!
//! Hand tracking flickers: a hand can vanish for one frame or appear in a
//! single misdetected frame. A gesture only confirms after its raw condition
//! has held continuously for the required duration, and it confirms once per
//! unbroken hold. A disarmed debouncer ignores the condition until it has
//! seen it go false once.

use serde::{Deserialize, Serialize};

use crate::input::TrackedSignal;

/// A debounced, edge-triggered gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmedGesture;

/// What the raw per-frame condition of a start/restart gesture is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureCondition {
    /// Both left and right hands tracked
    BothHands,
    /// Any hand tracked
    AnyHand,
    /// No gesture; only the keyboard starts a match
    KeyOnly,
    /// Start without waiting
    Immediate,
}

impl GestureCondition {
    /// Evaluate the raw condition against this frame's signal
    pub fn holds(&self, signal: &TrackedSignal) -> bool {
        match self {
            GestureCondition::BothHands => signal.hands.both(),
            GestureCondition::AnyHand => signal.hands.any() || signal.pointer_x.is_some(),
            GestureCondition::KeyOnly => false,
            GestureCondition::Immediate => true,
        }
    }
}

/// Turns a continuous boolean condition into one confirmed event per hold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureDebouncer {
    /// When the condition most recently became continuously true
    started_at: Option<f64>,
    /// False until the condition has been released after `disarm`
    armed: bool,
}

impl Default for GestureDebouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureDebouncer {
    pub fn new() -> Self {
        Self {
            started_at: None,
            armed: true,
        }
    }

    /// Feed one frame's condition
    pub fn update(&mut self, condition: bool, now: f64, required: f64) -> Option<ConfirmedGesture> {
        if !condition {
            self.started_at = None;
            self.armed = true;
            return None;
        }
        if !self.armed {
            return None;
        }
        match self.started_at {
            None => {
                self.started_at = Some(now);
                None
            }
            Some(start) if now - start >= required => {
                self.started_at = None;
                Some(ConfirmedGesture)
            }
            Some(_) => None,
        }
    }

    /// Forget any hold in progress
    pub fn reset(&mut self) {
        self.started_at = None;
        self.armed = true;
    }

    /// Forget any hold and ignore the condition until it next goes false
    pub fn disarm(&mut self) {
        self.started_at = None;
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn is_holding(&self) -> bool {
        self.started_at.is_some()
    }

    /// Seconds the current hold has lasted
    pub fn held_for(&self, now: f64) -> Option<f64> {
        self.started_at.map(|start| (now - start).max(0.0))
    }
}
