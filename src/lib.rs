//! Gesture Arcade - webcam-driven arcade games on one shared core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, collisions, difficulty, game state)
//! - `input`: Tracking-to-signal adapter and key commands
//! - `renderer`: Per-tick snapshot handed to whatever draws the frame
//! - `audio`: Fire-and-forget sound cues
//! - `platform`: Frame-synchronous run loop and device scoping
//! - `tuning`: Data-driven per-mode game balance

pub mod audio;
pub mod error;
pub mod highscores;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{CaptureError, ConfigError, RunError};
pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::{GameMode, ModeConfig};

/// Game configuration constants
pub mod consts {
    /// Frame rate the per-frame game constants were tuned at
    pub const REFERENCE_FPS: f32 = 30.0;
    /// Largest tick delta fed to the simulation (a stalled camera must not teleport entities)
    pub const MAX_TICK_DT: f32 = 0.25;

    /// Continuous hold required before a gesture confirms (seconds)
    pub const GESTURE_HOLD_SECS: f64 = 1.0;
    /// How long the ball flashes after a paddle save (seconds)
    pub const HIT_FLASH_SECS: f64 = 0.2;

    /// Mediapipe landmark index of the index fingertip
    pub const INDEX_FINGERTIP: usize = 8;
}

/// Convert a per-reference-frame speed (px/frame) into px/s
#[inline]
pub fn per_frame(speed: f32) -> f32 {
    speed * consts::REFERENCE_FPS
}

/// Convert a per-reference-frame acceleration (px/frame²) into px/s²
#[inline]
pub fn per_frame_sq(accel: f32) -> f32 {
    accel * consts::REFERENCE_FPS * consts::REFERENCE_FPS
}

/// The tick delta of a camera running exactly at the reference frame rate
#[inline]
pub fn reference_dt() -> f32 {
    1.0 / consts::REFERENCE_FPS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_frame_round_trips_through_reference_dt() {
        let speed = per_frame(5.0);
        assert!((speed * reference_dt() - 5.0).abs() < 1e-4);

        let accel = per_frame_sq(3.0);
        let dt = reference_dt();
        assert!((accel * dt * dt - 3.0).abs() < 1e-4);
    }
}
