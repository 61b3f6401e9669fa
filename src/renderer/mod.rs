//! Renderer contract
//!
//! The core hands a [`FrameSnapshot`] to a [`Renderer`] once per tick and
//! never draws anything itself.

pub mod snapshot;

pub use snapshot::{FrameSnapshot, Sprite, SpriteKind, overlay_text};

use crate::settings::Settings;
use crate::sim::GamePhase;

/// Draws one snapshot per tick
pub trait Renderer {
    fn present(&mut self, frame: &FrameSnapshot);
}

/// Headless renderer: logs a HUD line every few ticks
#[derive(Debug, Default)]
pub struct LogRenderer {
    settings: Settings,
    /// Frames presented so far
    pub frames: u64,
    last_overlay: Option<String>,
}

impl LogRenderer {
    pub fn new(settings: &Settings) -> Self {
        Self {
            settings: settings.clone(),
            frames: 0,
            last_overlay: None,
        }
    }
}

impl Renderer for LogRenderer {
    fn present(&mut self, frame: &FrameSnapshot) {
        self.frames += 1;
        if self.settings.hud_due(frame.tick) {
            log::debug!("{}", frame.hud_line());
        }
        if frame.overlay != self.last_overlay {
            if let Some(text) = &frame.overlay {
                log::info!("{}", text);
                if frame.phase == GamePhase::GameOver && !frame.leaderboard.is_empty() {
                    log::info!("Leaderboard: {:?}", frame.leaderboard);
                }
            }
            self.last_overlay = frame.overlay.clone();
        }
    }
}
