//! Runtime preferences
//!
//! Separate from game tuning: these change how input is read and how loud the
//! cues are, never the rules of a match.

use serde::{Deserialize, Serialize};

/// Player preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === Input ===
    /// Mirror the camera horizontally so moving right moves the player right
    pub mirror_input: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === HUD ===
    /// Ticks between HUD log lines (0 = never)
    pub hud_log_interval: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mirror_input: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            hud_log_interval: 30,
        }
    }
}

impl Settings {
    /// Volume a cue actually plays at (respects mute)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Parse from JSON, falling back to defaults for missing fields
    pub fn from_json(json: &str) -> Result<Self, crate::ConfigError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let mut base = serde_json::to_value(Self::default())?;
        if let (Some(base), serde_json::Value::Object(overrides)) = (base.as_object_mut(), value) {
            base.extend(overrides);
        }
        Ok(serde_json::from_value(base)?)
    }

    /// Whether this tick should emit a HUD log line
    pub fn hud_due(&self, tick: u64) -> bool {
        self.hud_log_interval > 0 && tick % self.hud_log_interval == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings::default();
        assert!((settings.effective_volume() - 0.8).abs() < 1e-6);
        settings.muted = true;
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_partial_json() {
        let settings = Settings::from_json(r#"{ "mirror_input": false }"#).unwrap();
        assert!(!settings.mirror_input);
        assert_eq!(settings.hud_log_interval, 30);
        assert!(Settings::from_json("[").is_err());
    }

    #[test]
    fn test_hud_cadence() {
        let settings = Settings {
            hud_log_interval: 0,
            ..Default::default()
        };
        assert!(!settings.hud_due(0));
        assert!(Settings::default().hud_due(60));
        assert!(!Settings::default().hud_due(61));
    }
}
