//! Sound cues
//!
//! The core never mixes audio. It names a cue and hands it to whatever sink
//! the platform provides; playback is fire-and-forget.

use crate::platform::Device;
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Paddle save or a caught entity
    Hit,
    /// Lost rally or a crash
    Lose,
}

impl Cue {
    /// The cue a game event should trigger, if any
    pub fn for_event(event: &GameEvent) -> Option<Cue> {
        match event {
            GameEvent::PaddleSave { .. } | GameEvent::Caught { .. } => Some(Cue::Hit),
            GameEvent::RallyLost { .. } | GameEvent::Crashed => Some(Cue::Lose),
            _ => None,
        }
    }
}

/// Fire-and-forget cue playback
pub trait AudioSink: Device {
    /// Must not block the tick
    fn play(&mut self, cue: Cue);
}

/// Sink that reports cues through the log instead of a speaker
#[derive(Debug)]
pub struct LogAudio {
    volume: f32,
    released: bool,
    /// Hit cues played so far
    pub hits: u64,
    /// Lose cues played so far
    pub losses: u64,
    pub last: Option<Cue>,
}

impl LogAudio {
    pub fn new(settings: &Settings) -> Self {
        Self {
            volume: settings.effective_volume(),
            released: false,
            hits: 0,
            losses: 0,
            last: None,
        }
    }

    pub fn played(&self) -> u64 {
        self.hits + self.losses
    }
}

impl Device for LogAudio {
    fn name(&self) -> &str {
        "log-audio"
    }

    fn release(&mut self) {
        if !self.released {
            log::debug!("Audio released after {} cues", self.played());
            self.released = true;
        }
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, cue: Cue) {
        if self.volume <= 0.0 || self.released {
            return;
        }
        log::trace!("cue {:?} at volume {:.2}", cue, self.volume);
        match cue {
            Cue::Hit => self.hits += 1,
            Cue::Lose => self.losses += 1,
        }
        self.last = Some(cue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Side;

    #[test]
    fn test_cue_mapping() {
        assert_eq!(Cue::for_event(&GameEvent::PaddleSave { side: Side::Left }), Some(Cue::Hit));
        assert_eq!(Cue::for_event(&GameEvent::RallyLost { side: Side::Right }), Some(Cue::Lose));
        assert_eq!(Cue::for_event(&GameEvent::Crashed), Some(Cue::Lose));
        assert_eq!(Cue::for_event(&GameEvent::Jumped), None);
    }

    #[test]
    fn test_muted_sink_plays_nothing() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        let mut sink = LogAudio::new(&settings);
        sink.play(Cue::Hit);
        assert_eq!(sink.played(), 0);
        assert_eq!(sink.last, None);

        let mut sink = LogAudio::new(&Settings::default());
        sink.play(Cue::Lose);
        sink.release();
        sink.play(Cue::Hit);
        assert_eq!((sink.hits, sink.losses), (0, 1));
        assert_eq!(sink.last, Some(Cue::Lose));
    }

    #[test]
    fn test_long_session_keeps_counts_only() {
        let mut sink = LogAudio::new(&Settings::default());
        for i in 0..100_000 {
            sink.play(if i % 4 == 0 { Cue::Lose } else { Cue::Hit });
        }
        assert_eq!(sink.hits, 75_000);
        assert_eq!(sink.losses, 25_000);
        assert_eq!(sink.played(), 100_000);
        assert_eq!(sink.last, Some(Cue::Hit));
    }
}
