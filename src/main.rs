//! Gesture Arcade entry point
//!
//! Headless demo: plays one mode against a scripted camera and logs the HUD.
//!
//! Usage: `gesture-arcade [racer|bubble|rush|pong|keypong|jump] [seconds]`

use std::process::ExitCode;

use gesture_arcade::audio::LogAudio;
use gesture_arcade::platform::synthetic::{ScriptedSource, demo_script};
use gesture_arcade::platform::run;
use gesture_arcade::renderer::LogRenderer;
use gesture_arcade::{ModeConfig, RunError, Settings};

const DEFAULT_MODE: &str = "racer";
const DEFAULT_SECONDS: f64 = 30.0;
const DEMO_FPS: f64 = 30.0;

fn main() -> ExitCode {
    env_logger::init();

    match play() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn play() -> Result<(), RunError> {
    let mut args = std::env::args().skip(1);
    let mode_name = args.next().unwrap_or_else(|| DEFAULT_MODE.to_string());
    let seconds = args.next().map_or(DEFAULT_SECONDS, |raw| parse_seconds(&raw));

    let config = ModeConfig::for_name(&mode_name)?;
    let settings = Settings::default();
    let source = ScriptedSource::new(demo_script(config.mode, seconds, DEMO_FPS));
    let audio = LogAudio::new(&settings);
    let mut renderer = LogRenderer::new(&settings);
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    log::info!("Gesture Arcade starting: {} for {:.0}s (seed {})", config.mode.title(), seconds, seed);
    let summary = run(config, &settings, source, audio, &mut renderer, seed)?;
    log::info!(
        "Final: {:?} | score {} | best {} | {} cues | {} frames drawn",
        summary.phase,
        summary.score,
        summary.high_score,
        summary.cues,
        renderer.frames
    );
    Ok(())
}

/// Demo length from the command line, falling back to the default
fn parse_seconds(raw: &str) -> f64 {
    match raw.parse::<f64>() {
        Ok(seconds) if seconds.is_finite() && seconds > 0.0 => seconds,
        Ok(seconds) => {
            log::warn!("Ignoring duration {}: must be a finite number of seconds above zero", seconds);
            DEFAULT_SECONDS
        }
        Err(_) => {
            log::warn!("Ignoring unparsable duration `{}`", raw);
            DEFAULT_SECONDS
        }
    }
}
