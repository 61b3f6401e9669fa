//! Error types
//!
//! Only three things can go wrong at runtime: a frame fails to arrive, the
//! capture device disappears, or a tuning override is malformed. Everything
//! else is a programming error.

use thiserror::Error;

/// Rejected game tuning
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tuning override is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must lie in [{min}, {max}] (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("unknown game mode `{0}`")]
    UnknownMode(String),
}

/// Frame acquisition failure
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// This frame could not be read; try again next tick
    #[error("frame dropped")]
    FrameDropped,
    /// The device is gone; no more frames will arrive
    #[error("capture device disconnected: {0}")]
    Disconnected(String),
}

impl CaptureError {
    /// Whether the loop should simply skip this tick
    pub fn is_transient(&self) -> bool {
        matches!(self, CaptureError::FrameDropped)
    }
}

/// Run-loop failure
#[derive(Debug, Error)]
pub enum RunError {
    #[error("no initial frame from {device}: {source}")]
    NoInitialFrame {
        device: String,
        #[source]
        source: CaptureError,
    },
    #[error("capture lost after {ticks} ticks: {source}")]
    CaptureLost {
        ticks: u64,
        #[source]
        source: CaptureError,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}
