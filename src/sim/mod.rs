//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in through the tick input only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod gesture;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{BandOutcome, RallyEvent, Resolution};
pub use difficulty::{Difficulty, DifficultyConfig, DifficultyCurve, DifficultyParams, Feedback, Ramp};
pub use gesture::{ConfirmedGesture, GestureCondition, GestureDebouncer};
pub use spawner::{SpawnOutcome, SpawnParams, Spawner};
pub use state::{
    Appearance, Arena, Ball, BandPlayer, Entity, EntityShape, GameEvent, GamePhase, GameState, Jumper, Paddle,
    ScoreBoard, Side,
};
pub use tick::{TickInput, tick};
