//! Data-driven game balance
//!
//! Every game mode is one [`ModeConfig`]: playfield, start gesture, terminal
//! condition, difficulty strategy and the rules of its collision family. The
//! tick loop itself is shared. Presets carry the stock balance of each game;
//! [`ModeConfig::from_json`] layers a partial JSON document over a preset for
//! tuning sessions and tests.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{GESTURE_HOLD_SECS, HIT_FLASH_SECS};
use crate::error::ConfigError;
use crate::sim::difficulty::{DifficultyConfig, DifficultyCurve, Feedback, Ramp};
use crate::sim::gesture::GestureCondition;
use crate::sim::state::EntityShape;
use crate::{per_frame, per_frame_sq};

/// The available games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Steer a car along the bottom edge against falling blocks
    Racer,
    /// Catch falling bubbles in a basket; adapts speed to your hit rate
    BubbleCatch,
    /// Bubble catch with a population cap, shrinking basket and miss penalty
    BubbleRush,
    /// Two-hand pong: each tracked hand drives one paddle
    HandPong,
    /// Keyboard-started pong with fixed paddles
    KeyPong,
    /// Jump over or sidestep falling obstacles
    JumpAvoid,
}

impl GameMode {
    pub const ALL: [GameMode; 6] = [
        GameMode::Racer,
        GameMode::BubbleCatch,
        GameMode::BubbleRush,
        GameMode::HandPong,
        GameMode::KeyPong,
        GameMode::JumpAvoid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Racer => "racer",
            GameMode::BubbleCatch => "bubble",
            GameMode::BubbleRush => "rush",
            GameMode::HandPong => "pong",
            GameMode::KeyPong => "keypong",
            GameMode::JumpAvoid => "jump",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "racer" | "race" => Some(GameMode::Racer),
            "bubble" | "bubbles" => Some(GameMode::BubbleCatch),
            "rush" | "bubble-rush" => Some(GameMode::BubbleRush),
            "pong" | "hand-pong" => Some(GameMode::HandPong),
            "keypong" | "key-pong" => Some(GameMode::KeyPong),
            "jump" | "jump-avoid" => Some(GameMode::JumpAvoid),
            _ => None,
        }
    }

    /// Display title
    pub fn title(&self) -> &'static str {
        match self {
            GameMode::Racer => "Hand-Controlled Racing Game",
            GameMode::BubbleCatch => "Bubble Catching Game",
            GameMode::BubbleRush => "Bubble Rush",
            GameMode::HandPong => "Hand-Controlled Pong",
            GameMode::KeyPong => "Standard Pong",
            GameMode::JumpAvoid => "AR Obstacle Avoidance",
        }
    }
}

/// Playfield size in frame pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// What an entity inside the player's span means
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactRule {
    /// Inside the span is a catch, outside is a miss
    Catch,
    /// Inside the span is a crash (miss), outside is a successful dodge
    Dodge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardRule {
    Fixed,
    /// Reward multiplied by the current level
    PerLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissPolicy {
    /// Bump the miss counter
    Count,
    /// Subtract points, floored at zero
    Penalty(u64),
    CountAndPenalty(u64),
}

/// What happens to an entity that leaves the playfield unresolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitPolicy {
    /// Counts as neither hit nor miss
    Neutral,
    /// Counts as a miss
    Miss,
}

/// What to do with the player when the tracker loses the hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsentSignal {
    Center,
    HoldLast,
}

/// Falling entities against a bottom-edge player band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingRules {
    pub shape: EntityShape,
    /// Horizontal clearance kept at both playfield edges when spawning
    pub spawn_margin: f32,
    pub player_width: f32,
    /// Also the contact band height
    pub player_height: f32,
    pub reward: u64,
    pub reward_rule: RewardRule,
    pub contact: ContactRule,
    pub miss_policy: MissPolicy,
    pub exit_policy: ExitPolicy,
    pub absent_signal: AbsentSignal,
}

/// How rally points are handed out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RallyScoring {
    /// The side whose paddle makes a save gets the point; a miss scores nothing
    DefenderOnSave,
    /// A miss gives the opponent a point; saves score nothing
    ScorerOnMiss,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PongRules {
    pub ball_radius: f32,
    /// Serve velocity (px/s)
    pub ball_velocity: Vec2,
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Outer edge of the left paddle
    pub left_x: f32,
    /// Outer edge of the right paddle
    pub right_x: f32,
    pub scoring: RallyScoring,
    /// Seconds the ball flashes after a save
    pub flash_secs: f64,
    /// Paddles follow the tracked hands; otherwise they stay centered
    pub hand_controlled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JumpRules {
    pub player_size: f32,
    /// Distance from the playfield bottom to the avatar's standing line
    pub ground_offset: f32,
    /// Head rise (px since last frame) that triggers a jump
    pub jump_threshold: f32,
    /// Launch velocity (px/s, negative is up)
    pub jump_velocity: f32,
    /// px/s²
    pub gravity: f32,
    /// Sideways speed when the head is in an outer third (px/s)
    pub steer_speed: f32,
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    /// px/s
    pub obstacle_speed: f32,
    /// Points for an obstacle that passes without a collision
    pub clear_reward: u64,
}

/// Collision family and its constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rules {
    Falling(FallingRules),
    Pong(PongRules),
    Jump(JumpRules),
}

/// Complete description of one game mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeConfig {
    pub mode: GameMode,
    pub playfield: Playfield,
    /// Raw condition the start/restart gesture debounces
    pub gesture: GestureCondition,
    pub gesture_hold_secs: f64,
    /// Misses that end the match (None = never)
    pub max_misses: Option<u32>,
    pub difficulty: DifficultyConfig,
    pub rules: Rules,
}

impl ModeConfig {
    /// The built-in balance for a mode
    pub fn preset(mode: GameMode) -> Self {
        match mode {
            GameMode::Racer => Self {
                mode,
                playfield: Playfield::new(640.0, 480.0),
                gesture: GestureCondition::AnyHand,
                gesture_hold_secs: GESTURE_HOLD_SECS,
                max_misses: Some(5),
                difficulty: DifficultyConfig {
                    curve: DifficultyCurve::ThresholdStepped {
                        threshold: 20,
                        base_interval: 1.5,
                        interval_decay: 0.9,
                        min_interval: 0.5,
                        base_speed: per_frame(5.0),
                        speed_per_level: per_frame(0.5),
                    },
                    feedback: None,
                },
                rules: Rules::Falling(FallingRules {
                    shape: EntityShape::Rect {
                        width: 60.0,
                        height: 80.0,
                    },
                    spawn_margin: 50.0,
                    player_width: 60.0,
                    player_height: 80.0,
                    reward: 10,
                    reward_rule: RewardRule::Fixed,
                    contact: ContactRule::Catch,
                    miss_policy: MissPolicy::Count,
                    exit_policy: ExitPolicy::Neutral,
                    absent_signal: AbsentSignal::Center,
                }),
            },
            GameMode::BubbleCatch => Self {
                mode,
                playfield: Playfield::new(640.0, 480.0),
                gesture: GestureCondition::AnyHand,
                gesture_hold_secs: GESTURE_HOLD_SECS,
                max_misses: Some(15),
                difficulty: DifficultyConfig {
                    curve: DifficultyCurve::ThresholdStepped {
                        threshold: 30,
                        base_interval: 0.5,
                        interval_decay: 0.9,
                        min_interval: 0.2,
                        base_speed: per_frame(3.0),
                        speed_per_level: per_frame(0.3),
                    },
                    feedback: Some(Feedback {
                        window: 10,
                        min_samples: 6,
                        high_water: 0.7,
                        low_water: 0.3,
                        step: 0.05,
                        floor: 1.0,
                        ceiling: 2.5,
                    }),
                },
                rules: Rules::Falling(FallingRules {
                    shape: EntityShape::Circle { radius: 30.0 },
                    spawn_margin: 0.0,
                    player_width: 100.0,
                    player_height: 20.0,
                    reward: 10,
                    reward_rule: RewardRule::Fixed,
                    contact: ContactRule::Catch,
                    miss_policy: MissPolicy::Count,
                    exit_policy: ExitPolicy::Miss,
                    absent_signal: AbsentSignal::HoldLast,
                }),
            },
            GameMode::BubbleRush => Self {
                mode,
                playfield: Playfield::new(640.0, 480.0),
                gesture: GestureCondition::AnyHand,
                gesture_hold_secs: GESTURE_HOLD_SECS,
                max_misses: Some(10),
                difficulty: DifficultyConfig {
                    curve: DifficultyCurve::ContinuousTier {
                        points_per_tier: 50,
                        speed: Ramp {
                            base: per_frame(3.0),
                            per_tier: per_frame(0.5),
                            min: per_frame(3.0),
                            max: per_frame(10.0),
                        },
                        interval: Ramp {
                            base: 1.0,
                            per_tier: -0.1,
                            min: 0.3,
                            max: 1.0,
                        },
                        population: Ramp {
                            base: 3.0,
                            per_tier: 1.0,
                            min: 3.0,
                            max: 12.0,
                        },
                        player_width: Ramp {
                            base: 140.0,
                            per_tier: -10.0,
                            min: 80.0,
                            max: 140.0,
                        },
                    },
                    feedback: None,
                },
                rules: Rules::Falling(FallingRules {
                    shape: EntityShape::Circle { radius: 25.0 },
                    spawn_margin: 0.0,
                    player_width: 140.0,
                    player_height: 20.0,
                    reward: 10,
                    reward_rule: RewardRule::PerLevel,
                    contact: ContactRule::Catch,
                    miss_policy: MissPolicy::CountAndPenalty(5),
                    exit_policy: ExitPolicy::Miss,
                    absent_signal: AbsentSignal::HoldLast,
                }),
            },
            GameMode::HandPong => Self {
                mode,
                playfield: Playfield::new(1200.0, 720.0),
                gesture: GestureCondition::BothHands,
                gesture_hold_secs: GESTURE_HOLD_SECS,
                max_misses: None,
                difficulty: DifficultyConfig::fixed(),
                rules: Rules::Pong(PongRules {
                    ball_radius: 20.0,
                    ball_velocity: Vec2::new(per_frame(20.0), per_frame(20.0)),
                    paddle_width: 20.0,
                    paddle_height: 150.0,
                    left_x: 10.0,
                    right_x: 1190.0,
                    scoring: RallyScoring::DefenderOnSave,
                    flash_secs: HIT_FLASH_SECS,
                    hand_controlled: true,
                }),
            },
            GameMode::KeyPong => Self {
                mode,
                playfield: Playfield::new(800.0, 600.0),
                gesture: GestureCondition::KeyOnly,
                gesture_hold_secs: GESTURE_HOLD_SECS,
                max_misses: None,
                difficulty: DifficultyConfig::fixed(),
                rules: Rules::Pong(PongRules {
                    ball_radius: 10.0,
                    ball_velocity: Vec2::new(per_frame(4.0), per_frame(2.0)),
                    paddle_width: 20.0,
                    paddle_height: 100.0,
                    left_x: 20.0,
                    right_x: 760.0,
                    scoring: RallyScoring::ScorerOnMiss,
                    flash_secs: HIT_FLASH_SECS,
                    hand_controlled: false,
                }),
            },
            GameMode::JumpAvoid => Self {
                mode,
                playfield: Playfield::new(640.0, 480.0),
                gesture: GestureCondition::Immediate,
                gesture_hold_secs: GESTURE_HOLD_SECS,
                max_misses: None,
                difficulty: DifficultyConfig::fixed(),
                rules: Rules::Jump(JumpRules {
                    player_size: 50.0,
                    ground_offset: 100.0,
                    jump_threshold: 50.0,
                    jump_velocity: per_frame(-15.0),
                    gravity: per_frame_sq(3.0),
                    steer_speed: per_frame(5.0),
                    obstacle_width: 80.0,
                    obstacle_height: 40.0,
                    obstacle_speed: per_frame(5.0),
                    clear_reward: 1,
                }),
            },
        }
    }

    /// Parse a mode name and return its preset
    pub fn for_name(name: &str) -> Result<Self, ConfigError> {
        GameMode::from_str(name)
            .map(Self::preset)
            .ok_or_else(|| ConfigError::UnknownMode(name.to_string()))
    }

    /// Merge a partial JSON document over the preset for `mode`, then validate
    pub fn from_json(mode: GameMode, json: &str) -> Result<Self, ConfigError> {
        let mut base = serde_json::to_value(Self::preset(mode))?;
        let overrides: serde_json::Value = serde_json::from_str(json)?;
        merge(&mut base, overrides);
        let config: Self = serde_json::from_value(base)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject constants the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("playfield.width", self.playfield.width)?;
        positive("playfield.height", self.playfield.height)?;
        positive("gesture_hold_secs", self.gesture_hold_secs as f32)?;

        match &self.difficulty.curve {
            DifficultyCurve::Fixed => {}
            DifficultyCurve::ThresholdStepped {
                threshold,
                base_interval,
                interval_decay,
                min_interval,
                base_speed,
                ..
            } => {
                positive("difficulty.threshold", *threshold as f32)?;
                positive("difficulty.base_interval", *base_interval)?;
                positive("difficulty.min_interval", *min_interval)?;
                positive("difficulty.base_speed", *base_speed)?;
                in_range("difficulty.interval_decay", *interval_decay, 0.01, 1.0)?;
            }
            DifficultyCurve::ContinuousTier {
                points_per_tier,
                interval,
                population,
                ..
            } => {
                positive("difficulty.points_per_tier", *points_per_tier as f32)?;
                positive("difficulty.interval.min", interval.min)?;
                in_range("difficulty.population.min", population.min, 1.0, population.max)?;
            }
        }
        if let Some(feedback) = &self.difficulty.feedback {
            positive("feedback.window", feedback.window as f32)?;
            in_range("feedback.min_samples", feedback.min_samples as f32, 1.0, feedback.window as f32)?;
            in_range("feedback.low_water", feedback.low_water, 0.0, feedback.high_water)?;
            in_range("feedback.high_water", feedback.high_water, feedback.low_water, 1.0)?;
            in_range("feedback.floor", feedback.floor, 0.01, feedback.ceiling)?;
        }

        match &self.rules {
            Rules::Falling(rules) => {
                positive("rules.shape", rules.shape.height())?;
                positive("rules.player_width", rules.player_width)?;
                positive("rules.player_height", rules.player_height)?;
                in_range("rules.spawn_margin", rules.spawn_margin, 0.0, self.playfield.width / 2.0)?;
            }
            Rules::Pong(rules) => {
                positive("rules.ball_radius", rules.ball_radius)?;
                positive("rules.paddle_width", rules.paddle_width)?;
                positive("rules.paddle_height", rules.paddle_height)?;
                in_range("rules.left_x", rules.left_x, 0.0, rules.right_x)?;
                in_range("rules.right_x", rules.right_x, rules.left_x, self.playfield.width)?;
            }
            Rules::Jump(rules) => {
                positive("rules.player_size", rules.player_size)?;
                positive("rules.gravity", rules.gravity)?;
                positive("rules.obstacle_height", rules.obstacle_height)?;
                in_range("rules.jump_velocity", rules.jump_velocity, f32::MIN, -f32::EPSILON)?;
                in_range("rules.ground_offset", rules.ground_offset, rules.player_size, self.playfield.height)?;
            }
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn in_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value, min, max })
    }
}

/// Recursive object merge; non-object values replace wholesale
fn merge(base: &mut serde_json::Value, overrides: serde_json::Value) {
    match (base, overrides) {
        (serde_json::Value::Object(base), serde_json::Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => merge(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
