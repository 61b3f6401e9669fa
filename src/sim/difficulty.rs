//! Difficulty control
//!
//! Three strategies, picked per mode:
//! - threshold-stepped levels (level goes up once per threshold crossing, never down)
//! - a continuous tier recomputed from the score every tick
//! - an optional rolling success-rate window that nudges a speed multiplier

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// A tier-indexed value clamped to a range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ramp {
    pub base: f32,
    pub per_tier: f32,
    pub min: f32,
    pub max: f32,
}

impl Ramp {
    pub fn at(&self, tier: u32) -> f32 {
        (self.base + tier as f32 * self.per_tier).clamp(self.min, self.max)
    }
}

/// How level and spawn parameters follow the score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyCurve {
    /// No progression (pong, jump-avoid)
    Fixed,
    ThresholdStepped {
        /// Level goes up when score > level * threshold
        threshold: u64,
        /// Spawn interval at level 1 (seconds)
        base_interval: f32,
        /// Multiplier applied to the interval on each level up
        interval_decay: f32,
        min_interval: f32,
        /// Entity speed is base_speed + level * speed_per_level (px/s)
        base_speed: f32,
        speed_per_level: f32,
    },
    ContinuousTier {
        points_per_tier: u64,
        speed: Ramp,
        interval: Ramp,
        population: Ramp,
        player_width: Ramp,
    },
}

/// Rolling success-rate window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    /// Outcomes kept
    pub window: usize,
    /// Outcomes needed before the rate is trusted
    pub min_samples: usize,
    pub high_water: f32,
    pub low_water: f32,
    pub step: f32,
    pub floor: f32,
    pub ceiling: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    pub curve: DifficultyCurve,
    #[serde(default)]
    pub feedback: Option<Feedback>,
}

impl DifficultyConfig {
    pub fn fixed() -> Self {
        Self {
            curve: DifficultyCurve::Fixed,
            feedback: None,
        }
    }
}

/// Parameters for the current tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyParams {
    pub level: u32,
    /// Seconds between spawns
    pub spawn_interval: f32,
    /// Entity fall speed (px/s)
    pub entity_speed: f32,
    /// Live entity cap (None = unbounded)
    pub max_population: Option<usize>,
    /// Player width override (None = use the mode's base width)
    pub player_width: Option<f32>,
}

/// Difficulty controller state for one match
#[derive(Debug, Clone)]
pub struct Difficulty {
    config: DifficultyConfig,
    level: u32,
    spawn_interval: f32,
    speed_multiplier: f32,
    history: VecDeque<bool>,
}

impl Difficulty {
    pub fn new(config: &DifficultyConfig) -> Self {
        let mut difficulty = Self {
            config: config.clone(),
            level: 1,
            spawn_interval: 0.0,
            speed_multiplier: 1.0,
            history: VecDeque::new(),
        };
        difficulty.reset();
        difficulty
    }

    /// Back to level 1 with the base interval and a neutral multiplier
    pub fn reset(&mut self) {
        self.level = 1;
        self.spawn_interval = match self.config.curve {
            DifficultyCurve::ThresholdStepped { base_interval, .. } => base_interval,
            DifficultyCurve::ContinuousTier { interval, .. } => interval.at(0),
            DifficultyCurve::Fixed => f32::INFINITY,
        };
        self.speed_multiplier = self.config.feedback.as_ref().map_or(1.0, |f| f.floor);
        self.history.clear();
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    /// Recompute parameters from the current score
    pub fn update(&mut self, score: u64) -> DifficultyParams {
        match self.config.curve {
            DifficultyCurve::Fixed => DifficultyParams {
                level: self.level,
                spawn_interval: f32::INFINITY,
                entity_speed: 0.0,
                max_population: None,
                player_width: None,
            },
            DifficultyCurve::ThresholdStepped {
                threshold,
                interval_decay,
                min_interval,
                base_speed,
                speed_per_level,
                ..
            } => {
                // At most one level per update, so a single crossing counts once
                if score > u64::from(self.level) * threshold {
                    self.level += 1;
                    self.spawn_interval = (self.spawn_interval * interval_decay).max(min_interval);
                    self.history.clear();
                }
                DifficultyParams {
                    level: self.level,
                    spawn_interval: self.spawn_interval,
                    entity_speed: (base_speed + self.level as f32 * speed_per_level) * self.speed_multiplier,
                    max_population: None,
                    player_width: None,
                }
            }
            DifficultyCurve::ContinuousTier {
                points_per_tier,
                speed,
                interval,
                population,
                player_width,
            } => {
                let tier = (score / points_per_tier.max(1)).min(u64::from(u32::MAX - 1)) as u32;
                self.level = tier + 1;
                self.spawn_interval = interval.at(tier);
                DifficultyParams {
                    level: self.level,
                    spawn_interval: self.spawn_interval,
                    entity_speed: speed.at(tier) * self.speed_multiplier,
                    max_population: Some((population.at(tier).floor() as usize).max(1)),
                    player_width: Some(player_width.at(tier)),
                }
            }
        }
    }

    /// Feed one resolved outcome into the rolling window (no-op without feedback)
    pub fn record_outcome(&mut self, success: bool) {
        let Some(feedback) = &self.config.feedback else {
            return;
        };
        self.history.push_back(success);
        while self.history.len() > feedback.window {
            self.history.pop_front();
        }
        if self.history.len() < feedback.min_samples {
            return;
        }
        let hits = self.history.iter().filter(|&&s| s).count();
        let rate = hits as f32 / self.history.len() as f32;
        if rate > feedback.high_water {
            self.speed_multiplier = (self.speed_multiplier + feedback.step).min(feedback.ceiling);
        } else if rate < feedback.low_water {
            self.speed_multiplier = (self.speed_multiplier - feedback.step).max(feedback.floor);
        }
    }

    /// Outcomes currently in the rolling window
    pub fn window_len(&self) -> usize {
        self.history.len()
    }
}
