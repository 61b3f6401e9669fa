//! Game state and core simulation types
//!
//! Everything a match mutates lives in [`GameState`]; there are no
//! process-wide singletons. The high-score table is the only field that
//! survives [`GameState::reset_match`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::gesture::GestureDebouncer;
use super::spawner::Spawner;
use crate::highscores::HighScores;
use crate::tuning::{JumpRules, ModeConfig, Playfield, PongRules, Rules};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start gesture or key
    Start,
    /// Active gameplay
    Playing,
    /// Game is paused (no state reset on resume)
    Paused,
    /// Match ended, waiting for the restart gesture or key
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Start => "START",
            GamePhase::Playing => "PLAYING",
            GamePhase::Paused => "PAUSED",
            GamePhase::GameOver => "GAMEOVER",
        }
    }
}

/// One side of a pong table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "Left",
            Side::Right => "Right",
        }
    }
}

/// Entity geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntityShape {
    /// Axis-aligned block anchored at its top-left corner
    Rect { width: f32, height: f32 },
    /// Disc anchored at its center
    Circle { radius: f32 },
    /// Block spanning the whole playfield width, anchored at its top edge
    FullWidth { height: f32 },
}

impl EntityShape {
    /// Horizontal room the shape needs inside the playfield
    pub fn footprint(&self, playfield_width: f32) -> f32 {
        match *self {
            EntityShape::Rect { width, .. } => width,
            EntityShape::Circle { radius } => radius * 2.0,
            EntityShape::FullWidth { .. } => playfield_width,
        }
    }

    /// Offset from the left edge of the footprint to the anchor point
    pub fn anchor_offset(&self) -> f32 {
        match *self {
            EntityShape::Circle { radius } => radius,
            _ => 0.0,
        }
    }

    /// Vertical coordinate tested against the contact band
    pub fn contact_y(&self, y: f32) -> f32 {
        match *self {
            EntityShape::Circle { radius } => y + radius,
            _ => y,
        }
    }

    pub fn height(&self) -> f32 {
        match *self {
            EntityShape::Rect { height, .. } | EntityShape::FullWidth { height } => height,
            EntityShape::Circle { radius } => radius * 2.0,
        }
    }
}

/// Visual class picked at spawn time (the renderer maps it to a color)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Appearance {
    #[default]
    Plain,
    /// Difficulty tier the entity was spawned in (0-based)
    Tier(u32),
    Wall,
    Stone,
    Wood,
}

/// A falling obstacle or target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    /// Anchor position (see [`EntityShape`]); y grows along the fall axis
    pub pos: Vec2,
    /// Fall speed (px/s)
    pub speed: f32,
    pub shape: EntityShape,
    /// Cleared by the collision resolver; swept by the spawner
    pub alive: bool,
    pub appearance: Appearance,
}

impl Entity {
    pub fn new(id: u32, pos: Vec2, speed: f32, shape: EntityShape, appearance: Appearance) -> Self {
        Self {
            id,
            pos,
            speed,
            shape,
            alive: true,
            appearance,
        }
    }

    /// Move along the fall axis
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.pos.y += self.speed * dt;
    }

    pub fn retire(&mut self) {
        self.alive = false;
    }

    pub fn contact_y(&self) -> f32 {
        self.shape.contact_y(self.pos.y)
    }

    /// Bottom edge along the fall axis
    pub fn bottom(&self) -> f32 {
        match self.shape {
            EntityShape::Circle { radius } => self.pos.y + radius,
            shape => self.pos.y + shape.height(),
        }
    }

    /// Axis-aligned bounds as (min, max)
    pub fn bounds(&self, playfield_width: f32) -> (Vec2, Vec2) {
        match self.shape {
            EntityShape::Rect { width, height } => (self.pos, self.pos + Vec2::new(width, height)),
            EntityShape::Circle { radius } => (self.pos - Vec2::splat(radius), self.pos + Vec2::splat(radius)),
            EntityShape::FullWidth { height } => (
                Vec2::new(0.0, self.pos.y),
                Vec2::new(playfield_width, self.pos.y + height),
            ),
        }
    }
}

/// Car or basket riding the bottom edge of the playfield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandPlayer {
    /// Horizontal center
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl BandPlayer {
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }
}

/// The pong ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Velocity (px/s)
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn serve(rules: &PongRules, playfield: Playfield) -> Self {
        Self {
            pos: playfield.center(),
            vel: rules.ball_velocity,
            radius: rules.ball_radius,
        }
    }
}

/// A vertical pong paddle ("rod") on a fixed horizontal line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    /// Outer edge of the paddle (left edge for Left, right edge for Right)
    pub x: f32,
    /// Top of the paddle
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    pub fn new(side: Side, rules: &PongRules, playfield: Playfield) -> Self {
        let x = match side {
            Side::Left => rules.left_x,
            Side::Right => rules.right_x,
        };
        let mut paddle = Self {
            side,
            x,
            y: 0.0,
            width: rules.paddle_width,
            height: rules.paddle_height,
        };
        paddle.center(playfield);
        paddle
    }

    /// The edge the ball bounces off
    pub fn face_x(&self) -> f32 {
        match self.side {
            Side::Left => self.x + self.width,
            Side::Right => self.x - self.width,
        }
    }

    /// Center the paddle on a tracked vertical position
    pub fn track(&mut self, center_y: f32) {
        self.y = center_y - self.height / 2.0;
    }

    pub fn center(&mut self, playfield: Playfield) {
        self.track(playfield.height / 2.0);
    }

    /// Whether a vertical coordinate lies within the paddle's span (inclusive)
    pub fn spans(&self, y: f32) -> bool {
        self.y <= y && y <= self.y + self.height
    }
}

/// The jump-avoid avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jumper {
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    /// Vertical velocity (px/s, negative is up)
    pub vel_y: f32,
    pub airborne: bool,
    /// Resting y of the top edge
    pub ground_y: f32,
}

impl Jumper {
    pub fn new(rules: &JumpRules, playfield: Playfield) -> Self {
        let ground_y = playfield.height - rules.ground_offset;
        Self {
            pos: Vec2::new(playfield.width / 2.0, ground_y),
            size: rules.player_size,
            vel_y: 0.0,
            airborne: false,
            ground_y,
        }
    }

    /// Start a jump; ignored while already airborne
    pub fn launch(&mut self, impulse: f32) -> bool {
        if self.airborne {
            return false;
        }
        self.airborne = true;
        self.vel_y = impulse;
        true
    }

    /// Integrate under gravity (position first, then velocity); lands on the ground line
    pub fn integrate(&mut self, dt: f32, gravity: f32) {
        if !self.airborne {
            return;
        }
        self.pos.y += self.vel_y * dt;
        self.vel_y += gravity * dt;
        if self.pos.y >= self.ground_y {
            self.pos.y = self.ground_y;
            self.vel_y = 0.0;
            self.airborne = false;
        }
    }

    /// Move sideways, keeping the whole avatar on screen
    pub fn steer(&mut self, dx: f32, playfield_width: f32) {
        self.pos.x = (self.pos.x + dx).clamp(0.0, (playfield_width - self.size).max(0.0));
    }

    pub fn bounds(&self) -> (Vec2, Vec2) {
        (self.pos, self.pos + Vec2::splat(self.size))
    }
}

/// Remembers the last tracked head height to spot a sudden rise
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JumpDetector {
    previous_y: Option<f32>,
}

impl JumpDetector {
    /// Feed this frame's head height; true when it rose by more than `threshold` since the last one
    pub fn observe(&mut self, head_y: Option<f32>, threshold: f32) -> bool {
        let Some(y) = head_y else {
            return false;
        };
        let rose = self.previous_y.is_some_and(|prev| y < prev - threshold);
        self.previous_y = Some(y);
        rose
    }

    pub fn reset(&mut self) {
        self.previous_y = None;
    }
}

/// Score, misses and per-side rally points for the running match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub score: u64,
    pub misses: u32,
    /// Pong points, indexed by [`Side::index`]
    pub rally: [u32; 2],
}

impl ScoreBoard {
    pub fn award(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Subtract a penalty, never going below zero
    pub fn penalize(&mut self, points: u64) {
        self.score = self.score.saturating_sub(points);
    }

    pub fn record_miss(&mut self) {
        self.misses = self.misses.saturating_add(1);
    }

    pub fn award_side(&mut self, side: Side) {
        self.rally[side.index()] += 1;
    }

    /// Best rally count of either side
    pub fn best_rally(&self) -> u32 {
        self.rally[0].max(self.rally[1])
    }
}

/// Things that happened during a tick, drained by the platform layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    GestureConfirmed,
    Spawned { id: u32 },
    /// Spawning skipped because the entity cannot fit inside the playfield
    SpawnSkipped,
    Caught { id: u32, points: u64 },
    Missed { id: u32 },
    /// Left the playfield unresolved without counting either way
    Expired { id: u32 },
    LevelUp { level: u32 },
    PaddleSave { side: Side },
    RallyLost { side: Side },
    Jumped,
    ObstacleCleared,
    /// Jump-avoid collision: score reset in place, play continues
    Crashed,
}

/// Mode-specific actors
#[derive(Debug, Clone)]
pub enum Arena {
    Falling {
        player: BandPlayer,
        spawner: Spawner,
    },
    Pong {
        ball: Ball,
        paddles: [Paddle; 2],
    },
    Jump {
        jumper: Jumper,
        obstacle: Entity,
        detector: JumpDetector,
    },
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: ModeConfig,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub board: ScoreBoard,
    pub arena: Arena,
    pub difficulty: Difficulty,
    pub start_gesture: GestureDebouncer,
    pub restart_gesture: GestureDebouncer,
    /// Process-lifetime best scores; never cleared by a restart
    pub high_scores: HighScores,
    /// Leaderboard rank the last recorded result earned, if it made the table
    pub last_rank: Option<usize>,
    /// Pong winner of the last rally
    pub winner: Option<Side>,
    /// Timestamp of the last paddle save (drives the ball flash)
    pub last_hit_time: Option<f64>,
    /// Timestamp of the current tick (seconds)
    pub now: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events emitted since the last drain
    pub events: Vec<GameEvent>,
    /// Whether a degenerate-spawn warning was already logged this match
    pub(crate) spawn_warned: bool,
}

impl GameState {
    /// Create a new game in the START phase
    pub fn new(config: ModeConfig, seed: u64) -> Self {
        log::debug!("Seeding {} with {}", config.mode.as_str(), seed);
        let mut rng = Pcg32::seed_from_u64(seed);
        let arena = Arena::new(&config, 0.0, &mut rng);
        let difficulty = Difficulty::new(&config.difficulty);
        Self {
            config,
            rng,
            phase: GamePhase::Start,
            board: ScoreBoard::default(),
            arena,
            difficulty,
            start_gesture: GestureDebouncer::new(),
            restart_gesture: GestureDebouncer::new(),
            high_scores: HighScores::new(),
            last_rank: None,
            winner: None,
            last_hit_time: None,
            now: 0.0,
            time_ticks: 0,
            events: Vec::new(),
            spawn_warned: false,
        }
    }

    /// Restore the initial match values (score, misses, level, actors, entities).
    /// Phase and high scores are left alone.
    pub fn reset_match(&mut self) {
        self.board = ScoreBoard::default();
        self.arena = Arena::new(&self.config, self.now, &mut self.rng);
        self.difficulty.reset();
        self.start_gesture.reset();
        self.restart_gesture.reset();
        self.winner = None;
        self.last_rank = None;
        self.last_hit_time = None;
        self.spawn_warned = false;
    }

    /// Switch phase, emitting an event only on an actual change
    pub fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        log::info!("{}: {} -> {}", self.config.mode.as_str(), from.as_str(), to.as_str());
        self.phase = to;
        self.events.push(GameEvent::PhaseChanged { from, to });
    }

    /// START/GAMEOVER -> PLAYING with a fresh match
    pub fn begin_match(&mut self) {
        self.reset_match();
        self.set_phase(GamePhase::Playing);
    }

    /// PLAYING -> GAMEOVER, recording the result
    pub fn end_match(&mut self, winner: Option<Side>) {
        let result = match self.arena {
            Arena::Pong { .. } => u64::from(self.board.best_rally()),
            _ => self.board.score,
        };
        self.record_high_score(result);
        self.winner = winner;
        // The hands that were playing are still in view; a restart hold only
        // counts once they have left it
        self.restart_gesture.disarm();
        match winner {
            Some(side) => log::info!(
                "Game over: {} wins ({} - {})",
                side.as_str(),
                self.board.rally[0],
                self.board.rally[1]
            ),
            None => log::info!(
                "Game over: score {} at level {} after {} misses",
                self.board.score,
                self.level(),
                self.board.misses
            ),
        }
        self.set_phase(GamePhase::GameOver);
    }

    pub fn record_high_score(&mut self, score: u64) {
        let level = self.level();
        self.last_rank = self.high_scores.add_score(score, level, self.time_ticks);
        if let Some(rank) = self.last_rank {
            log::info!("Score {} entered the leaderboard at #{}", score, rank);
        }
    }

    pub fn level(&self) -> u32 {
        self.difficulty.level()
    }

    pub fn high_score(&self) -> u64 {
        self.high_scores.top_score().unwrap_or(0)
    }

    /// Live falling entities (empty for non-falling modes)
    pub fn entities(&self) -> &[Entity] {
        match &self.arena {
            Arena::Falling { spawner, .. } => &spawner.entities,
            Arena::Jump { obstacle, .. } => std::slice::from_ref(obstacle),
            Arena::Pong { .. } => &[],
        }
    }

    /// Whether the pong ball should be drawn in its flash color
    pub fn flash_active(&self) -> bool {
        let Rules::Pong(rules) = &self.config.rules else {
            return false;
        };
        self.last_hit_time
            .is_some_and(|t| self.now - t < rules.flash_secs)
    }

    /// Take the events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Arena {
    /// Fresh actors for the configured mode
    pub fn new(config: &ModeConfig, now: f64, rng: &mut Pcg32) -> Self {
        let playfield = config.playfield;
        match &config.rules {
            Rules::Falling(rules) => Arena::Falling {
                player: BandPlayer {
                    x: playfield.width / 2.0,
                    width: rules.player_width,
                    height: rules.player_height,
                },
                spawner: Spawner::new(now),
            },
            Rules::Pong(rules) => Arena::Pong {
                ball: Ball::serve(rules, playfield),
                paddles: [
                    Paddle::new(Side::Left, rules, playfield),
                    Paddle::new(Side::Right, rules, playfield),
                ],
            },
            Rules::Jump(rules) => Arena::Jump {
                jumper: Jumper::new(rules, playfield),
                obstacle: super::collision::spawn_jump_obstacle(rules, playfield, rng),
                detector: JumpDetector::default(),
            },
        }
    }

    /// Return paddles to mid-height (pong outside of PLAYING)
    pub fn center_actors(&mut self, playfield: Playfield) {
        if let Arena::Pong { paddles, .. } = self {
            for paddle in paddles.iter_mut() {
                paddle.center(playfield);
            }
        }
    }
}
