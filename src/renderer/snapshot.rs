//! Per-tick draw snapshot
//!
//! Everything a renderer needs to draw one frame, flattened into sprites so
//! the drawing side never has to know which game is running.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{Appearance, Arena, Entity, EntityShape, GamePhase, GameState};
use crate::tuning::GameMode;

/// RGB color
pub type Color = [u8; 3];

pub const PLAYER_COLOR: Color = [0, 200, 255];
pub const PADDLE_COLOR: Color = [255, 255, 255];
pub const BALL_COLOR: Color = [255, 0, 0];
pub const FLASH_COLOR: Color = [255, 255, 0];

/// Per-tier bubble colors, cycled
const TIER_COLORS: [Color; 6] = [
    [0, 255, 0],
    [0, 255, 255],
    [255, 255, 0],
    [255, 128, 0],
    [255, 0, 255],
    [255, 0, 0],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpriteKind {
    Player,
    Paddle,
    Ball,
    Entity,
}

/// An axis-aligned box or disc to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub min: Vec2,
    pub max: Vec2,
    /// Draw as the disc inscribed in the box
    pub round: bool,
    pub color: Color,
}

impl Sprite {
    fn rect(kind: SpriteKind, min: Vec2, size: Vec2, color: Color) -> Self {
        Self {
            kind,
            min,
            max: min + size,
            round: false,
            color,
        }
    }

    fn disc(kind: SpriteKind, center: Vec2, radius: f32, color: Color) -> Self {
        Self {
            kind,
            min: center - Vec2::splat(radius),
            max: center + Vec2::splat(radius),
            round: true,
            color,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// Everything drawn for one tick
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub mode: GameMode,
    pub phase: GamePhase,
    pub tick: u64,
    pub score: u64,
    pub level: u32,
    pub misses: u32,
    pub high_score: u64,
    /// Leaderboard scores, best first
    pub leaderboard: Vec<u64>,
    pub rally: [u32; 2],
    /// Pong ball is in its post-save flash
    pub flash: bool,
    pub sprites: Vec<Sprite>,
    pub overlay: Option<String>,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let playfield = state.config.playfield;
        let flash = state.flash_active();
        let mut sprites = Vec::new();

        match &state.arena {
            Arena::Falling { player, .. } => {
                sprites.push(Sprite::rect(
                    SpriteKind::Player,
                    Vec2::new(player.x - player.half_width(), playfield.height - player.height),
                    Vec2::new(player.width, player.height),
                    PLAYER_COLOR,
                ));
            }
            Arena::Pong { ball, paddles } => {
                for paddle in paddles {
                    let left = paddle.x.min(paddle.face_x());
                    sprites.push(Sprite::rect(
                        SpriteKind::Paddle,
                        Vec2::new(left, paddle.y),
                        Vec2::new(paddle.width, paddle.height),
                        PADDLE_COLOR,
                    ));
                }
                let color = if flash { FLASH_COLOR } else { BALL_COLOR };
                sprites.push(Sprite::disc(SpriteKind::Ball, ball.pos, ball.radius, color));
            }
            Arena::Jump { jumper, .. } => {
                sprites.push(Sprite::rect(
                    SpriteKind::Player,
                    jumper.pos,
                    Vec2::splat(jumper.size),
                    PLAYER_COLOR,
                ));
            }
        }

        sprites.extend(
            state
                .entities()
                .iter()
                .filter(|e| e.alive)
                .map(|e| entity_sprite(e, playfield.width)),
        );

        Self {
            mode: state.config.mode,
            phase: state.phase,
            tick: state.time_ticks,
            score: state.board.score,
            level: state.level(),
            misses: state.board.misses,
            high_score: state.high_score(),
            leaderboard: state.high_scores.entries.iter().map(|e| e.score).collect(),
            rally: state.board.rally,
            flash,
            sprites,
            overlay: overlay_text(state),
        }
    }

    /// One-line HUD summary
    pub fn hud_line(&self) -> String {
        match self.mode {
            GameMode::HandPong | GameMode::KeyPong => format!(
                "[{}] {} | Left {} - Right {} | best {}",
                self.mode.as_str(),
                self.phase.as_str(),
                self.rally[0],
                self.rally[1],
                self.high_score
            ),
            _ => format!(
                "[{}] {} | score {} | level {} | misses {} | best {}",
                self.mode.as_str(),
                self.phase.as_str(),
                self.score,
                self.level,
                self.misses,
                self.high_score
            ),
        }
    }
}

fn entity_sprite(entity: &Entity, playfield_width: f32) -> Sprite {
    let color = appearance_color(entity.appearance);
    match entity.shape {
        EntityShape::Circle { radius } => Sprite::disc(SpriteKind::Entity, entity.pos, radius, color),
        _ => {
            let (min, max) = entity.bounds(playfield_width);
            Sprite::rect(SpriteKind::Entity, min, max - min, color)
        }
    }
}

pub fn appearance_color(appearance: Appearance) -> Color {
    match appearance {
        Appearance::Plain => [255, 0, 0],
        Appearance::Tier(tier) => TIER_COLORS[tier as usize % TIER_COLORS.len()],
        Appearance::Wall => [128, 128, 128],
        Appearance::Stone => [90, 90, 90],
        Appearance::Wood => [139, 69, 19],
    }
}

/// Phase-specific text drawn over the playfield
pub fn overlay_text(state: &GameState) -> Option<String> {
    let mode = state.config.mode;
    let hold = state.config.gesture_hold_secs;
    let prompt = match (mode, state.phase) {
        (GameMode::KeyPong, GamePhase::Start) => "Press 'S' to start".to_string(),
        (GameMode::HandPong, GamePhase::Start) => {
            format!("Show both hands for {:.0} second to start, or press 'S'", hold)
        }
        (_, GamePhase::Start) => format!("Show your hand for {:.0} second to start, or press 'S'", hold),
        (_, GamePhase::Paused) => "Paused. Press 'R' to resume".to_string(),
        (GameMode::HandPong | GameMode::KeyPong, GamePhase::GameOver) => {
            let winner = state.winner.map_or("Nobody", |side| side.as_str());
            format!("{} player wins! Press 'R' to restart", winner)
        }
        (_, GamePhase::GameOver) => {
            let rank = state
                .last_rank
                .map(|rank| format!(" (#{} on the leaderboard)", rank))
                .unwrap_or_default();
            format!(
                "Game Over! Score: {}{}  High score: {}. Press 'R' to restart",
                state.board.score,
                rank,
                state.high_score()
            )
        }
        (_, GamePhase::Playing) => return None,
    };
    Some(prompt)
}
