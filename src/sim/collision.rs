//! Collision detection and scoring
//!
//! Three geometric families share this module:
//! - falling entities against a horizontal player band (racer, bubble catch)
//! - a bouncing ball against two vertical paddles (pong)
//! - a jumping avatar against a falling block or wall (jump-avoid)

use glam::Vec2;
use rand::Rng;

use super::state::{Appearance, Ball, BandPlayer, Entity, EntityShape, Jumper, Paddle, ScoreBoard, Side};
use crate::tuning::{ContactRule, JumpRules, MissPolicy, Playfield, RewardRule};

// --- Falling vs band ---

/// How a band contact was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandOutcome {
    Caught,
    Missed,
}

impl BandOutcome {
    pub fn is_success(self) -> bool {
        self == BandOutcome::Caught
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub id: u32,
    pub outcome: BandOutcome,
}

/// Whether a contact coordinate lies in the band just above the bottom edge
#[inline]
pub fn in_contact_band(contact_y: f32, playfield_height: f32, band_height: f32) -> bool {
    contact_y > playfield_height - band_height && contact_y < playfield_height
}

/// Whether x lies strictly inside the player's horizontal span
#[inline]
pub fn within_span(x: f32, player_x: f32, half_width: f32) -> bool {
    (x - player_x).abs() < half_width
}

/// Resolve every live entity inside the contact band, retiring it
pub fn resolve_band(
    entities: &mut [Entity],
    player: &BandPlayer,
    playfield: Playfield,
    rule: ContactRule,
) -> Vec<Resolution> {
    let mut resolved = Vec::new();
    for entity in entities.iter_mut().filter(|e| e.alive) {
        if !in_contact_band(entity.contact_y(), playfield.height, player.height) {
            continue;
        }
        let inside = within_span(entity.pos.x, player.x, player.half_width());
        let outcome = match (rule, inside) {
            (ContactRule::Catch, true) | (ContactRule::Dodge, false) => BandOutcome::Caught,
            (ContactRule::Catch, false) | (ContactRule::Dodge, true) => BandOutcome::Missed,
        };
        entity.retire();
        resolved.push(Resolution {
            id: entity.id,
            outcome,
        });
    }
    resolved
}

/// Points a catch is worth at `level`
pub fn reward_for(base: u64, rule: RewardRule, level: u32) -> u64 {
    match rule {
        RewardRule::Fixed => base,
        RewardRule::PerLevel => base.saturating_mul(u64::from(level.max(1))),
    }
}

/// Apply a miss to the board according to the mode's policy
pub fn apply_miss(board: &mut ScoreBoard, policy: MissPolicy) {
    match policy {
        MissPolicy::Count => board.record_miss(),
        MissPolicy::Penalty(points) => board.penalize(points),
        MissPolicy::CountAndPenalty(points) => {
            board.record_miss();
            board.penalize(points);
        }
    }
}

// --- Ball vs paddles ---

/// What happened to the ball this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RallyEvent {
    WallBounce,
    Save(Side),
    Lost(Side),
}

/// Integrate the ball one tick and test it against the walls and both paddles.
/// Stops at the first lost side.
pub fn step_ball(ball: &mut Ball, paddles: &[Paddle; 2], playfield: Playfield, dt: f32) -> Vec<RallyEvent> {
    let mut events = Vec::new();
    ball.pos += ball.vel * dt;

    // Reflect only while heading into the wall, so a long frame that carries
    // the ball past it cannot flip the velocity back outwards next tick
    let into_top = ball.pos.y <= ball.radius && ball.vel.y < 0.0;
    let into_bottom = ball.pos.y >= playfield.height - ball.radius && ball.vel.y > 0.0;
    if into_top || into_bottom {
        ball.vel.y = -ball.vel.y;
        events.push(RallyEvent::WallBounce);
    }

    for paddle in paddles {
        let (leading_edge, reached_face, past_boundary, approaching) = match paddle.side {
            Side::Left => {
                let edge = ball.pos.x - ball.radius;
                (edge, edge <= paddle.face_x(), edge <= 0.0, ball.vel.x < 0.0)
            }
            Side::Right => {
                let edge = ball.pos.x + ball.radius;
                (edge, edge >= paddle.face_x(), edge >= playfield.width, ball.vel.x > 0.0)
            }
        };
        if reached_face && paddle.spans(ball.pos.y) {
            if approaching {
                ball.vel.x = -ball.vel.x;
                events.push(RallyEvent::Save(paddle.side));
            }
        } else if past_boundary {
            log::trace!("ball edge {:.1} passed the {} boundary", leading_edge, paddle.side.as_str());
            events.push(RallyEvent::Lost(paddle.side));
            break;
        }
    }
    events
}

// --- Jump vs obstacle ---

/// AABB overlap; boxes that only touch do not overlap
#[inline]
pub fn rects_overlap(a: (Vec2, Vec2), b: (Vec2, Vec2)) -> bool {
    a.0.x < b.1.x && a.1.x > b.0.x && a.0.y < b.1.y && a.1.y > b.0.y
}

/// Whether the jump-avoid obstacle hits the avatar this tick.
///
/// `previous_bottom` is the obstacle's bottom edge before it moved. A
/// partial-width block collides on box overlap. A full-width wall collides
/// when its bottom edge crosses the avatar's standing line while the avatar
/// is on the ground.
pub fn jump_collision(jumper: &Jumper, obstacle: &Entity, previous_bottom: f32, playfield: Playfield) -> bool {
    match obstacle.shape {
        EntityShape::FullWidth { .. } => {
            let line = jumper.ground_y;
            let reached = previous_bottom < line && obstacle.bottom() >= line;
            reached && !jumper.airborne
        }
        _ => rects_overlap(jumper.bounds(), obstacle.bounds(playfield.width)),
    }
}

/// A fresh obstacle at the top with random lane, shape and appearance
pub fn spawn_jump_obstacle<R: Rng + ?Sized>(rules: &JumpRules, playfield: Playfield, rng: &mut R) -> Entity {
    let lanes = [playfield.width / 4.0, playfield.width / 2.0, 3.0 * playfield.width / 4.0];
    let lane = lanes[rng.random_range(0..lanes.len())];
    let shape = if rng.random_bool(0.5) {
        EntityShape::Rect {
            width: rules.obstacle_width,
            height: rules.obstacle_height,
        }
    } else {
        EntityShape::FullWidth {
            height: rules.obstacle_height,
        }
    };
    let appearance = match rng.random_range(0..3) {
        0 => Appearance::Wall,
        1 => Appearance::Stone,
        _ => Appearance::Wood,
    };
    let x = match shape {
        EntityShape::FullWidth { .. } => 0.0,
        _ => lane,
    };
    Entity::new(0, Vec2::new(x, 0.0), rules.obstacle_speed, shape, appearance)
}
