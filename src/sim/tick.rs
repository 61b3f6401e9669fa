//! Per-frame simulation tick
//!
//! Drives the phase machine and, while playing, one of three per-family
//! updates. Everything here is deterministic given the seed, the inputs and
//! the dt sequence.

use super::collision::{
    BandOutcome, RallyEvent, apply_miss, jump_collision, resolve_band, reward_for, spawn_jump_obstacle, step_ball,
};
use super::difficulty::DifficultyCurve;
use super::gesture::GestureCondition;
use super::spawner::{SpawnOutcome, SpawnParams};
use super::state::{Appearance, Arena, GameEvent, GamePhase, GameState, Side};
use crate::consts::MAX_TICK_DT;
use crate::input::{HandLabel, KeyCommand, TrackedSignal};
use crate::tuning::{AbsentSignal, ExitPolicy, RallyScoring, Rules};

/// Inputs for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Capture timestamp of this frame (seconds)
    pub now: f64,
    pub signal: TrackedSignal,
    /// Key pressed this frame, if any
    pub command: Option<KeyCommand>,
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = dt.clamp(0.0, MAX_TICK_DT);
    state.now = input.now;
    state.time_ticks += 1;

    // A transition ends the tick; the new phase runs from the next frame
    let transitioned = match input.command {
        Some(command) => apply_command(state, command),
        None => false,
    };

    if !transitioned {
        match state.phase {
            GamePhase::Start | GamePhase::GameOver => await_gesture(state, &input.signal),
            GamePhase::Paused => {}
            GamePhase::Playing => match state.config.rules {
                Rules::Falling(_) => play_falling(state, &input.signal, dt),
                Rules::Pong(_) => play_pong(state, &input.signal, dt),
                Rules::Jump(_) => play_jump(state, &input.signal, dt),
            },
        }
    }

    if state.phase != GamePhase::Playing {
        let playfield = state.config.playfield;
        state.arena.center_actors(playfield);
    }
}

/// Returns whether the command changed the phase
fn apply_command(state: &mut GameState, command: KeyCommand) -> bool {
    match (command, state.phase) {
        (KeyCommand::Pause, GamePhase::Playing) => {
            state.set_phase(GamePhase::Paused);
            true
        }
        (KeyCommand::RestartOrResume, GamePhase::Paused) => {
            state.set_phase(GamePhase::Playing);
            true
        }
        (KeyCommand::RestartOrResume | KeyCommand::Start, GamePhase::Start | GamePhase::GameOver) => {
            state.begin_match();
            true
        }
        // Quit belongs to the run loop
        _ => false,
    }
}

fn await_gesture(state: &mut GameState, signal: &TrackedSignal) {
    let condition = state.config.gesture;
    let confirmed = if condition == GestureCondition::Immediate {
        true
    } else {
        let held = condition.holds(signal);
        let required = state.config.gesture_hold_secs;
        let debouncer = match state.phase {
            GamePhase::GameOver => &mut state.restart_gesture,
            _ => &mut state.start_gesture,
        };
        debouncer.update(held, state.now, required).is_some()
    };
    if confirmed {
        state.events.push(GameEvent::GestureConfirmed);
        state.begin_match();
    }
}

fn play_falling(state: &mut GameState, signal: &TrackedSignal, dt: f32) {
    let Rules::Falling(rules) = &state.config.rules else {
        return;
    };
    let rules = rules.clone();
    let playfield = state.config.playfield;

    // Actor
    if let Arena::Falling { player, .. } = &mut state.arena {
        match (signal.pointer_x, rules.absent_signal) {
            (Some(x), _) => player.x = x.clamp(0.0, playfield.width),
            (None, AbsentSignal::Center) => player.x = playfield.width / 2.0,
            (None, AbsentSignal::HoldLast) => {}
        }
    }

    // Difficulty
    let level_before = state.difficulty.level();
    let params = state.difficulty.update(state.board.score);
    if params.level != level_before {
        log::debug!("Level {} -> {}", level_before, params.level);
        if params.level > level_before {
            state.events.push(GameEvent::LevelUp { level: params.level });
        }
    }
    let appearance = match state.config.difficulty.curve {
        DifficultyCurve::ContinuousTier { .. } => Appearance::Tier(params.level - 1),
        _ => Appearance::Plain,
    };

    let Arena::Falling { player, spawner } = &mut state.arena else {
        return;
    };
    player.width = params.player_width.unwrap_or(rules.player_width);

    // Spawn and advance
    let spawn = SpawnParams {
        interval: params.spawn_interval,
        speed: params.entity_speed,
        max_population: params.max_population,
        margin: rules.spawn_margin,
        appearance,
    };
    match spawner.update(state.now, dt, playfield, rules.shape, &spawn, &mut state.rng) {
        SpawnOutcome::Spawned(id) => {
            log::debug!("Spawned entity {} ({} live)", id, spawner.live_count());
            state.events.push(GameEvent::Spawned { id });
        }
        SpawnOutcome::Degenerate => {
            if !state.spawn_warned {
                log::warn!(
                    "Entity footprint {} with margin {} does not fit a {}px playfield; not spawning",
                    rules.shape.footprint(playfield.width),
                    rules.spawn_margin,
                    playfield.width
                );
                state.spawn_warned = true;
            }
            state.events.push(GameEvent::SpawnSkipped);
        }
        SpawnOutcome::Waiting | SpawnOutcome::Capped => {}
    }

    // Collision
    for resolution in resolve_band(&mut spawner.entities, player, playfield, rules.contact) {
        let success = resolution.outcome.is_success();
        match resolution.outcome {
            BandOutcome::Caught => {
                let points = reward_for(rules.reward, rules.reward_rule, params.level);
                state.board.award(points);
                state.events.push(GameEvent::Caught {
                    id: resolution.id,
                    points,
                });
            }
            BandOutcome::Missed => {
                apply_miss(&mut state.board, rules.miss_policy);
                state.events.push(GameEvent::Missed { id: resolution.id });
            }
        }
        state.difficulty.record_outcome(success);
    }

    // Exits
    for escaped in spawner.sweep(playfield.height) {
        match rules.exit_policy {
            ExitPolicy::Neutral => state.events.push(GameEvent::Expired { id: escaped.id }),
            ExitPolicy::Miss => {
                apply_miss(&mut state.board, rules.miss_policy);
                state.events.push(GameEvent::Missed { id: escaped.id });
                state.difficulty.record_outcome(false);
            }
        }
    }

    // Terminal
    if state.config.max_misses.is_some_and(|max| state.board.misses >= max) {
        state.end_match(None);
    }
}

fn play_pong(state: &mut GameState, signal: &TrackedSignal, dt: f32) {
    let Rules::Pong(rules) = &state.config.rules else {
        return;
    };
    let (scoring, hand_controlled) = (rules.scoring, rules.hand_controlled);
    let playfield = state.config.playfield;
    let Arena::Pong { ball, paddles } = &mut state.arena else {
        return;
    };

    if hand_controlled {
        for paddle in paddles.iter_mut() {
            let label = match paddle.side {
                Side::Left => HandLabel::Left,
                Side::Right => HandLabel::Right,
            };
            match signal.hands.get(label) {
                Some(hand) => paddle.track(hand.y),
                None => paddle.center(playfield),
            }
        }
    }

    let mut lost = None;
    for event in step_ball(ball, paddles, playfield, dt) {
        match event {
            RallyEvent::WallBounce => log::trace!("wall bounce at y={:.1}", ball.pos.y),
            RallyEvent::Save(side) => {
                state.last_hit_time = Some(state.now);
                if scoring == RallyScoring::DefenderOnSave {
                    state.board.award_side(side);
                }
                state.events.push(GameEvent::PaddleSave { side });
            }
            RallyEvent::Lost(side) => {
                if scoring == RallyScoring::ScorerOnMiss {
                    state.board.award_side(side.opponent());
                }
                state.events.push(GameEvent::RallyLost { side });
                lost = Some(side);
            }
        }
    }

    if let Some(side) = lost {
        state.end_match(Some(side.opponent()));
    }
}

fn play_jump(state: &mut GameState, signal: &TrackedSignal, dt: f32) {
    let Rules::Jump(rules) = &state.config.rules else {
        return;
    };
    let rules = rules.clone();
    let playfield = state.config.playfield;
    let Arena::Jump {
        jumper,
        obstacle,
        detector,
    } = &mut state.arena
    else {
        return;
    };

    // Actor
    if detector.observe(signal.head.map(|h| h.y), rules.jump_threshold) && jumper.launch(rules.jump_velocity) {
        log::debug!("Jump");
        state.events.push(GameEvent::Jumped);
    }
    if let Some(head) = signal.head {
        let third = playfield.width / 3.0;
        if head.x < third {
            jumper.steer(-rules.steer_speed * dt, playfield.width);
        } else if head.x > 2.0 * third {
            jumper.steer(rules.steer_speed * dt, playfield.width);
        }
    }
    jumper.integrate(dt, rules.gravity);

    // Obstacle
    let previous_bottom = obstacle.bottom();
    obstacle.advance(dt);
    let crashed = jump_collision(jumper, obstacle, previous_bottom, playfield);
    let cleared = !crashed && obstacle.pos.y > playfield.height;

    if crashed {
        let score = state.board.score;
        log::info!("Crashed with score {}", score);
        state.record_high_score(score);
        state.board.score = 0;
        state.events.push(GameEvent::Crashed);
    } else if cleared {
        state.board.award(rules.clear_reward);
        state.events.push(GameEvent::ObstacleCleared);
    }

    if crashed || cleared {
        let fresh = spawn_jump_obstacle(&rules, playfield, &mut state.rng);
        if let Arena::Jump { obstacle, .. } = &mut state.arena {
            *obstacle = fresh;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference_dt;
    use crate::sim::state::{Entity, EntityShape};
    use crate::tuning::{GameMode, ModeConfig};
    use glam::Vec2;
    use proptest::prelude::*;

    fn frame(i: u64) -> f64 {
        i as f64 / 30.0
    }

    fn input(i: u64, signal: TrackedSignal) -> TickInput {
        TickInput {
            now: frame(i),
            signal,
            command: None,
        }
    }

    fn key(i: u64, command: KeyCommand) -> TickInput {
        TickInput {
            now: frame(i),
            command: Some(command),
            ..Default::default()
        }
    }

    fn started(mode: GameMode, max_misses: Option<u32>) -> GameState {
        let mut config = ModeConfig::preset(mode);
        config.max_misses = max_misses;
        let mut state = GameState::new(config, 42);
        tick(&mut state, &key(0, KeyCommand::Start), reference_dt());
        assert_eq!(state.phase, GamePhase::Playing);
        state.drain_events();
        state
    }

    fn falling_entities(state: &mut GameState) -> &mut Vec<Entity> {
        match &mut state.arena {
            Arena::Falling { spawner, .. } => &mut spawner.entities,
            _ => panic!("not a falling mode"),
        }
    }

    fn block(id: u32, x: f32, y: f32) -> Entity {
        Entity::new(
            id,
            Vec2::new(x, y),
            150.0,
            EntityShape::Rect { width: 60.0, height: 80.0 },
            Appearance::Plain,
        )
    }

    #[test]
    fn test_racer_spawns_on_interval() {
        let mut state = started(GameMode::Racer, None);
        let mut spawned = 0;
        for i in 1..=600 {
            tick(&mut state, &input(i, TrackedSignal::default()), reference_dt());
            spawned += state
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::Spawned { .. }))
                .count();
        }
        // 20 s at one spawn per 1.5 s or faster: at least floor(20 / 1.5)
        assert!(spawned >= 13, "only {} spawns", spawned);
        for entity in state.entities() {
            assert!(entity.pos.x >= 50.0 && entity.pos.x <= 640.0 - 60.0 - 50.0);
        }
    }

    #[test]
    fn test_racer_catch_and_miss() {
        let mut state = started(GameMode::Racer, Some(5));
        falling_entities(&mut state).push(block(100, 320.0, 398.0));
        falling_entities(&mut state).push(block(101, 60.0, 398.0));

        tick(&mut state, &input(1, TrackedSignal::default()), reference_dt());
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Caught { id: 100, points: 10 }));
        assert!(events.contains(&GameEvent::Missed { id: 101 }));
        assert_eq!(state.board.score, 10);
        assert_eq!(state.board.misses, 1);
        assert!(state.entities().iter().all(|e| e.id < 100), "resolved entities swept");
    }

    #[test]
    fn test_racer_exit_is_neutral_and_bubble_exit_is_miss() {
        let mut racer = started(GameMode::Racer, None);
        falling_entities(&mut racer).push(block(7, 60.0, 479.0));
        // Step past the band in one frame
        tick(&mut racer, &input(1, TrackedSignal::default()), 0.1);
        assert!(racer.drain_events().contains(&GameEvent::Expired { id: 7 }));
        assert_eq!(racer.board.misses, 0);

        let mut bubbles = started(GameMode::BubbleCatch, None);
        let bubble = Entity::new(8, Vec2::new(60.0, 479.0), 90.0, EntityShape::Circle { radius: 30.0 }, Appearance::Plain);
        falling_entities(&mut bubbles).push(bubble);
        tick(&mut bubbles, &input(1, TrackedSignal::with_pointer(600.0)), 0.1);
        assert!(bubbles.drain_events().contains(&GameEvent::Missed { id: 8 }));
        assert_eq!(bubbles.board.misses, 1);
    }

    #[test]
    fn test_misses_end_the_match() {
        let mut state = started(GameMode::Racer, Some(5));
        state.board.award(30);
        for id in 0..5 {
            falling_entities(&mut state).push(block(200 + id, 60.0, 398.0));
        }
        tick(&mut state, &input(1, TrackedSignal::with_pointer(600.0)), reference_dt());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.board.misses, 5);
        assert_eq!(state.high_score(), 30);
    }

    #[test]
    fn test_threshold_crossing_levels_once() {
        let mut state = started(GameMode::Racer, None);
        state.board.award(25);
        let mut level_ups = 0;
        for i in 1..=90 {
            tick(&mut state, &input(i, TrackedSignal::default()), reference_dt());
            level_ups += state
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::LevelUp { .. }))
                .count();
            // Keep the score fixed so only the crossing matters
            state.board.score = 25;
        }
        assert_eq!(level_ups, 1);
        assert_eq!(state.level(), 2);
    }

    #[test]
    fn test_rush_penalty_floors_at_zero() {
        let mut state = started(GameMode::BubbleRush, None);
        state.board.award(3);
        let bubble = Entity::new(1, Vec2::new(40.0, 440.0), 90.0, EntityShape::Circle { radius: 25.0 }, Appearance::Plain);
        falling_entities(&mut state).push(bubble);
        tick(&mut state, &input(1, TrackedSignal::with_pointer(600.0)), reference_dt());
        assert_eq!(state.board.score, 0);
        assert_eq!(state.board.misses, 1);
    }

    #[test]
    fn test_pause_freezes_and_resume_keeps_state() {
        let mut state = started(GameMode::Racer, None);
        falling_entities(&mut state).push(block(50, 200.0, 100.0));
        state.board.award(10);

        tick(&mut state, &key(1, KeyCommand::Pause), reference_dt());
        assert_eq!(state.phase, GamePhase::Paused);
        let frozen: Vec<_> = state.entities().to_vec();
        for i in 2..30 {
            tick(&mut state, &input(i, TrackedSignal::default()), reference_dt());
        }
        assert_eq!(state.entities(), frozen.as_slice());

        tick(&mut state, &key(30, KeyCommand::RestartOrResume), reference_dt());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.board.score, 10);
        assert_eq!(state.entities(), frozen.as_slice(), "the resume tick itself does not advance");
    }

    #[test]
    fn test_start_gesture_needs_continuous_hold() {
        let mut state = GameState::new(ModeConfig::preset(GameMode::Racer), 1);
        let hand = TrackedSignal::with_pointer(320.0);

        for i in 0..20 {
            tick(&mut state, &input(i, hand), reference_dt());
        }
        // Dropout restarts the hold
        tick(&mut state, &input(20, TrackedSignal::default()), reference_dt());
        for i in 21..51 {
            tick(&mut state, &input(i, hand), reference_dt());
            assert_eq!(state.phase, GamePhase::Start, "confirmed early at frame {}", i);
        }
        tick(&mut state, &input(51, hand), reference_dt());
        tick(&mut state, &input(52, hand), reference_dt());
        assert_eq!(state.phase, GamePhase::Playing);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::GestureConfirmed));
        assert!(events.contains(&GameEvent::PhaseChanged {
            from: GamePhase::Start,
            to: GamePhase::Playing,
        }));
    }

    #[test]
    fn test_restart_gesture_keeps_high_score() {
        let mut state = started(GameMode::BubbleCatch, Some(15));
        state.board.award(50);
        state.end_match(None);
        assert_eq!(state.high_score(), 50);

        // Hand leaves the view for a frame, then comes back and holds
        tick(&mut state, &input(1, TrackedSignal::default()), reference_dt());
        let hand = TrackedSignal::with_hands(Some(Vec2::new(100.0, 100.0)), None);
        let mut i = 2;
        while state.phase == GamePhase::GameOver {
            tick(&mut state, &input(i, hand), reference_dt());
            i += 1;
            assert!(i < 60, "restart never confirmed");
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.board.score, 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.high_score(), 50);
    }

    #[test]
    fn test_hand_kept_in_view_does_not_restart() {
        let mut state = started(GameMode::Racer, Some(1));
        let hand = TrackedSignal::with_hands(None, Some(Vec2::new(300.0, 400.0)));
        tick(&mut state, &input(1, hand), reference_dt());
        state.end_match(None);

        // Three seconds of the same hand: the game-over screen stays up
        for i in 2..92 {
            tick(&mut state, &input(i, hand), reference_dt());
            assert_eq!(state.phase, GamePhase::GameOver, "restarted at frame {}", i);
        }
        tick(&mut state, &input(92, TrackedSignal::default()), reference_dt());
        for i in 93..=124 {
            tick(&mut state, &input(i, hand), reference_dt());
        }
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_key_only_mode_ignores_hands() {
        let mut state = GameState::new(ModeConfig::preset(GameMode::KeyPong), 1);
        let hands = TrackedSignal::with_hands(Some(Vec2::ZERO), Some(Vec2::ZERO));
        for i in 0..90 {
            tick(&mut state, &input(i, hands), reference_dt());
        }
        assert_eq!(state.phase, GamePhase::Start);
        tick(&mut state, &key(90, KeyCommand::RestartOrResume), reference_dt());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_hand_pong_save_then_loss() {
        let mut state = started(GameMode::HandPong, None);
        let Arena::Pong { ball, .. } = &mut state.arena else {
            panic!("not pong");
        };
        ball.pos = Vec2::new(60.0, 360.0);
        ball.vel = Vec2::new(-600.0, 0.0);

        tick(&mut state, &input(1, TrackedSignal::default()), reference_dt());
        assert!(state.drain_events().contains(&GameEvent::PaddleSave { side: Side::Left }));
        assert_eq!(state.board.rally, [1, 0]);
        assert!(state.flash_active());

        let Arena::Pong { ball, .. } = &mut state.arena else {
            panic!("not pong");
        };
        ball.pos = Vec2::new(1170.0, 40.0);
        ball.vel = Vec2::new(600.0, 0.0);
        tick(&mut state, &input(10, TrackedSignal::default()), reference_dt());
        assert!(!state.flash_active());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.winner, Some(Side::Left));
        assert_eq!(state.high_score(), 1);
    }

    #[test]
    fn test_hands_drive_paddles() {
        let mut state = started(GameMode::HandPong, None);
        let hands = TrackedSignal::with_hands(Some(Vec2::new(100.0, 200.0)), None);
        tick(&mut state, &input(1, hands), reference_dt());
        let Arena::Pong { paddles, .. } = &state.arena else {
            panic!("not pong");
        };
        assert_eq!(paddles[0].y, 200.0 - 75.0);
        assert_eq!(paddles[1].y, 360.0 - 75.0, "absent hand centers its paddle");
    }

    #[test]
    fn test_key_pong_scores_on_miss() {
        let mut state = started(GameMode::KeyPong, None);
        let Arena::Pong { ball, .. } = &mut state.arena else {
            panic!("not pong");
        };
        ball.pos = Vec2::new(792.0, 30.0);
        ball.vel = Vec2::new(120.0, 0.0);
        tick(&mut state, &input(1, TrackedSignal::default()), reference_dt());
        assert_eq!(state.board.rally, [1, 0]);
        assert_eq!(state.winner, Some(Side::Left));
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_jump_starts_immediately() {
        let mut state = GameState::new(ModeConfig::preset(GameMode::JumpAvoid), 3);
        tick(&mut state, &input(0, TrackedSignal::default()), reference_dt());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_jump_crash_resets_in_place() {
        let mut state = started(GameMode::JumpAvoid, None);
        state.board.award(7);
        let Arena::Jump { jumper, obstacle, .. } = &mut state.arena else {
            panic!("not jump");
        };
        *obstacle = Entity::new(
            0,
            jumper.pos - Vec2::new(10.0, 10.0),
            150.0,
            EntityShape::Rect { width: 80.0, height: 40.0 },
            Appearance::Stone,
        );

        tick(&mut state, &input(1, TrackedSignal::default()), reference_dt());
        assert!(state.drain_events().contains(&GameEvent::Crashed));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.board.score, 0);
        assert_eq!(state.high_score(), 7);
        assert_eq!(state.entities()[0].pos.y, 0.0, "obstacle respawned at the top");
    }

    #[test]
    fn test_jump_clear_scores() {
        let mut state = started(GameMode::JumpAvoid, None);
        let Arena::Jump { obstacle, .. } = &mut state.arena else {
            panic!("not jump");
        };
        *obstacle = Entity::new(
            0,
            Vec2::new(0.0, 479.0),
            150.0,
            EntityShape::Rect { width: 80.0, height: 40.0 },
            Appearance::Wood,
        );
        tick(&mut state, &input(1, TrackedSignal::default()), reference_dt());
        assert!(state.drain_events().contains(&GameEvent::ObstacleCleared));
        assert_eq!(state.board.score, 1);
    }

    #[test]
    fn test_head_rise_jumps_and_steers() {
        let mut state = started(GameMode::JumpAvoid, None);
        tick(&mut state, &input(1, TrackedSignal::with_head(Vec2::new(320.0, 300.0))), reference_dt());
        tick(&mut state, &input(2, TrackedSignal::with_head(Vec2::new(50.0, 200.0))), reference_dt());
        assert!(state.drain_events().contains(&GameEvent::Jumped));
        let Arena::Jump { jumper, .. } = &state.arena else {
            panic!("not jump");
        };
        assert!(jumper.airborne);
        assert!(jumper.pos.x < 320.0, "head in the left third steers left");
    }

    #[test]
    fn test_determinism() {
        let mut a = started(GameMode::BubbleRush, None);
        let mut b = started(GameMode::BubbleRush, None);
        for i in 1..600 {
            let x = 320.0 + 200.0 * ((i as f32) * 0.05).sin();
            let frame = input(i, TrackedSignal::with_pointer(x));
            tick(&mut a, &frame, reference_dt());
            tick(&mut b, &frame, reference_dt());
        }
        assert_eq!(a.board, b.board);
        assert_eq!(a.entities(), b.entities());
        assert_eq!(a.drain_events(), b.drain_events());
    }

    proptest! {
        /// Within one match, misses never decrease and the phase only leaves PLAYING for GAMEOVER
        #[test]
        fn prop_falling_match_invariants(
            seed in any::<u64>(),
            pointers in proptest::collection::vec(proptest::option::of(0.0f32..640.0), 1..400),
        ) {
            let mut state = GameState::new(ModeConfig::preset(GameMode::BubbleRush), seed);
            tick(&mut state, &key(0, KeyCommand::Start), reference_dt());
            let mut last_misses = 0;
            for (i, pointer) in pointers.into_iter().enumerate() {
                let signal = TrackedSignal { pointer_x: pointer, ..Default::default() };
                tick(&mut state, &input(i as u64 + 1, signal), reference_dt());
                prop_assert!(state.board.misses >= last_misses);
                last_misses = state.board.misses;
                if state.phase != GamePhase::Playing {
                    prop_assert_eq!(state.phase, GamePhase::GameOver);
                    break;
                }
            }
        }
    }
}
