//! Entity spawning and lifecycle
//!
//! The spawner owns the live entity collection. Each tick it may create one
//! entity (interval elapsed and below the population cap), then advances every
//! entity along the fall axis. The collision resolver only marks entities;
//! [`Spawner::sweep`] removes them afterwards.

use glam::Vec2;
use rand::Rng;

use super::state::{Appearance, Entity, EntityShape};
use crate::tuning::Playfield;

/// What the spawner needs from the difficulty controller this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnParams {
    /// Seconds that must elapse between spawns
    pub interval: f32,
    /// Fall speed of new entities (px/s)
    pub speed: f32,
    /// Live entity cap (None = unbounded)
    pub max_population: Option<usize>,
    /// Horizontal clearance from each playfield edge
    pub margin: f32,
    pub appearance: Appearance,
}

/// Result of the spawn half of an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    Spawned(u32),
    /// Interval not yet elapsed
    Waiting,
    /// Population cap reached
    Capped,
    /// The entity cannot fit inside the playfield
    Degenerate,
}

#[derive(Debug, Clone)]
pub struct Spawner {
    /// Live entities, in spawn order
    pub entities: Vec<Entity>,
    pub last_spawn_time: f64,
    /// Entities created since the last reset
    pub spawned_total: u64,
    next_id: u32,
}

impl Spawner {
    pub fn new(now: f64) -> Self {
        Self {
            entities: Vec::new(),
            last_spawn_time: now,
            spawned_total: 0,
            next_id: 1,
        }
    }

    /// Drop every entity and restart the spawn timer
    pub fn reset(&mut self, now: f64) {
        self.entities.clear();
        self.last_spawn_time = now;
        self.spawned_total = 0;
    }

    pub fn live_count(&self) -> usize {
        self.entities.iter().filter(|e| e.alive).count()
    }

    /// Range the left edge of a new entity may be drawn from, if it fits
    pub fn spawn_range(playfield_width: f32, footprint: f32, margin: f32) -> Option<(f32, f32)> {
        let lo = margin;
        let hi = playfield_width - footprint - margin;
        (hi >= lo).then_some((lo, hi))
    }

    /// Spawn if due, then advance every entity by `dt`
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        now: f64,
        dt: f32,
        playfield: Playfield,
        shape: EntityShape,
        params: &SpawnParams,
        rng: &mut R,
    ) -> SpawnOutcome {
        let outcome = self.try_spawn(now, playfield, shape, params, rng);
        for entity in self.entities.iter_mut().filter(|e| e.alive) {
            entity.advance(dt);
        }
        outcome
    }

    fn try_spawn<R: Rng + ?Sized>(
        &mut self,
        now: f64,
        playfield: Playfield,
        shape: EntityShape,
        params: &SpawnParams,
        rng: &mut R,
    ) -> SpawnOutcome {
        if now - self.last_spawn_time <= f64::from(params.interval) {
            return SpawnOutcome::Waiting;
        }
        if params.max_population.is_some_and(|cap| self.live_count() >= cap) {
            return SpawnOutcome::Capped;
        }
        let Some((lo, hi)) = Self::spawn_range(playfield.width, shape.footprint(playfield.width), params.margin)
        else {
            return SpawnOutcome::Degenerate;
        };

        let left = if hi > lo { rng.random_range(lo..=hi) } else { lo };
        let id = self.next_id;
        self.next_id += 1;
        self.entities.push(Entity::new(
            id,
            Vec2::new(left + shape.anchor_offset(), 0.0),
            params.speed,
            shape,
            params.appearance,
        ));
        self.last_spawn_time = now;
        self.spawned_total += 1;
        log::trace!("spawned entity {} at x={:.1}", id, left);
        SpawnOutcome::Spawned(id)
    }

    /// Remove retired entities; also remove and return the live ones whose
    /// anchor passed `far_edge` without being resolved
    pub fn sweep(&mut self, far_edge: f32) -> Vec<Entity> {
        let mut escaped = Vec::new();
        self.entities.retain(|entity| {
            if !entity.alive {
                return false;
            }
            if entity.pos.y > far_edge {
                escaped.push(entity.clone());
                return false;
            }
            true
        });
        escaped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const RECT: EntityShape = EntityShape::Rect {
        width: 60.0,
        height: 80.0,
    };

    fn params() -> SpawnParams {
        SpawnParams {
            interval: 1.5,
            speed: 150.0,
            max_population: None,
            margin: 50.0,
            appearance: Appearance::Plain,
        }
    }

    #[test]
    fn test_spawns_after_interval_only() {
        let mut rng = Pcg32::seed_from_u64(1);
        let playfield = Playfield::new(640.0, 480.0);
        let mut spawner = Spawner::new(0.0);

        assert_eq!(spawner.update(1.5, 0.0, playfield, RECT, &params(), &mut rng), SpawnOutcome::Waiting);
        assert!(matches!(
            spawner.update(1.51, 0.0, playfield, RECT, &params(), &mut rng),
            SpawnOutcome::Spawned(1)
        ));
        assert_eq!(spawner.last_spawn_time, 1.51);
        assert_eq!(spawner.update(2.0, 0.0, playfield, RECT, &params(), &mut rng), SpawnOutcome::Waiting);
    }

    #[test]
    fn test_spawn_position_leaves_room() {
        let mut rng = Pcg32::seed_from_u64(2);
        let playfield = Playfield::new(640.0, 480.0);
        let mut spawner = Spawner::new(0.0);
        let mut now = 0.0;
        for _ in 0..200 {
            now += 2.0;
            spawner.update(now, 0.0, playfield, RECT, &params(), &mut rng);
        }
        assert_eq!(spawner.entities.len(), 200);
        for entity in &spawner.entities {
            assert!(entity.pos.x >= 50.0);
            assert!(entity.pos.x + 60.0 <= 640.0 - 50.0);
            assert_eq!(entity.pos.y, 0.0);
        }
    }

    #[test]
    fn test_circle_anchor_is_center() {
        let mut rng = Pcg32::seed_from_u64(3);
        let playfield = Playfield::new(640.0, 480.0);
        let shape = EntityShape::Circle { radius: 30.0 };
        let mut spawner = Spawner::new(0.0);
        let p = SpawnParams { margin: 0.0, ..params() };
        let mut now = 0.0;
        for _ in 0..100 {
            now += 2.0;
            spawner.update(now, 0.0, playfield, shape, &p, &mut rng);
        }
        for entity in &spawner.entities {
            assert!(entity.pos.x >= 30.0 && entity.pos.x <= 610.0);
        }
    }

    #[test]
    fn test_degenerate_geometry_skips() {
        let mut rng = Pcg32::seed_from_u64(4);
        let playfield = Playfield::new(150.0, 480.0);
        let mut spawner = Spawner::new(0.0);
        let outcome = spawner.update(10.0, 0.1, playfield, RECT, &params(), &mut rng);
        assert_eq!(outcome, SpawnOutcome::Degenerate);
        assert!(spawner.entities.is_empty());
        assert_eq!(spawner.last_spawn_time, 0.0, "timer untouched when skipping");
        assert_eq!(Spawner::spawn_range(160.0, 60.0, 50.0), Some((50.0, 50.0)));
    }

    #[test]
    fn test_population_cap() {
        let mut rng = Pcg32::seed_from_u64(5);
        let playfield = Playfield::new(640.0, 480.0);
        let mut spawner = Spawner::new(0.0);
        let p = SpawnParams {
            max_population: Some(2),
            ..params()
        };
        let mut now = 0.0;
        let mut outcomes = Vec::new();
        for _ in 0..3 {
            now += 2.0;
            outcomes.push(spawner.update(now, 0.0, playfield, RECT, &p, &mut rng));
        }
        assert!(matches!(outcomes[0], SpawnOutcome::Spawned(_)));
        assert!(matches!(outcomes[1], SpawnOutcome::Spawned(_)));
        assert_eq!(outcomes[2], SpawnOutcome::Capped);

        // Retiring one frees a slot
        spawner.entities[0].retire();
        spawner.sweep(480.0);
        now += 2.0;
        assert!(matches!(
            spawner.update(now, 0.0, playfield, RECT, &p, &mut rng),
            SpawnOutcome::Spawned(_)
        ));
    }

    #[test]
    fn test_sweep_separates_escaped() {
        let mut spawner = Spawner::new(0.0);
        spawner.entities.push(Entity::new(1, Vec2::new(10.0, 100.0), 1.0, RECT, Appearance::Plain));
        spawner.entities.push(Entity::new(2, Vec2::new(10.0, 481.0), 1.0, RECT, Appearance::Plain));
        let mut dead = Entity::new(3, Vec2::new(10.0, 500.0), 1.0, RECT, Appearance::Plain);
        dead.retire();
        spawner.entities.push(dead);

        let escaped = spawner.sweep(480.0);
        assert_eq!(escaped.len(), 1);
        assert_eq!(escaped[0].id, 2);
        assert_eq!(spawner.entities.len(), 1);
        assert_eq!(spawner.entities[0].id, 1);
    }

    proptest! {
        /// Without collisions, y after n ticks is y0 + n * v * dt
        #[test]
        fn prop_linear_motion(speed in 10.0f32..600.0, dt in 0.005f32..0.1, n in 1usize..200) {
            let mut spawner = Spawner::new(0.0);
            spawner.entities.push(Entity::new(1, Vec2::new(100.0, 0.0), speed, RECT, Appearance::Plain));
            let mut rng = Pcg32::seed_from_u64(9);
            let never = SpawnParams { interval: f32::INFINITY, ..params() };
            for _ in 0..n {
                spawner.update(0.0, dt, Playfield::new(640.0, 1.0e9), RECT, &never, &mut rng);
            }
            let expected = n as f32 * speed * dt;
            let y = spawner.entities[0].pos.y;
            prop_assert!((y - expected).abs() <= expected * 1e-4 + 1e-3, "y={} expected={}", y, expected);
        }
    }
}
