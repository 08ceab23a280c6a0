//! Lane runner data structures.
//!
//! Obstacles approach the player along a depth axis: they appear at
//! `SPAWN_DEPTH` in one of three lanes, move toward the player by the
//! current speed every tick, and leave the field past `DESPAWN_DEPTH`.

use super::lane::Lane;
use crate::core::constants::*;
use serde::{Deserialize, Serialize};

/// Difficulty curve derived from the current level.
pub struct Difficulty;

impl Difficulty {
    /// Per-tick obstacle speed after `levels_gained` level-ups.
    pub fn speed_after(levels_gained: u32) -> f64 {
        (BASE_SPEED + SPEED_STEP * levels_gained as f64).min(SPEED_CAP)
    }

    /// Per-tick obstacle speed at `level` (level 1 = no level-ups yet).
    pub fn speed_at_level(level: u32) -> f64 {
        Self::speed_after(level.saturating_sub(START_LEVEL))
    }

    /// Spawn timer period at `level`.
    pub fn spawn_interval_ms(level: u32) -> u64 {
        let shrink = SPAWN_INTERVAL_STEP_MS.saturating_mul(level as u64);
        BASE_SPAWN_INTERVAL_MS
            .saturating_sub(shrink)
            .max(MIN_SPAWN_INTERVAL_MS)
    }
}

/// A single obstacle on the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Unique within the session.
    pub id: u64,
    pub lane: Lane,
    /// Distance along the approach axis (negative = far away).
    pub depth: f64,
    /// Frame in which the spawner created this obstacle. The tick of the
    /// same frame leaves it untouched.
    pub born_frame: u64,
}

impl Obstacle {
    pub fn in_collision_band(&self) -> bool {
        (COLLISION_BAND_NEAR..=COLLISION_BAND_FAR).contains(&self.depth)
    }

    pub fn is_past_player(&self) -> bool {
        self.depth > DESPAWN_DEPTH
    }
}

/// Session-owned obstacle id source.
#[derive(Debug, Clone, Default)]
pub struct ObstacleIds {
    next: u64,
}

impl ObstacleIds {
    /// Start handing out ids from `first`.
    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Ordered collection of active obstacles (spawn order).
#[derive(Debug, Clone, Default)]
pub struct ObstacleStore {
    obstacles: Vec<Obstacle>,
}

impl ObstacleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    /// Move every obstacle not born in `frame` toward the player.
    pub fn advance(&mut self, speed: f64, frame: u64) {
        for obstacle in self.obstacles.iter_mut().filter(|o| o.born_frame != frame) {
            obstacle.depth += speed;
        }
    }

    /// Remove and return the first obstacle sitting in the collision band of `lane`.
    pub fn take_collision(&mut self, lane: Lane, frame: u64) -> Option<Obstacle> {
        let index = self
            .obstacles
            .iter()
            .position(|o| o.born_frame != frame && o.lane == lane && o.in_collision_band())?;
        Some(self.obstacles.remove(index))
    }

    /// Drop obstacles that have gone past the player. Returns how many left.
    pub fn remove_passed(&mut self) -> u32 {
        let before = self.obstacles.len();
        self.obstacles.retain(|o| !o.is_past_player());
        (before - self.obstacles.len()) as u32
    }
}

/// Player-side counters for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub lane: Lane,
    /// Obstacles passed safely. Never decreases within a session.
    pub score: u32,
    pub level: u32,
    /// Per-tick obstacle speed. Never decreases, capped at `SPEED_CAP`.
    pub speed: f64,
    /// Coins earned from level-ups, paid out at settlement.
    pub coins_accrued: u32,
}

impl PlayerState {
    pub fn new() -> Self {
        Self {
            lane: Lane::default(),
            score: 0,
            level: START_LEVEL,
            speed: BASE_SPEED,
            coins_accrued: 0,
        }
    }

    pub fn levels_gained(&self) -> u32 {
        self.level - START_LEVEL
    }

    /// Spawn period for the current level.
    pub fn spawn_interval_ms(&self) -> u64 {
        Difficulty::spawn_interval_ms(self.level)
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}
