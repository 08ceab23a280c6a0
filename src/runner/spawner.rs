//! Spawner: a recurring timer plus the lane roll for new obstacles.

use super::lane::Lane;
use super::types::{Obstacle, ObstacleIds, ObstacleStore};
use crate::core::constants::SPAWN_DEPTH;
use rand::Rng;

/// Recurring spawn timer driven by elapsed milliseconds from the same loop.
#[derive(Debug, Clone, Default)]
pub struct SpawnTimer {
    armed: bool,
    elapsed_ms: u64,
}

impl SpawnTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Milliseconds accumulated toward the next firing.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Arm from zero.
    pub fn arm(&mut self) {
        self.armed = true;
        self.elapsed_ms = 0;
    }

    /// Stop firing but keep accumulated time for a later `resume`.
    pub fn suspend(&mut self) {
        self.armed = false;
    }

    pub fn resume(&mut self) {
        self.armed = true;
    }

    /// Disarm and forget accumulated time.
    pub fn disarm(&mut self) {
        self.armed = false;
        self.elapsed_ms = 0;
    }

    /// Accumulate `elapsed_ms`; returns true when one period has completed.
    /// Call repeatedly with zero elapsed to drain several periods, re-reading
    /// the period each time.
    pub fn advance(&mut self, elapsed_ms: u64, period_ms: u64) -> bool {
        if !self.armed {
            return false;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        if period_ms > 0 && self.elapsed_ms >= period_ms {
            self.elapsed_ms -= period_ms;
            return true;
        }
        false
    }
}

/// Create one obstacle at the far edge in a uniformly random lane.
pub fn spawn_obstacle<R: Rng + ?Sized>(
    store: &mut ObstacleStore,
    ids: &mut ObstacleIds,
    rng: &mut R,
    frame: u64,
) -> Obstacle {
    let lane = Lane::ALL[rng.gen_range(0..Lane::ALL.len())];
    let obstacle = Obstacle {
        id: ids.next_id(),
        lane,
        depth: SPAWN_DEPTH,
        born_frame: frame,
    };
    store.push(obstacle.clone());
    obstacle
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_spawn_places_obstacle_at_far_edge() {
        let mut store = ObstacleStore::new();
        let mut ids = ObstacleIds::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let obstacle = spawn_obstacle(&mut store, &mut ids, &mut rng, 3);

        assert_eq!(store.len(), 1);
        assert_eq!(obstacle.id, 0);
        assert_eq!(obstacle.born_frame, 3);
        assert!((obstacle.depth - SPAWN_DEPTH).abs() < f64::EPSILON);
    }

    #[test]
    fn test_spawn_ids_are_unique() {
        let mut store = ObstacleStore::new();
        let mut ids = ObstacleIds::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        for frame in 0..20 {
            spawn_obstacle(&mut store, &mut ids, &mut rng, frame);
        }

        let mut seen: Vec<u64> = store.iter().map(|o| o.id).collect();
        seen.dedup();
        assert_eq!(seen.len(), 20);
    }

    #[test]
    fn test_spawn_uses_every_lane() {
        let mut store = ObstacleStore::new();
        let mut ids = ObstacleIds::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for frame in 0..300 {
            spawn_obstacle(&mut store, &mut ids, &mut rng, frame);
        }

        for lane in Lane::ALL {
            let count = store.iter().filter(|o| o.lane == lane).count();
            assert!(count > 50, "lane {:?} only got {} spawns", lane, count);
        }
    }

    #[test]
    fn test_timer_fires_once_per_period() {
        let mut timer = SpawnTimer::new();
        timer.arm();

        assert!(!timer.advance(1000, 1950));
        assert!(timer.advance(1000, 1950));
        assert_eq!(timer.elapsed_ms(), 50);
    }

    #[test]
    fn test_timer_drains_multiple_periods() {
        let mut timer = SpawnTimer::new();
        timer.arm();

        let mut fired = 0;
        if timer.advance(900, 400) {
            fired += 1;
            while timer.advance(0, 400) {
                fired += 1;
            }
        }
        assert_eq!(fired, 2);
        assert_eq!(timer.elapsed_ms(), 100);
    }

    #[test]
    fn test_suspended_timer_keeps_progress() {
        let mut timer = SpawnTimer::new();
        timer.arm();
        timer.advance(1500, 1950);

        timer.suspend();
        assert!(!timer.advance(5000, 1950));
        assert_eq!(timer.elapsed_ms(), 1500);

        timer.resume();
        assert!(timer.advance(450, 1950));
    }

    #[test]
    fn test_disarmed_timer_never_fires() {
        let mut timer = SpawnTimer::new();
        timer.arm();
        timer.disarm();
        assert!(!timer.advance(10_000, 400));
        assert_eq!(timer.elapsed_ms(), 0);
    }
}
