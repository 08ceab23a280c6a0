//! Scripted player for the simulator.

use crate::core::constants::{COLLISION_BAND_FAR, COLLISION_BAND_NEAR};
use crate::runner::{Lane, ObstacleStore, RunnerInput};
use rand::Rng;

/// Steers out of the player's lane when an obstacle is about to reach the
/// collision band, toward the adjacent lane with the most room.
#[derive(Debug, Clone)]
pub struct Autopilot {
    pub look_ahead: f64,
    pub reaction_error: f64,
}

impl Autopilot {
    pub fn new(look_ahead: f64, reaction_error: f64) -> Self {
        Self {
            look_ahead,
            reaction_error: reaction_error.clamp(0.0, 1.0),
        }
    }

    fn danger_window(&self) -> (f64, f64) {
        (COLLISION_BAND_NEAR - self.look_ahead, COLLISION_BAND_FAR)
    }

    /// Distance to the nearest obstacle in `lane` that can still hit, or
    /// `None` if the lane is clear.
    fn nearest_threat(&self, store: &ObstacleStore, lane: Lane) -> Option<f64> {
        store
            .iter()
            .filter(|o| o.lane == lane && o.depth <= COLLISION_BAND_FAR)
            .map(|o| COLLISION_BAND_NEAR - o.depth)
            .fold(None, |closest, d| match closest {
                Some(c) if c <= d => Some(c),
                _ => Some(d),
            })
    }

    fn in_danger(&self, store: &ObstacleStore, lane: Lane) -> bool {
        let (from, to) = self.danger_window();
        store
            .iter()
            .any(|o| o.lane == lane && o.depth >= from && o.depth <= to)
    }

    /// Pick an input for this frame, if any.
    pub fn decide<R: Rng + ?Sized>(
        &self,
        store: &ObstacleStore,
        lane: Lane,
        rng: &mut R,
    ) -> Option<RunnerInput> {
        if !self.in_danger(store, lane) {
            return None;
        }
        if rng.gen_bool(self.reaction_error.clamp(0.0, 1.0)) {
            return None;
        }

        let candidates = [
            (lane.shifted(-1), RunnerInput::MoveLeft),
            (lane.shifted(1), RunnerInput::MoveRight),
        ];

        candidates
            .into_iter()
            .filter(|(target, _)| *target != lane && !self.in_danger(store, *target))
            .max_by(|a, b| {
                let room = |l: Lane| self.nearest_threat(store, l).unwrap_or(f64::MAX);
                room(a.0).total_cmp(&room(b.0))
            })
            .map(|(_, input)| input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::Obstacle;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn store_with(obstacles: &[(Lane, f64)]) -> ObstacleStore {
        let mut store = ObstacleStore::new();
        for (id, (lane, depth)) in obstacles.iter().enumerate() {
            store.push(Obstacle {
                id: id as u64,
                lane: *lane,
                depth: *depth,
                born_frame: 0,
            });
        }
        store
    }

    #[test]
    fn test_no_threat_no_input() {
        let pilot = Autopilot::new(4.0, 0.0);
        let store = store_with(&[(Lane::LEFT, 8.0)]);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(pilot.decide(&store, Lane::CENTER, &mut rng), None);
    }

    #[test]
    fn test_dodges_to_clear_lane() {
        let pilot = Autopilot::new(4.0, 0.0);
        let store = store_with(&[(Lane::CENTER, 6.0), (Lane::LEFT, 7.0)]);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            pilot.decide(&store, Lane::CENTER, &mut rng),
            Some(RunnerInput::MoveRight)
        );
    }

    #[test]
    fn test_edge_lane_only_moves_inward() {
        let pilot = Autopilot::new(4.0, 0.0);
        let store = store_with(&[(Lane::LEFT, 6.0)]);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            pilot.decide(&store, Lane::LEFT, &mut rng),
            Some(RunnerInput::MoveRight)
        );
    }

    #[test]
    fn test_always_missing_never_moves() {
        let pilot = Autopilot::new(4.0, 1.0);
        let store = store_with(&[(Lane::CENTER, 6.0)]);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(pilot.decide(&store, Lane::CENTER, &mut rng), None);
    }

    #[test]
    fn test_prefers_lane_with_more_room() {
        let pilot = Autopilot::new(4.0, 0.0);
        let store = store_with(&[(Lane::CENTER, 6.0), (Lane::LEFT, 0.0), (Lane::RIGHT, -15.0)]);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            pilot.decide(&store, Lane::CENTER, &mut rng),
            Some(RunnerInput::MoveRight)
        );
    }
}
