//! Score and level policy.
//!
//! Score rises by one for every obstacle that leaves the field without a
//! collision. Each multiple of `LEVEL_MILESTONE` crossed raises the level
//! once, bumps the speed and accrues the per-level coin reward.

use super::types::{Difficulty, PlayerState};
use crate::core::constants::LEVEL_MILESTONE;

/// Remembers which score milestones already produced a level-up, so that
/// observing the same score again never fires a second one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelTracker {
    milestones_rewarded: u32,
}

impl LevelTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of new milestones crossed since the last observation.
    pub fn observe(&mut self, score: u32) -> u32 {
        let reached = score / LEVEL_MILESTONE;
        if reached <= self.milestones_rewarded {
            return 0;
        }
        let crossed = reached - self.milestones_rewarded;
        self.milestones_rewarded = reached;
        crossed
    }

    pub fn milestones_rewarded(&self) -> u32 {
        self.milestones_rewarded
    }
}

/// What a batch of safe passes did to the player.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreChange {
    pub points: u32,
    pub level_ups: u32,
    pub coins: u32,
}

/// Credit `passed` obstacles to the score and apply any level-ups.
pub fn credit_passes(
    player: &mut PlayerState,
    tracker: &mut LevelTracker,
    passed: u32,
    coins_per_level: u32,
) -> ScoreChange {
    if passed == 0 {
        return ScoreChange::default();
    }

    player.score = player.score.saturating_add(passed);
    let level_ups = tracker.observe(player.score);
    let coins = level_ups.saturating_mul(coins_per_level);

    if level_ups > 0 {
        player.level += level_ups;
        player.speed = Difficulty::speed_after(player.levels_gained()).max(player.speed);
        player.coins_accrued = player.coins_accrued.saturating_add(coins);
        log::debug!(
            "level up -> {} (score {}, speed {:.2})",
            player.level,
            player.score,
            player.speed
        );
    }

    ScoreChange {
        points: passed,
        level_ups,
        coins,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_observation_fires_once() {
        let mut tracker = LevelTracker::new();
        let fired: u32 = [9, 10, 10, 10].iter().map(|&s| tracker.observe(s)).sum();
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_skipping_over_milestone_still_fires() {
        let mut tracker = LevelTracker::new();
        assert_eq!(tracker.observe(9), 0);
        assert_eq!(tracker.observe(11), 1);
        assert_eq!(tracker.observe(31), 2);
        assert_eq!(tracker.milestones_rewarded(), 3);
    }

    #[test]
    fn test_zero_score_never_levels() {
        let mut tracker = LevelTracker::new();
        assert_eq!(tracker.observe(0), 0);
    }

    #[test]
    fn test_credit_passes_levels_up_at_ten() {
        let mut player = PlayerState::new();
        let mut tracker = LevelTracker::new();
        player.score = 9;
        tracker.observe(9);

        let change = credit_passes(&mut player, &mut tracker, 1, 10);

        assert_eq!(change.level_ups, 1);
        assert_eq!(player.score, 10);
        assert_eq!(player.level, 2);
        assert!((player.speed - 0.25).abs() < 1e-9);
        assert_eq!(player.coins_accrued, 10);
    }

    #[test]
    fn test_credit_multiple_passes_in_one_batch() {
        let mut player = PlayerState::new();
        let mut tracker = LevelTracker::new();

        let change = credit_passes(&mut player, &mut tracker, 3, 10);

        assert_eq!(change.points, 3);
        assert_eq!(change.level_ups, 0);
        assert_eq!(player.score, 3);
        assert_eq!(player.level, 1);
    }

    #[test]
    fn test_credit_zero_is_noop() {
        let mut player = PlayerState::new();
        let mut tracker = LevelTracker::new();
        let before = player.clone();

        let change = credit_passes(&mut player, &mut tracker, 0, 10);

        assert_eq!(change, ScoreChange::default());
        assert_eq!(player, before);
    }

    #[test]
    fn test_two_level_ups_reach_speed_point_three() {
        let mut player = PlayerState::new();
        let mut tracker = LevelTracker::new();

        credit_passes(&mut player, &mut tracker, 10, 10);
        credit_passes(&mut player, &mut tracker, 10, 10);

        assert_eq!(player.level, 3);
        assert!((player.speed - 0.30).abs() < 1e-9);
        assert_eq!(player.coins_accrued, 20);
    }
}
