//! Simulation runner: plays sessions headlessly with the autopilot.

use super::autopilot::Autopilot;
use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::backend::EquippedAssets;
use crate::loading::AssetGateOutcome;
use crate::reward::RewardPolicy;
use crate::runner::{process_input, FrameOutcome, RunnerSession};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Play one session to game over (or the tick limit).
pub fn play_session(config: &SimConfig, policy: &RewardPolicy, seed: u64) -> RunStats {
    let mut session = RunnerSession::with_seed(policy.clone(), seed);
    let mut pilot_rng = StdRng::seed_from_u64(seed.rotate_left(17) ^ 0x5eed);
    let pilot = Autopilot::new(config.look_ahead, config.reaction_error);

    session.assets_ready(AssetGateOutcome::Ready(EquippedAssets::default()), Utc::now());

    let mut spawned: u64 = 0;
    let mut timed_out = true;
    while session.ticks() < config.max_ticks_per_run {
        if let Some(input) = pilot.decide(session.obstacles(), session.player().lane, &mut pilot_rng)
        {
            process_input(&mut session, input);
        }

        match session.pump(config.frame_ms) {
            FrameOutcome::Ran { spawned: n, .. } => spawned += n as u64,
            FrameOutcome::GameOver { .. } => {
                timed_out = false;
                break;
            }
            FrameOutcome::Skipped => break,
        }
    }

    let player = session.player();
    let stats = RunStats {
        seed,
        score: player.score,
        level: player.level,
        final_speed: player.speed,
        coins: player.coins_accrued,
        ticks: session.ticks(),
        obstacles_spawned: spawned,
        timed_out,
    };
    session.teardown();
    stats
}

/// Run `config.num_runs` sessions and aggregate them.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let policy = RewardPolicy::default();
    let base_seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());

    let runs: Vec<RunStats> = (0..config.num_runs)
        .map(|i| {
            let stats = play_session(config, &policy, base_seed.wrapping_add(i as u64));
            if config.verbosity >= 2 {
                log::info!(
                    "run {}: score {} level {} ticks {}",
                    i,
                    stats.score,
                    stats.level,
                    stats.ticks
                );
            }
            stats
        })
        .collect();

    SimReport::from_runs(runs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> SimConfig {
        SimConfig {
            num_runs: 5,
            seed: Some(42),
            max_ticks_per_run: 20_000,
            ..Default::default()
        }
    }

    #[test]
    fn test_same_seed_same_result() {
        let config = small_config();
        let policy = RewardPolicy::default();

        let a = play_session(&config, &policy, 7);
        let b = play_session(&config, &policy, 7);

        assert_eq!(a.score, b.score);
        assert_eq!(a.ticks, b.ticks);
        assert_eq!(a.obstacles_spawned, b.obstacles_spawned);
    }

    #[test]
    fn test_passive_player_eventually_crashes() {
        let config = SimConfig {
            reaction_error: 1.0,
            ..small_config()
        };
        let stats = play_session(&config, &RewardPolicy::default(), 3);

        assert!(!stats.timed_out);
        assert!(stats.obstacles_spawned >= 1);
    }

    #[test]
    fn test_tick_limit_is_respected() {
        let config = SimConfig {
            max_ticks_per_run: 50,
            ..small_config()
        };
        let stats = play_session(&config, &RewardPolicy::default(), 1);

        assert!(stats.ticks <= 50);
        assert!(stats.timed_out);
    }

    #[test]
    fn test_run_simulation_counts_runs() {
        let report = run_simulation(&small_config());
        assert_eq!(report.num_runs, 5);
        assert_eq!(report.run_stats.len(), 5);
    }

    #[test]
    fn test_coins_follow_levels() {
        let config = SimConfig {
            reaction_error: 0.0,
            ..small_config()
        };
        let stats = play_session(&config, &RewardPolicy::default(), 11);
        assert_eq!(stats.coins, (stats.level - 1) * 10);
    }
}
