//! Integration test: runner invariants under arbitrary play
//!
//! Property tests over random input sequences, frame timings and obstacle
//! layouts.

use chrono::Utc;
use lane_runner::backend::EquippedAssets;
use lane_runner::core::constants::*;
use lane_runner::loading::AssetGateOutcome;
use lane_runner::reward::RewardPolicy;
use lane_runner::runner::*;
use proptest::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
enum Action {
    Input(RunnerInput),
    Frame(u64),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => (0u64..=250).prop_map(Action::Frame),
        1 => Just(Action::Input(RunnerInput::MoveLeft)),
        1 => Just(Action::Input(RunnerInput::MoveRight)),
        1 => Just(Action::Input(RunnerInput::ToggleSettings)),
        1 => Just(Action::Input(RunnerInput::Restart)),
    ]
}

fn lane() -> impl Strategy<Value = Lane> {
    prop::sample::select(Lane::ALL.to_vec())
}

fn obstacle() -> impl Strategy<Value = Obstacle> {
    (lane(), -20.0f64..25.0, 0u64..3).prop_map(|(lane, depth, born_frame)| Obstacle {
        id: 0,
        lane,
        depth,
        born_frame,
    })
}

fn assert_player_consistent(player: &PlayerState) {
    assert!(player.lane.index() < LANE_COUNT);
    assert_eq!(player.level, START_LEVEL + player.score / LEVEL_MILESTONE);
    assert!((player.speed - Difficulty::speed_at_level(player.level)).abs() < 1e-9);
    assert!(player.speed <= SPEED_CAP);
    assert_eq!(
        player.spawn_interval_ms(),
        BASE_SPAWN_INTERVAL_MS
            .saturating_sub(SPAWN_INTERVAL_STEP_MS * player.level as u64)
            .max(MIN_SPAWN_INTERVAL_MS)
    );
}

proptest! {
    #[test]
    fn prop_session_invariants_hold(seed in any::<u64>(), actions in prop::collection::vec(action(), 1..400)) {
        let mut session = RunnerSession::with_seed(RewardPolicy::default(), seed);
        session.assets_ready(AssetGateOutcome::Ready(EquippedAssets::default()), Utc::now());

        let mut last_score = 0;
        let mut depths: HashMap<u64, f64> = HashMap::new();
        let mut game_overs = 0;

        for action in actions {
            match action {
                Action::Input(input) => {
                    if let InputEffect::Navigate(NavigationEvent::RestartRequested) =
                        process_input(&mut session, input)
                    {
                        last_score = 0;
                        depths.clear();
                        game_overs = 0;
                    }
                }
                Action::Frame(ms) => {
                    let was_running = session.phase().is_running();
                    let before = session.obstacles().len();
                    match session.pump(ms) {
                        FrameOutcome::Skipped => {
                            prop_assert!(!was_running);
                            prop_assert_eq!(session.obstacles().len(), before);
                        }
                        FrameOutcome::Ran { spawned, .. } => {
                            // A single frame never spawns more than its clamped time allows.
                            prop_assert!(u64::from(spawned) <= MAX_FRAME_ELAPSED_MS / MIN_SPAWN_INTERVAL_MS + 1);
                        }
                        FrameOutcome::GameOver { obstacle } => {
                            game_overs += 1;
                            prop_assert!(obstacle.in_collision_band());
                            prop_assert_eq!(obstacle.lane, session.player().lane);
                            prop_assert!(session.obstacles().is_empty());
                        }
                    }
                }
            }

            let player = session.player();
            assert_player_consistent(player);
            prop_assert!(player.score >= last_score);
            last_score = player.score;
            prop_assert!(game_overs <= 1);

            for o in session.obstacles().iter() {
                if let Some(previous) = depths.get(&o.id) {
                    prop_assert!(o.depth >= *previous);
                }
                prop_assert!(o.depth <= DESPAWN_DEPTH + SPEED_CAP);
                depths.insert(o.id, o.depth);
            }
        }
    }

    #[test]
    fn prop_score_drives_level_speed_and_coins(batches in prop::collection::vec(0u32..15, 1..60)) {
        let mut player = PlayerState::new();
        let mut tracker = LevelTracker::new();
        let mut total_level_ups = 0;

        for passed in batches {
            let before = player.speed;
            let change = credit_passes(&mut player, &mut tracker, passed, DEFAULT_COINS_PER_LEVEL);
            total_level_ups += change.level_ups;

            prop_assert_eq!(change.points, passed);
            prop_assert_eq!(change.coins, change.level_ups * DEFAULT_COINS_PER_LEVEL);
            prop_assert!(player.speed >= before);
            assert_player_consistent(&player);
        }

        prop_assert_eq!(total_level_ups, player.score / LEVEL_MILESTONE);
        prop_assert_eq!(player.coins_accrued, total_level_ups * DEFAULT_COINS_PER_LEVEL);
    }

    #[test]
    fn prop_collision_iff_same_lane_in_band(
        obstacles in prop::collection::vec(obstacle(), 0..12),
        player_lane in lane(),
        frame in 0u64..3,
    ) {
        let mut store = ObstacleStore::new();
        for (id, mut o) in obstacles.iter().cloned().enumerate() {
            o.id = id as u64;
            store.push(o);
        }

        let expected = obstacles
            .iter()
            .position(|o| o.born_frame != frame && o.lane == player_lane && o.in_collision_band());
        let hit = store.take_collision(player_lane, frame);

        prop_assert_eq!(hit.map(|o| o.id), expected.map(|i| i as u64));
        prop_assert_eq!(store.len(), obstacles.len() - expected.map_or(0, |_| 1));
    }

    #[test]
    fn prop_lane_moves_stay_in_range(moves in prop::collection::vec(any::<bool>(), 0..50)) {
        let mut player = PlayerState::new();
        for right in moves {
            let before = player.lane;
            let intent = if right { LaneIntent::Right } else { LaneIntent::Left };
            let changed = steer(&mut player, intent);

            prop_assert!(player.lane.index() < LANE_COUNT);
            prop_assert_eq!(changed, player.lane != before);
            let step = player.lane.index() as i64 - before.index() as i64;
            prop_assert!(step.abs() <= 1);
        }
    }
}
