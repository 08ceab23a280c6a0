//! The runner session controller.
//!
//! `RunnerSession` owns everything one play-through needs: player counters,
//! the obstacle store, the frame loop, the spawn timer, the RNG and the id
//! counter. The loop and the timer are always started and stopped together.

use super::lane::LaneIntent;
use super::logic::{step_field, steer, TickOutcome};
use super::phase::{PhaseEvent, SessionPhase};
use super::scheduler::{FrameScheduler, FrameTicket};
use super::scoring::{LevelTracker, ScoreChange};
use super::spawner::{spawn_obstacle, SpawnTimer};
use super::types::{Obstacle, ObstacleIds, ObstacleStore, PlayerState};
use crate::backend::{EquippedAssets, RewardBackend};
use crate::core::constants::MAX_FRAME_ELAPSED_MS;
use crate::error::SettlementError;
use crate::loading::AssetGateOutcome;
use crate::reward::{RewardPolicy, RewardRecord, Settlement};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

/// What one frame did.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// The ticket was stale or the session is not running. Nothing changed.
    Skipped,
    Ran { change: ScoreChange, spawned: u32 },
    GameOver { obstacle: Obstacle },
}

/// Result of a reward claim that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimOutcome {
    Settled(RewardRecord),
    AlreadyClaimed,
    /// The session has not ended, so there is nothing to claim.
    NotFinished,
}

pub struct RunnerSession {
    session_id: Uuid,
    policy: RewardPolicy,
    phase: SessionPhase,
    player: PlayerState,
    store: ObstacleStore,
    ids: ObstacleIds,
    tracker: LevelTracker,
    frames: FrameScheduler,
    spawn_timer: SpawnTimer,
    rng: StdRng,
    assets: EquippedAssets,
    started_at: Option<DateTime<Utc>>,
    settlement: Option<Settlement>,
    last_claim_error: Option<String>,
    ticks: u64,
    runs: u32,
}

impl RunnerSession {
    pub fn new(policy: RewardPolicy) -> Self {
        Self::with_parts(policy, ObstacleIds::default(), StdRng::from_entropy())
    }

    pub fn with_seed(policy: RewardPolicy, seed: u64) -> Self {
        Self::with_parts(policy, ObstacleIds::default(), StdRng::seed_from_u64(seed))
    }

    /// Build a session around an injected id counter and RNG.
    pub fn with_parts(policy: RewardPolicy, ids: ObstacleIds, rng: StdRng) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            policy,
            phase: SessionPhase::Loading,
            player: PlayerState::new(),
            store: ObstacleStore::new(),
            ids,
            tracker: LevelTracker::new(),
            frames: FrameScheduler::new(),
            spawn_timer: SpawnTimer::new(),
            rng,
            assets: EquippedAssets::default(),
            started_at: None,
            settlement: None,
            last_claim_error: None,
            ticks: 0,
            runs: 0,
        }
    }

    // -- accessors --

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn obstacles(&self) -> &ObstacleStore {
        &self.store
    }

    pub fn assets(&self) -> &EquippedAssets {
        &self.assets
    }

    pub fn policy(&self) -> &RewardPolicy {
        &self.policy
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Ticks run since the current play-through started.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn last_claim_error(&self) -> Option<&str> {
        self.last_claim_error.as_deref()
    }

    pub fn is_loop_active(&self) -> bool {
        self.frames.is_active()
    }

    pub fn is_spawn_timer_armed(&self) -> bool {
        self.spawn_timer.is_armed()
    }

    fn transition(&mut self, event: PhaseEvent) -> bool {
        match self.phase.apply(event) {
            Some(next) => {
                log::debug!("session {}: {} -> {}", self.session_id, self.phase, next);
                self.phase = next;
                true
            }
            None => false,
        }
    }

    // -- lifecycle --

    /// Leave `Loading` once the cosmetics fetch has settled either way.
    pub fn assets_ready(&mut self, outcome: AssetGateOutcome, now: DateTime<Utc>) -> bool {
        if self.phase != SessionPhase::Loading {
            return false;
        }
        match outcome {
            AssetGateOutcome::Ready(assets) => {
                log::info!("equipped assets loaded ({} slots)", assets.slots.len());
                self.assets = assets;
            }
            AssetGateOutcome::Degraded(e) => {
                log::warn!("equipped assets unavailable, continuing without: {}", e);
            }
        }
        self.transition(PhaseEvent::AssetsReady);
        self.begin_run(now);
        log::info!("session {} started", self.session_id);
        true
    }

    /// Open the settings overlay. Freezes the loop and the timer.
    pub fn open_settings(&mut self) -> bool {
        if !self.transition(PhaseEvent::OpenSettings) {
            return false;
        }
        self.frames.cancel();
        self.spawn_timer.suspend();
        true
    }

    pub fn close_settings(&mut self) -> bool {
        if !self.transition(PhaseEvent::CloseSettings) {
            return false;
        }
        self.frames.start();
        self.spawn_timer.resume();
        true
    }

    pub fn toggle_settings(&mut self) -> bool {
        match self.phase {
            SessionPhase::Running => self.open_settings(),
            SessionPhase::Paused => self.close_settings(),
            _ => false,
        }
    }

    /// Start a fresh play-through from `Paused` or `GameOver`.
    ///
    /// Refused while a claim is half written: the remaining steps belong to
    /// this run's record and must be retried first.
    pub fn restart(&mut self, now: DateTime<Utc>) -> bool {
        if self.settlement.as_ref().is_some_and(Settlement::is_partial) {
            log::warn!(
                "session {}: restart refused, reward claim is incomplete",
                self.session_id
            );
            return false;
        }
        if !self.transition(PhaseEvent::Restart) {
            return false;
        }
        self.begin_run(now);
        log::info!("session {} restarted (run {})", self.session_id, self.runs);
        true
    }

    /// Stop everything. The session ignores all further calls.
    pub fn teardown(&mut self) {
        if !self.transition(PhaseEvent::Teardown) {
            return;
        }
        self.stop_loop();
        self.store.clear();
        log::info!("session {} closed", self.session_id);
    }

    fn begin_run(&mut self, now: DateTime<Utc>) {
        self.stop_loop();
        self.player = PlayerState::new();
        self.store.clear();
        self.tracker = LevelTracker::new();
        self.settlement = None;
        self.last_claim_error = None;
        self.started_at = Some(now);
        self.ticks = 0;
        self.runs += 1;
        self.frames.start();
        self.spawn_timer.arm();
    }

    fn stop_loop(&mut self) {
        self.frames.cancel();
        self.spawn_timer.disarm();
    }

    fn game_over(&mut self, obstacle: &Obstacle) {
        self.transition(PhaseEvent::Collision);
        self.stop_loop();
        self.store.clear();
        log::info!(
            "session {} game over: hit obstacle {} in lane {} (score {}, level {})",
            self.session_id,
            obstacle.id,
            obstacle.lane.index(),
            self.player.score,
            self.player.level
        );
    }

    // -- input --

    /// Shift one lane. Only while running.
    pub fn move_lane(&mut self, intent: LaneIntent) -> bool {
        if !self.phase.is_running() {
            return false;
        }
        steer(&mut self.player, intent)
    }

    // -- frame loop --

    /// Arm the next frame. `None` if not running or a frame is already armed.
    pub fn request_frame(&mut self) -> Option<FrameTicket> {
        if !self.phase.is_running() {
            return None;
        }
        self.frames.request()
    }

    /// Run the frame `ticket` was issued for: one field tick, then the spawn
    /// timer catches up on `elapsed_ms`.
    pub fn run_frame(&mut self, ticket: FrameTicket, elapsed_ms: u64) -> FrameOutcome {
        if !self.phase.is_running() || !self.frames.accept(ticket) {
            return FrameOutcome::Skipped;
        }

        self.ticks += 1;
        let outcome = step_field(
            &mut self.player,
            &mut self.store,
            &mut self.tracker,
            ticket.frame(),
            self.policy.coins_per_level,
        );

        match outcome {
            TickOutcome::Collided { obstacle } => {
                self.game_over(&obstacle);
                FrameOutcome::GameOver { obstacle }
            }
            TickOutcome::Advanced { change } => {
                let spawned = self.advance_spawn_timer(elapsed_ms);
                FrameOutcome::Ran { change, spawned }
            }
        }
    }

    /// Feed elapsed time to the spawn timer and spawn once per completed
    /// period. New obstacles are stamped with the current frame so that
    /// frame's tick never evaluates them.
    pub fn advance_spawn_timer(&mut self, elapsed_ms: u64) -> u32 {
        if !self.phase.is_running() {
            return 0;
        }
        let frame = self.frames.current_frame();
        let mut elapsed = elapsed_ms.min(MAX_FRAME_ELAPSED_MS);
        let mut spawned = 0;
        while self.spawn_timer.advance(elapsed, self.player.spawn_interval_ms()) {
            spawn_obstacle(&mut self.store, &mut self.ids, &mut self.rng, frame);
            spawned += 1;
            elapsed = 0;
        }
        spawned
    }

    /// Request and immediately run one frame.
    pub fn pump(&mut self, elapsed_ms: u64) -> FrameOutcome {
        match self.request_frame() {
            Some(ticket) => self.run_frame(ticket, elapsed_ms),
            None => FrameOutcome::Skipped,
        }
    }

    // -- reward --

    /// Settle the reward for a finished session, at most once.
    ///
    /// On failure the claim stays open and the error is kept for display;
    /// steps that already succeeded are not repeated on retry.
    pub fn claim_reward(
        &mut self,
        backend: &dyn RewardBackend,
        now: DateTime<Utc>,
    ) -> Result<ClaimOutcome, SettlementError> {
        match self.phase {
            SessionPhase::GameOver {
                reward_claimed: true,
            } => return Ok(ClaimOutcome::AlreadyClaimed),
            SessionPhase::GameOver {
                reward_claimed: false,
            } => {}
            _ => return Ok(ClaimOutcome::NotFinished),
        }

        let started_at = self.started_at.unwrap_or(now);
        let coins = self.player.coins_accrued;
        let policy = &self.policy;
        let settlement = self
            .settlement
            .get_or_insert_with(|| Settlement::new(RewardRecord::build(policy, started_at, now, coins)));

        if let Err(e) = settlement.run(backend, policy) {
            self.last_claim_error = Some(e.to_string());
            return Err(e);
        }

        let record = settlement.record().clone();
        self.last_claim_error = None;
        self.transition(PhaseEvent::RewardSettled);
        log::info!(
            "session {} reward settled: {} coins, {} xp, {} min",
            self.session_id,
            record.coins_earned,
            record.xp_earned,
            record.time_spent_minutes
        );
        Ok(ClaimOutcome::Settled(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::core::constants::*;
    use crate::runner::lane::Lane;

    fn running_session() -> RunnerSession {
        let mut session = RunnerSession::with_seed(RewardPolicy::default(), 11);
        session.assets_ready(AssetGateOutcome::Ready(EquippedAssets::default()), Utc::now());
        session
    }

    #[test]
    fn test_new_session_is_loading_and_idle() {
        let mut session = RunnerSession::with_seed(RewardPolicy::default(), 1);
        assert_eq!(session.phase(), SessionPhase::Loading);
        assert!(session.request_frame().is_none());
        assert!(!session.move_lane(LaneIntent::Left));
    }

    #[test]
    fn test_degraded_assets_still_start() {
        let mut session = RunnerSession::with_seed(RewardPolicy::default(), 1);
        let outcome = AssetGateOutcome::Degraded(crate::error::BackendError::MissingCredentials);

        assert!(session.assets_ready(outcome, Utc::now()));
        assert_eq!(session.phase(), SessionPhase::Running);
        assert!(session.is_loop_active());
        assert!(session.is_spawn_timer_armed());
    }

    #[test]
    fn test_fresh_session_defaults() {
        let session = running_session();
        let player = session.player();
        assert_eq!(player.lane, Lane::CENTER);
        assert_eq!(player.score, 0);
        assert_eq!(player.level, START_LEVEL);
        assert!((player.speed - BASE_SPEED).abs() < f64::EPSILON);
        assert!(session.obstacles().is_empty());
    }

    #[test]
    fn test_spawn_after_first_interval() {
        let mut session = running_session();
        let mut spawned = 0;
        for _ in 0..20 {
            if let FrameOutcome::Ran { spawned: n, .. } = session.pump(100) {
                spawned += n;
            }
        }
        // 2000ms at level 1 (interval 1950) -> one obstacle
        assert_eq!(spawned, 1);
        assert_eq!(session.obstacles().len(), 1);
    }

    #[test]
    fn test_paused_session_does_not_move() {
        let mut session = running_session();
        for _ in 0..20 {
            session.pump(100);
        }
        let before: Vec<f64> = session.obstacles().iter().map(|o| o.depth).collect();

        assert!(session.open_settings());
        for _ in 0..50 {
            assert_eq!(session.pump(100), FrameOutcome::Skipped);
        }
        assert!(!session.move_lane(LaneIntent::Left));

        let after: Vec<f64> = session.obstacles().iter().map(|o| o.depth).collect();
        assert_eq!(before, after);

        assert!(session.close_settings());
        assert!(matches!(session.pump(16), FrameOutcome::Ran { .. }));
    }

    #[test]
    fn test_ticket_from_before_pause_is_stale() {
        let mut session = running_session();
        let ticket = session.request_frame().unwrap();
        session.open_settings();
        session.close_settings();

        assert_eq!(session.run_frame(ticket, 16), FrameOutcome::Skipped);
        assert_eq!(session.ticks(), 0);
    }

    #[test]
    fn test_teardown_makes_everything_noop() {
        let mut session = running_session();
        let ticket = session.request_frame().unwrap();

        session.teardown();

        assert_eq!(session.phase(), SessionPhase::Closed);
        assert_eq!(session.run_frame(ticket, 16), FrameOutcome::Skipped);
        assert!(session.request_frame().is_none());
        assert_eq!(session.advance_spawn_timer(10_000), 0);
        assert!(!session.restart(Utc::now()));
        assert!(!session.is_loop_active());
    }

    #[test]
    fn test_claim_before_game_over_is_not_finished() {
        let mut session = running_session();
        let backend = MemoryBackend::new();

        let outcome = session.claim_reward(&backend, Utc::now()).unwrap();

        assert_eq!(outcome, ClaimOutcome::NotFinished);
        assert_eq!(backend.calls(), 0);
    }
}
