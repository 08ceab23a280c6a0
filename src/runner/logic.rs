//! Lane runner tick and input processing.
//!
//! Everything here is UI-agnostic: the terminal front end maps keys to
//! [`RunnerInput`] and drives frames through [`RunnerSession`].

use super::lane::LaneIntent;
use super::scoring::{credit_passes, LevelTracker, ScoreChange};
use super::session::RunnerSession;
use super::types::{Obstacle, ObstacleStore, PlayerState};

/// UI-agnostic input actions for the lane runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerInput {
    MoveLeft,       // Left arrow or 'a'
    MoveRight,      // Right arrow or 'd'
    ToggleSettings, // Esc or 's'
    Restart,        // 'r'
    ClaimReward,    // Enter or 'c'
    Quit,           // 'q'
    Other,
}

/// Signals the session sends to whoever hosts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationEvent {
    ReturnToMenu,
    RestartRequested,
}

/// What the host should do after an input was processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEffect {
    /// Nothing changed.
    Ignored,
    /// Session state changed; redraw.
    Changed,
    /// Player asked to claim; the host owns the backend and performs it.
    ClaimRequested,
    Navigate(NavigationEvent),
}

/// Result of one field tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Obstacles moved; `change` holds any safe passes credited this tick.
    Advanced { change: ScoreChange },
    /// The player was hit. Scoring is suppressed for this tick.
    Collided { obstacle: Obstacle },
}

/// One simulation tick: advance, check collision, then credit passes.
///
/// Obstacles born in `frame` are neither moved nor checked.
pub fn step_field(
    player: &mut PlayerState,
    store: &mut ObstacleStore,
    tracker: &mut LevelTracker,
    frame: u64,
    coins_per_level: u32,
) -> TickOutcome {
    store.advance(player.speed, frame);

    if let Some(obstacle) = store.take_collision(player.lane, frame) {
        return TickOutcome::Collided { obstacle };
    }

    let passed = store.remove_passed();
    let change = credit_passes(player, tracker, passed, coins_per_level);
    TickOutcome::Advanced { change }
}

/// Move the player one lane. Returns true if the lane changed.
pub fn steer(player: &mut PlayerState, intent: LaneIntent) -> bool {
    let target = player.lane.shifted(intent.delta());
    if target == player.lane {
        return false;
    }
    player.lane = target;
    true
}

/// Process player input against the session.
pub fn process_input(session: &mut RunnerSession, input: RunnerInput) -> InputEffect {
    if session.phase().is_closed() {
        return InputEffect::Ignored;
    }

    let changed = match input {
        RunnerInput::MoveLeft => session.move_lane(LaneIntent::Left),
        RunnerInput::MoveRight => session.move_lane(LaneIntent::Right),
        RunnerInput::ToggleSettings => session.toggle_settings(),
        RunnerInput::Restart => {
            if session.restart(chrono::Utc::now()) {
                return InputEffect::Navigate(NavigationEvent::RestartRequested);
            }
            false
        }
        RunnerInput::ClaimReward => {
            if session.phase().is_game_over() && !session.phase().reward_claimed() {
                return InputEffect::ClaimRequested;
            }
            false
        }
        RunnerInput::Quit => return InputEffect::Navigate(NavigationEvent::ReturnToMenu),
        RunnerInput::Other => false,
    };

    if changed {
        InputEffect::Changed
    } else {
        InputEffect::Ignored
    }
}
