//! Session state machine.
//!
//! Phases are a single tagged value, so combinations such as "paused while
//! game over" cannot be expressed. Every change goes through
//! [`SessionPhase::apply`], which returns `None` for an illegal transition.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting for the cosmetics fetch to settle.
    Loading,
    Running,
    /// Settings overlay open. Nothing on the field moves.
    Paused,
    /// Collision happened. `reward_claimed` only ever goes false -> true.
    GameOver { reward_claimed: bool },
    /// Torn down. Terminal for the session object.
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    AssetsReady,
    OpenSettings,
    CloseSettings,
    Restart,
    Collision,
    RewardSettled,
    Teardown,
}

impl SessionPhase {
    /// Next phase for `event`, or `None` if the event is not legal here.
    pub fn apply(self, event: PhaseEvent) -> Option<SessionPhase> {
        use PhaseEvent::*;
        use SessionPhase::*;

        match (self, event) {
            (Closed, _) => None,
            (_, Teardown) => Some(Closed),
            (Loading, AssetsReady) => Some(Running),
            (Running, OpenSettings) => Some(Paused),
            (Running, Collision) => Some(GameOver {
                reward_claimed: false,
            }),
            (Paused, CloseSettings) | (Paused, Restart) => Some(Running),
            (GameOver { .. }, Restart) => Some(Running),
            (GameOver {
                reward_claimed: false,
            }, RewardSettled) => Some(GameOver {
                reward_claimed: true,
            }),
            _ => None,
        }
    }

    pub fn is_running(self) -> bool {
        self == SessionPhase::Running
    }

    pub fn is_game_over(self) -> bool {
        matches!(self, SessionPhase::GameOver { .. })
    }

    pub fn reward_claimed(self) -> bool {
        matches!(
            self,
            SessionPhase::GameOver {
                reward_claimed: true
            }
        )
    }

    pub fn is_closed(self) -> bool {
        self == SessionPhase::Closed
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionPhase::Loading => "loading",
            SessionPhase::Running => "running",
            SessionPhase::Paused => "paused",
            SessionPhase::GameOver {
                reward_claimed: false,
            } => "game over",
            SessionPhase::GameOver {
                reward_claimed: true,
            } => "game over (claimed)",
            SessionPhase::Closed => "closed",
        };
        f.write_str(name)
    }
}
