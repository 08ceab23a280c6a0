//! Reward data: the tunable policy, the per-session record and its wire form.

use crate::core::constants::*;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Tunable reward amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardPolicy {
    pub task_type: String,
    pub xp_per_session: u32,
    pub coins_per_level: u32,
    pub battery_increment: u32,
    pub battery_cap: u32,
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self {
            task_type: DEFAULT_TASK_TYPE.to_string(),
            xp_per_session: DEFAULT_XP_PER_SESSION,
            coins_per_level: DEFAULT_COINS_PER_LEVEL,
            battery_increment: DEFAULT_BATTERY_INCREMENT,
            battery_cap: DEFAULT_BATTERY_CAP,
        }
    }
}

/// What one finished session is worth. Built once, written once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardRecord {
    pub time_spent_minutes: u32,
    pub coins_earned: u32,
    pub xp_earned: u32,
    pub task_type: String,
    pub completed_at: DateTime<Utc>,
}

impl RewardRecord {
    /// Build the record for a session that started at `started_at`.
    ///
    /// Time spent is whole minutes, rounded down. A clock that went
    /// backwards counts as zero.
    pub fn build(
        policy: &RewardPolicy,
        started_at: DateTime<Utc>,
        now: DateTime<Utc>,
        coins_earned: u32,
    ) -> Self {
        let elapsed_ms = (now - started_at).num_milliseconds().max(0);
        let minutes = (elapsed_ms / MS_PER_MINUTE).min(u32::MAX as i64) as u32;
        Self {
            time_spent_minutes: minutes,
            coins_earned,
            xp_earned: policy.xp_per_session,
            task_type: policy.task_type.clone(),
            completed_at: now,
        }
    }
}

/// JSON body of `POST /task-completion`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCompletion {
    pub user_id: String,
    pub task_type: String,
    pub time_spent: u32,
    pub coins_received: u32,
    pub xp_received: u32,
    /// ISO-8601 UTC timestamp.
    pub date_completed: String,
}

impl TaskCompletion {
    pub fn from_record(user_id: &str, record: &RewardRecord) -> Self {
        Self {
            user_id: user_id.to_string(),
            task_type: record.task_type.clone(),
            time_spent: record.time_spent_minutes,
            coins_received: record.coins_earned,
            xp_received: record.xp_earned,
            date_completed: record
                .completed_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
