//! External collaborators the runner talks to.
//!
//! The session only sees these traits. `HttpBackend` speaks to the REST API,
//! `MemoryBackend` keeps everything in process for offline play and tests.

pub mod http;
pub mod memory;

pub use http::HttpBackend;
pub use memory::MemoryBackend;

use crate::error::BackendError;
use crate::reward::RewardRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One equipped cosmetic. Presentation only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquippedAsset {
    #[serde(rename = "url")]
    pub model_ref: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// Slot name -> equipped cosmetic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquippedAssets {
    #[serde(rename = "equipped_assets", default)]
    pub slots: BTreeMap<String, EquippedAsset>,
}

impl EquippedAssets {
    pub fn get(&self, slot: &str) -> Option<&EquippedAsset> {
        self.slots.get(slot)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Source of the player's equipped cosmetics.
pub trait CosmeticsSource: Send + Sync {
    fn fetch_equipped(&self) -> Result<EquippedAssets, BackendError>;
}

/// Persistence the reward claim writes to.
pub trait RewardBackend {
    /// Write the one completion record for a session.
    fn submit_task_completion(&self, record: &RewardRecord) -> Result<(), BackendError>;

    /// Credit coins and xp to the player's ledger.
    fn add_progress(&self, coins: u32, xp: u32) -> Result<(), BackendError>;

    /// Raise the engagement battery by `increment`, never above `cap`.
    /// Returns the new level.
    fn raise_battery(&self, increment: u32, cap: u32) -> Result<u32, BackendError>;
}
