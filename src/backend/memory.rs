//! In-process backend for offline play and tests.

use super::{CosmeticsSource, EquippedAssets, RewardBackend};
use crate::error::{BackendError, SettlementStep};
use crate::reward::RewardRecord;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct MemoryState {
    assets: EquippedAssets,
    fail_cosmetics: bool,
    failures: Vec<SettlementStep>,
    completions: Vec<RewardRecord>,
    coins: u32,
    xp: u32,
    battery: u32,
    calls: usize,
}

/// Records every write. Failures can be injected per settlement step.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: Mutex<MemoryState>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assets(assets: EquippedAssets) -> Self {
        let backend = Self::new();
        backend.state().assets = assets;
        backend
    }

    pub fn with_battery(battery: u32) -> Self {
        let backend = Self::new();
        backend.state().battery = battery;
        backend
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Make the next call for `step` fail once.
    pub fn fail_next(&self, step: SettlementStep) {
        self.state().failures.push(step);
    }

    pub fn fail_cosmetics(&self, fail: bool) {
        self.state().fail_cosmetics = fail;
    }

    pub fn completions(&self) -> Vec<RewardRecord> {
        self.state().completions.clone()
    }

    /// Total (coins, xp) credited so far.
    pub fn progress(&self) -> (u32, u32) {
        let state = self.state();
        (state.coins, state.xp)
    }

    pub fn battery(&self) -> u32 {
        self.state().battery
    }

    /// Number of reward write attempts, failed ones included.
    pub fn calls(&self) -> usize {
        self.state().calls
    }

    fn attempt(&self, step: SettlementStep) -> Result<MutexGuard<'_, MemoryState>, BackendError> {
        let mut state = self.state();
        state.calls += 1;
        if let Some(index) = state.failures.iter().position(|s| *s == step) {
            state.failures.remove(index);
            return Err(BackendError::Unavailable(step.to_string()));
        }
        Ok(state)
    }
}

impl CosmeticsSource for MemoryBackend {
    fn fetch_equipped(&self) -> Result<EquippedAssets, BackendError> {
        let state = self.state();
        if state.fail_cosmetics {
            return Err(BackendError::Unavailable("equipped assets".to_string()));
        }
        Ok(state.assets.clone())
    }
}

impl RewardBackend for MemoryBackend {
    fn submit_task_completion(&self, record: &RewardRecord) -> Result<(), BackendError> {
        let mut state = self.attempt(SettlementStep::TaskCompletion)?;
        state.completions.push(record.clone());
        Ok(())
    }

    fn add_progress(&self, coins: u32, xp: u32) -> Result<(), BackendError> {
        let mut state = self.attempt(SettlementStep::ProgressLedger)?;
        state.coins = state.coins.saturating_add(coins);
        state.xp = state.xp.saturating_add(xp);
        Ok(())
    }

    fn raise_battery(&self, increment: u32, cap: u32) -> Result<u32, BackendError> {
        let mut state = self.attempt(SettlementStep::Battery)?;
        state.battery = state.battery.saturating_add(increment).min(cap);
        Ok(state.battery)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_battery_is_capped() {
        let backend = MemoryBackend::with_battery(95);
        assert_eq!(backend.raise_battery(10, 100).unwrap(), 100);
        assert_eq!(backend.battery(), 100);
    }

    #[test]
    fn test_injected_failure_fires_once() {
        let backend = MemoryBackend::new();
        backend.fail_next(SettlementStep::ProgressLedger);

        assert!(backend.add_progress(10, 100).is_err());
        assert!(backend.add_progress(10, 100).is_ok());
        assert_eq!(backend.progress(), (10, 100));
        assert_eq!(backend.calls(), 2);
    }

    #[test]
    fn test_cosmetics_failure_toggle() {
        let backend = MemoryBackend::new();
        backend.fail_cosmetics(true);
        assert!(backend.fetch_equipped().is_err());
        backend.fail_cosmetics(false);
        assert!(backend.fetch_equipped().unwrap().is_empty());
    }
}
