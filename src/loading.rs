//! Cosmetics fetch that gates the start of a session.
//!
//! The fetch runs on a background thread so the frame loop keeps drawing the
//! loading screen; the loop polls [`AssetGate::poll`] once per frame.

use crate::backend::{CosmeticsSource, EquippedAssets};
use crate::error::BackendError;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

#[derive(Debug)]
pub enum AssetGateOutcome {
    Ready(EquippedAssets),
    /// The fetch failed; play continues without cosmetics.
    Degraded(BackendError),
}

impl AssetGateOutcome {
    pub fn is_degraded(&self) -> bool {
        matches!(self, AssetGateOutcome::Degraded(_))
    }
}

/// Fetch cosmetics, holding a successful result for `grace` before
/// reporting so the models can settle. Failures report immediately.
pub fn resolve(source: &dyn CosmeticsSource, grace: Duration) -> AssetGateOutcome {
    match source.fetch_equipped() {
        Ok(assets) => {
            if !grace.is_zero() {
                std::thread::sleep(grace);
            }
            AssetGateOutcome::Ready(assets)
        }
        Err(e) => AssetGateOutcome::Degraded(e),
    }
}

pub struct AssetGate {
    handle: Option<JoinHandle<AssetGateOutcome>>,
}

impl AssetGate {
    pub fn spawn(source: Arc<dyn CosmeticsSource>, grace: Duration) -> Self {
        let handle = std::thread::spawn(move || resolve(source.as_ref(), grace));
        Self {
            handle: Some(handle),
        }
    }

    /// Outcome once the fetch has finished. Yields it exactly once.
    pub fn poll(&mut self) -> Option<AssetGateOutcome> {
        if !self.handle.as_ref().is_some_and(|h| h.is_finished()) {
            return None;
        }
        let handle = self.handle.take()?;
        Some(match handle.join() {
            Ok(outcome) => outcome,
            Err(_) => AssetGateOutcome::Degraded(BackendError::Unavailable(
                "asset loader".to_string(),
            )),
        })
    }

    pub fn is_pending(&self) -> bool {
        self.handle.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use std::time::Instant;

    fn wait(gate: &mut AssetGate) -> AssetGateOutcome {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(outcome) = gate.poll() {
                return outcome;
            }
            assert!(Instant::now() < deadline, "asset gate never finished");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_success_is_ready() {
        let backend = Arc::new(MemoryBackend::new());
        let mut gate = AssetGate::spawn(backend, Duration::ZERO);

        let outcome = wait(&mut gate);

        assert!(!outcome.is_degraded());
        assert!(!gate.is_pending());
        assert!(gate.poll().is_none());
    }

    #[test]
    fn test_failure_degrades() {
        let backend = MemoryBackend::new();
        backend.fail_cosmetics(true);
        let mut gate = AssetGate::spawn(Arc::new(backend), Duration::ZERO);

        assert!(wait(&mut gate).is_degraded());
    }

    #[test]
    fn test_grace_applies_only_on_success() {
        let failing = MemoryBackend::new();
        failing.fail_cosmetics(true);
        let started = Instant::now();
        assert!(resolve(&failing, Duration::from_millis(300)).is_degraded());
        assert!(started.elapsed() < Duration::from_millis(300));

        let ok = MemoryBackend::new();
        let started = Instant::now();
        assert!(!resolve(&ok, Duration::from_millis(30)).is_degraded());
        assert!(started.elapsed() >= Duration::from_millis(30));
    }
}
