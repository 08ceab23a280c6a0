//! One-shot reward settlement.
//!
//! A claim makes three external writes. Each one is remembered once it
//! succeeds, so retrying after a partial failure resumes where it stopped
//! and never writes a second completion record.

use super::types::{RewardPolicy, RewardRecord};
use crate::backend::RewardBackend;
use crate::error::{SettlementError, SettlementStep};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    record: RewardRecord,
    completed: Vec<SettlementStep>,
}

impl Settlement {
    pub fn new(record: RewardRecord) -> Self {
        Self {
            record,
            completed: Vec::new(),
        }
    }

    pub fn record(&self) -> &RewardRecord {
        &self.record
    }

    pub fn is_done(&self, step: SettlementStep) -> bool {
        self.completed.contains(&step)
    }

    pub fn is_complete(&self) -> bool {
        SettlementStep::ORDER.iter().all(|s| self.is_done(*s))
    }

    /// Some writes landed but not all of them.
    pub fn is_partial(&self) -> bool {
        !self.completed.is_empty() && !self.is_complete()
    }

    /// Run every step not yet done, in order. Stops at the first failure.
    pub fn run(
        &mut self,
        backend: &dyn RewardBackend,
        policy: &RewardPolicy,
    ) -> Result<(), SettlementError> {
        for step in SettlementStep::ORDER {
            if self.is_done(step) {
                continue;
            }
            let result = match step {
                SettlementStep::TaskCompletion => backend.submit_task_completion(&self.record),
                SettlementStep::Battery => backend
                    .raise_battery(policy.battery_increment, policy.battery_cap)
                    .map(|level| log::debug!("battery now {}", level)),
                SettlementStep::ProgressLedger => {
                    backend.add_progress(self.record.coins_earned, self.record.xp_earned)
                }
            };

            match result {
                Ok(()) => {
                    log::info!("settlement step done: {}", step);
                    self.completed.push(step);
                }
                Err(source) => {
                    log::error!("settlement step failed: {}: {}", step, source);
                    return Err(SettlementError { step, source });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use chrono::Utc;

    fn settlement() -> Settlement {
        let now = Utc::now();
        Settlement::new(RewardRecord::build(&RewardPolicy::default(), now, now, 20))
    }

    #[test]
    fn test_runs_all_steps() {
        let backend = MemoryBackend::new();
        let mut s = settlement();

        s.run(&backend, &RewardPolicy::default()).unwrap();

        assert!(s.is_complete());
        assert!(!s.is_partial());
        assert_eq!(backend.completions().len(), 1);
        assert_eq!(backend.progress(), (20, 100));
        assert_eq!(backend.battery(), 10);
    }

    #[test]
    fn test_failure_resumes_without_duplicate_record() {
        let backend = MemoryBackend::new();
        backend.fail_next(SettlementStep::Battery);
        let mut s = settlement();

        let err = s.run(&backend, &RewardPolicy::default()).unwrap_err();
        assert_eq!(err.step, SettlementStep::Battery);
        assert!(s.is_done(SettlementStep::TaskCompletion));
        assert!(!s.is_complete());
        assert!(s.is_partial());

        s.run(&backend, &RewardPolicy::default()).unwrap();
        assert!(s.is_complete());
        assert!(!s.is_partial());
        assert_eq!(backend.completions().len(), 1);
    }

    #[test]
    fn test_nothing_written_is_not_partial() {
        let backend = MemoryBackend::new();
        backend.fail_next(SettlementStep::TaskCompletion);
        let mut s = settlement();

        assert!(s.run(&backend, &RewardPolicy::default()).is_err());
        assert!(!s.is_partial());
        assert!(backend.completions().is_empty());
    }
}
