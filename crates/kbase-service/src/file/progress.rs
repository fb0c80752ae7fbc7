//! Progress stepping for simulated source processing.

use serde::{Deserialize, Serialize};

use kbase_entity::file::SyncStatus;

/// Progress value at which a source counts as synced.
pub const COMPLETE: u32 = 100;

/// Result of applying one tick to a syncing source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tick {
    /// Stored progress after the tick (may exceed 100 on the last tick).
    pub progress: u32,
    /// Status after the tick.
    pub status: SyncStatus,
}

impl Tick {
    /// Whether this tick finished processing.
    pub fn completed(&self) -> bool {
        self.status == SyncStatus::Synced
    }
}

/// Fixed-step progress counter.
///
/// Starts at 0 and adds `step` per tick. The tick on which the value first
/// reaches [`COMPLETE`] flips the status to `Synced`; the stored value is
/// not clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncProgress {
    value: u32,
    step: u32,
}

impl SyncProgress {
    /// Start a counter at 0.
    pub fn new(step: u32) -> Self {
        Self::resume(0, step)
    }

    /// Continue a counter from a stored value.
    pub fn resume(value: u32, step: u32) -> Self {
        Self { value, step }
    }

    /// Current stored value.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Advance by one step.
    pub fn tick(&mut self) -> Tick {
        self.value = self.value.saturating_add(self.step);
        let status = if self.value >= COMPLETE {
            SyncStatus::Synced
        } else {
            SyncStatus::Syncing
        };
        Tick {
            progress: self.value,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticks_until_synced(step: u32) -> (u32, u32) {
        let mut progress = SyncProgress::new(step);
        let mut ticks = 0;
        loop {
            ticks += 1;
            let tick = progress.tick();
            if tick.completed() {
                return (ticks, tick.progress);
            }
        }
    }

    #[test]
    fn test_every_step_terminates_on_time() {
        for step in 1..=100u32 {
            let (ticks, last) = ticks_until_synced(step);
            assert_eq!(ticks, 100u32.div_ceil(step), "step {step}");
            assert!(last >= COMPLETE);
            assert!(last < COMPLETE + step);
        }
    }

    #[test]
    fn test_never_synced_early() {
        let mut progress = SyncProgress::new(15);
        for _ in 0..6 {
            assert_eq!(progress.tick().status, SyncStatus::Syncing);
        }
        let last = progress.tick();
        assert!(last.completed());
        assert_eq!(last.progress, 105);
    }

    #[test]
    fn test_even_step_lands_on_100() {
        assert_eq!(ticks_until_synced(10), (10, 100));
    }

    #[test]
    fn test_resume_from_seed_value() {
        let mut progress = SyncProgress::resume(65, 10);
        assert_eq!(progress.tick().progress, 75);
        assert_eq!(progress.value(), 75);
    }
}
