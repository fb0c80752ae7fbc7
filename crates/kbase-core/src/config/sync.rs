//! Simulated sync driver configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Tick interval and progress step for one kind of simulated sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncProfile {
    /// Milliseconds between two progress ticks.
    pub interval_ms: u64,
    /// Progress added on every tick (percentage points).
    pub step: u32,
}

impl SyncProfile {
    /// Create a new profile.
    pub fn new(interval_ms: u64, step: u32) -> Self {
        Self { interval_ms, step }
    }

    /// The tick interval as a [`Duration`].
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Check that the profile ticks and can reach 100.
    ///
    /// `name` is the config section used in the error message.
    pub fn validate(&self, name: &str) -> Result<(), AppError> {
        if self.step == 0 || self.step > 100 {
            return Err(AppError::configuration(format!(
                "{name}.step must be between 1 and 100, got {}",
                self.step
            )));
        }
        if self.interval_ms == 0 {
            return Err(AppError::configuration(format!(
                "{name}.interval_ms must be positive"
            )));
        }
        Ok(())
    }

    /// Number of ticks needed to reach 100 from 0.
    pub fn ticks_to_complete(&self) -> u32 {
        if self.step == 0 {
            return u32::MAX;
        }
        100u32.div_ceil(self.step)
    }
}

/// Progress driver configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Profile used when a new source is added.
    #[serde(default = "default_upload")]
    pub upload: SyncProfile,
    /// Profile used when an existing source is resynced.
    #[serde(default = "default_resync")]
    pub resync: SyncProfile,
    /// Milliseconds an integration spends connecting before it is active.
    #[serde(default = "default_connect_delay_ms")]
    pub connect_delay_ms: u64,
    /// Capacity of the session event channel.
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

impl SyncConfig {
    /// Check both profiles and the channel capacity.
    pub fn validate(&self) -> Result<(), AppError> {
        self.upload.validate("sync.upload")?;
        self.resync.validate("sync.resync")?;
        if self.event_buffer == 0 {
            return Err(AppError::configuration("sync.event_buffer must be positive"));
        }
        Ok(())
    }

    /// The integration connect delay as a [`Duration`].
    pub fn connect_delay(&self) -> Duration {
        Duration::from_millis(self.connect_delay_ms)
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            upload: default_upload(),
            resync: default_resync(),
            connect_delay_ms: default_connect_delay_ms(),
            event_buffer: default_event_buffer(),
        }
    }
}

fn default_upload() -> SyncProfile {
    SyncProfile::new(300, 10)
}

fn default_resync() -> SyncProfile {
    SyncProfile::new(200, 15)
}

fn default_connect_delay_ms() -> u64 {
    2000
}

fn default_event_buffer() -> usize {
    256
}
