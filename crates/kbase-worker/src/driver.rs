//! Per-source timer tasks that simulate processing progress.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tokio::sync::{Mutex, broadcast};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use kbase_core::config::SyncProfile;
use kbase_core::error::AppError;
use kbase_core::events::{DomainEvent, KnowledgeEvent};
use kbase_core::traits::Service;
use kbase_core::types::FileId;
use kbase_service::KnowledgeStore;

/// Store shared between the session and its driver tasks
pub type SharedStore = Arc<Mutex<KnowledgeStore>>;

/// Why a driver or connect task stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverExit {
    /// The source reached 100% and is synced, or the integration connected
    Completed,
    /// The task was cancelled (replaced, source deleted, or shutdown)
    Cancelled,
    /// The target disappeared or left the syncing state
    Abandoned,
}

/// Registry entry for a running driver
#[derive(Debug)]
struct DriverHandle {
    /// Cancels this driver only
    token: CancellationToken,
    /// Distinguishes a replaced driver from its successor
    generation: u64,
}

/// Runs one cancellable progress task per source id.
///
/// Starting a driver for an id that already has one cancels the old task
/// first, so two timers never write the same source. Callers that mutate
/// the source before starting a driver (resync) must call [`ProgressDriver::start`]
/// while still holding the store lock; the old task re-checks its token
/// after acquiring the lock and backs off.
#[derive(Debug, Clone)]
pub struct ProgressDriver {
    /// Store the ticks are applied to
    store: SharedStore,
    /// Running drivers by source id
    tasks: Arc<DashMap<FileId, DriverHandle>>,
    /// Monotonic generation counter
    next_generation: Arc<AtomicU64>,
    /// Tracks spawned tasks for `wait_idle`
    tracker: TaskTracker,
    /// Parent of every driver token
    shutdown: CancellationToken,
    /// Event channel for completion notices
    events: broadcast::Sender<DomainEvent>,
    /// Serializes `wait_idle` callers around the tracker close/reopen
    idle: Arc<Mutex<()>>,
}

impl Service for ProgressDriver {}

impl ProgressDriver {
    /// Create a new driver over a shared store
    pub fn new(store: SharedStore, events: broadcast::Sender<DomainEvent>) -> Self {
        Self {
            store,
            tasks: Arc::new(DashMap::new()),
            next_generation: Arc::new(AtomicU64::new(0)),
            tracker: TaskTracker::new(),
            shutdown: CancellationToken::new(),
            events,
            idle: Arc::new(Mutex::new(())),
        }
    }

    /// Start (or restart) the driver for a source.
    ///
    /// A profile that could never finish is rejected before anything is
    /// spawned or replaced.
    pub fn start(
        &self,
        file_id: FileId,
        profile: SyncProfile,
    ) -> Result<JoinHandle<DriverExit>, AppError> {
        profile.validate("profile")?;

        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let token = self.shutdown.child_token();

        let previous = self.tasks.insert(
            file_id.clone(),
            DriverHandle {
                token: token.clone(),
                generation,
            },
        );
        if let Some(previous) = previous {
            previous.token.cancel();
            tracing::debug!(
                "Replaced driver for source {} (generation {} -> {})",
                file_id,
                previous.generation,
                generation
            );
        }

        tracing::debug!(
            "Starting driver for source {}: every {}ms, +{} ({} ticks)",
            file_id,
            profile.interval_ms,
            profile.step,
            profile.ticks_to_complete()
        );

        let store = Arc::clone(&self.store);
        let tasks = Arc::clone(&self.tasks);
        let events = self.events.clone();

        Ok(self.tracker.spawn(async move {
            let exit = run_driver(&store, &file_id, profile, &token, &events).await;

            tasks.remove_if(&file_id, |_, handle| handle.generation == generation);

            match exit {
                DriverExit::Completed => tracing::info!("Source {} synced", file_id),
                DriverExit::Cancelled => {
                    tracing::debug!("Driver for source {} cancelled", file_id)
                }
                DriverExit::Abandoned => {
                    tracing::warn!("Driver for source {} stopped: source no longer syncing", file_id)
                }
            }

            exit
        }))
    }

    /// Cancel the driver for a source. Returns `true` if one was running
    pub fn cancel(&self, file_id: &FileId) -> bool {
        match self.tasks.remove(file_id) {
            Some((_, handle)) => {
                handle.token.cancel();
                true
            }
            None => false,
        }
    }

    /// Cancel every running driver; new drivers may still be started
    pub fn cancel_all(&self) -> usize {
        let ids: Vec<FileId> = self.tasks.iter().map(|entry| entry.key().clone()).collect();
        ids.iter().filter(|id| self.cancel(id)).count()
    }

    /// Cancel every driver and refuse new ones
    pub fn shutdown(&self) {
        let cancelled = self.cancel_all();
        self.shutdown.cancel();
        tracing::info!("Progress driver shut down ({} drivers cancelled)", cancelled);
    }

    /// Whether a driver is running for the source
    pub fn is_running(&self, file_id: &FileId) -> bool {
        self.tasks.contains_key(file_id)
    }

    /// Number of running drivers
    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }

    /// Wait until every spawned driver task has finished.
    ///
    /// Concurrent callers wait one after another so a reopen from one
    /// cannot leave another waiting on an open tracker.
    pub async fn wait_idle(&self) {
        let _idle = self.idle.lock().await;
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }
}

/// Tick loop of a single driver
async fn run_driver(
    store: &SharedStore,
    file_id: &FileId,
    profile: SyncProfile,
    token: &CancellationToken,
    events: &broadcast::Sender<DomainEvent>,
) -> DriverExit {
    let period = profile.interval();
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => return DriverExit::Cancelled,
            _ = interval.tick() => {
                let tick = {
                    let mut store = store.lock().await;
                    // A replacement may have been started while we waited
                    if token.is_cancelled() {
                        return DriverExit::Cancelled;
                    }
                    store.apply_tick(file_id, profile.step)
                };

                match tick {
                    None => return DriverExit::Abandoned,
                    Some(tick) if tick.completed() => {
                        let _ = events.send(DomainEvent::new(KnowledgeEvent::SourceSynced {
                            file_id: file_id.clone(),
                        }));
                        return DriverExit::Completed;
                    }
                    Some(_) => {}
                }
            }
        }
    }
}
