//! Delayed completion of integration connections.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, broadcast};
use tokio::task::JoinHandle;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use kbase_core::events::{DomainEvent, KnowledgeEvent};
use kbase_core::traits::Service;
use kbase_core::types::IntegrationId;

use crate::driver::{DriverExit, SharedStore};

/// Finishes integration connections after a fixed delay.
///
/// Each connect spawns one sleeping task that, once the delay has elapsed,
/// marks only its own integration as connected. An integration that left
/// the `Syncing` state in the meantime is left alone.
#[derive(Debug, Clone)]
pub struct IntegrationConnector {
    /// Store the connections are completed in
    store: SharedStore,
    /// Tracks spawned tasks for `wait_idle`
    tracker: TaskTracker,
    /// Parent of every connect token
    shutdown: CancellationToken,
    /// Event channel for completion notices
    events: broadcast::Sender<DomainEvent>,
    /// Serializes `wait_idle` callers
    idle: Arc<Mutex<()>>,
}

impl Service for IntegrationConnector {}

impl IntegrationConnector {
    /// Create a connector over a shared store
    pub fn new(store: SharedStore, events: broadcast::Sender<DomainEvent>) -> Self {
        Self {
            store,
            tracker: TaskTracker::new(),
            shutdown: CancellationToken::new(),
            events,
            idle: Arc::new(Mutex::new(())),
        }
    }

    /// Complete the connection of `id` once `delay` has passed
    pub fn start(&self, id: IntegrationId, delay: Duration) -> JoinHandle<DriverExit> {
        let token = self.shutdown.child_token();
        let store = Arc::clone(&self.store);
        let events = self.events.clone();

        tracing::debug!("Connecting integration {} in {}ms", id, delay.as_millis());

        self.tracker.spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    tracing::debug!("Connection of integration {} cancelled", id);
                    return DriverExit::Cancelled;
                }
                _ = time::sleep(delay) => {}
            }

            let connected = {
                let mut store = store.lock().await;
                if token.is_cancelled() {
                    return DriverExit::Cancelled;
                }
                store.complete_connection(&id)
            };

            match connected {
                Some(_) => {
                    let _ = events.send(DomainEvent::new(KnowledgeEvent::IntegrationConnected {
                        integration_id: id.clone(),
                    }));
                    tracing::info!("Integration {} connected", id);
                    DriverExit::Completed
                }
                None => {
                    tracing::warn!("Integration {} no longer connecting", id);
                    DriverExit::Abandoned
                }
            }
        })
    }

    /// Number of connections still pending
    pub fn pending_count(&self) -> usize {
        self.tracker.len()
    }

    /// Cancel pending connections and refuse new ones
    pub fn shutdown(&self) {
        self.shutdown.cancel();
        tracing::info!("Integration connector shut down ({} pending)", self.tracker.len());
    }

    /// Wait until every pending connection has finished
    pub async fn wait_idle(&self) {
        let _idle = self.idle.lock().await;
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }
}
