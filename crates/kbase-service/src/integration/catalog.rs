//! The integrations a session can connect, in display order.

use serde::{Deserialize, Serialize};
use tracing::info;

use kbase_core::error::AppError;
use kbase_core::types::IntegrationId;
use kbase_entity::integration::{Integration, IntegrationStatus};

/// Counters shown above the integration cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationStats {
    /// All integrations.
    pub total: usize,
    /// Integrations that are connected.
    pub connected: usize,
    /// Integrations with a connection in progress.
    pub syncing: usize,
    /// Connected integrations with auto-learn on.
    pub auto_learn: usize,
}

/// Owns the integrations of a session.
///
/// Connecting is two-phase: [`IntegrationCatalog::begin_connect`] moves a
/// disconnected or failed integration to `Syncing`, and
/// [`IntegrationCatalog::finish_connect`] later moves it to `Connected`.
/// Only the integration named in the request changes.
#[derive(Debug, Clone, Default)]
pub struct IntegrationCatalog {
    items: Vec<Integration>,
}

impl IntegrationCatalog {
    /// Builds a catalog from existing integrations, keeping their order.
    pub fn from_items(items: impl IntoIterator<Item = Integration>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    /// Starts connecting an integration.
    pub fn begin_connect(&mut self, id: &IntegrationId) -> Result<Integration, AppError> {
        let item = self.get_mut(id)?;
        if !item.status.can_connect() {
            return Err(AppError::conflict(format!(
                "Integration '{}' is {} and cannot be connected",
                item.name, item.status
            )));
        }
        item.status = IntegrationStatus::Syncing;

        info!(integration_id = %id, "Integration connecting");

        Ok(item.clone())
    }

    /// Completes a pending connection.
    ///
    /// Returns `None` when the integration is gone or no longer syncing.
    pub fn finish_connect(&mut self, id: &IntegrationId) -> Option<Integration> {
        let item = self.items.iter_mut().find(|item| &item.id == id)?;
        if item.status != IntegrationStatus::Syncing {
            return None;
        }
        item.status = IntegrationStatus::Connected;

        info!(integration_id = %id, "Integration connected");

        Some(item.clone())
    }

    /// Switches auto-learn on or off. Only connected integrations expose
    /// the switch.
    pub fn set_auto_learn(
        &mut self,
        id: &IntegrationId,
        enabled: bool,
    ) -> Result<Integration, AppError> {
        let item = self.get_mut(id)?;
        if item.status != IntegrationStatus::Connected {
            return Err(AppError::conflict(format!(
                "Auto-learn can only be changed on a connected integration, '{}' is {}",
                item.name, item.status
            )));
        }
        item.auto_learn = enabled;

        info!(integration_id = %id, enabled, "Auto-learn changed");

        Ok(item.clone())
    }

    /// Looks up an integration.
    pub fn get(&self, id: &IntegrationId) -> Option<&Integration> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Resolves an integration by id or by case-insensitive name.
    pub fn find(&self, reference: &str) -> Result<IntegrationId, AppError> {
        let reference = reference.trim();
        self.items
            .iter()
            .find(|item| item.id.as_str() == reference)
            .or_else(|| {
                self.items
                    .iter()
                    .find(|item| item.name.eq_ignore_ascii_case(reference))
            })
            .map(|item| item.id.clone())
            .ok_or_else(|| AppError::not_found(format!("Integration '{reference}' not found")))
    }

    /// Iterates in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Integration> {
        self.items.iter()
    }

    /// All integrations in display order.
    pub fn to_vec(&self) -> Vec<Integration> {
        self.items.clone()
    }

    /// Number of integrations.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Integration counters.
    pub fn stats(&self) -> IntegrationStats {
        let count = |status: IntegrationStatus| {
            self.items.iter().filter(|i| i.status == status).count()
        };
        IntegrationStats {
            total: self.items.len(),
            connected: count(IntegrationStatus::Connected),
            syncing: count(IntegrationStatus::Syncing),
            auto_learn: self.items.iter().filter(|i| i.is_learning()).count(),
        }
    }

    fn get_mut(&mut self, id: &IntegrationId) -> Result<&mut Integration, AppError> {
        self.items
            .iter_mut()
            .find(|item| &item.id == id)
            .ok_or_else(|| AppError::not_found(format!("Integration '{id}' not found")))
    }
}
