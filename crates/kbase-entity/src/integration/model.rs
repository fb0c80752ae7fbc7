//! External integration model: a connectable third-party content source.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use kbase_core::AppError;
use kbase_core::types::IntegrationId;

/// Connection state of an integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationStatus {
    /// Active; auto-learn can be toggled.
    Connected,
    /// A connection attempt is in progress.
    Syncing,
    /// The last connection failed; can be reconnected.
    Failed,
    /// Never connected.
    Disconnected,
}

impl IntegrationStatus {
    /// Whether a connect request is accepted in this state.
    pub fn can_connect(&self) -> bool {
        matches!(self, Self::Disconnected | Self::Failed)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Syncing => "syncing",
            Self::Failed => "failed",
            Self::Disconnected => "disconnected",
        }
    }

    /// Badge label shown on the integration card.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Connected => "Connected",
            Self::Syncing => "Syncing",
            Self::Failed => "Failed",
            Self::Disconnected => "Not Connected",
        }
    }
}

impl fmt::Display for IntegrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IntegrationStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "connected" => Ok(Self::Connected),
            "syncing" => Ok(Self::Syncing),
            "failed" => Ok(Self::Failed),
            "disconnected" => Ok(Self::Disconnected),
            other => Err(AppError::validation(format!(
                "Unknown integration status '{other}'"
            ))),
        }
    }
}

/// A third-party tool the knowledge base can learn from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integration {
    /// Stable identifier (`zendesk`).
    pub id: IntegrationId,
    /// Display name.
    pub name: String,
    /// One-line description shown on the card.
    pub description: String,
    /// Connection state.
    pub status: IntegrationStatus,
    /// Whether new content is synced automatically.
    #[serde(rename = "autoLearn", alias = "auto_learn")]
    pub auto_learn: bool,
}

impl Integration {
    /// Whether auto-learn is both enabled and effective.
    pub fn is_learning(&self) -> bool {
        self.auto_learn && self.status == IntegrationStatus::Connected
    }
}
