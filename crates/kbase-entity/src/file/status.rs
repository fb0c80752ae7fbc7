//! Source kind and sync status enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use kbase_core::AppError;

/// Where a knowledge source came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// An uploaded document.
    File,
    /// A crawled web page.
    Url,
    /// Pasted text with a title.
    Text,
}

impl SourceKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Url => "url",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "url" => Ok(Self::Url),
            "text" => Ok(Self::Text),
            other => Err(AppError::validation(format!(
                "Unknown source kind '{other}', expected file, url, or text"
            ))),
        }
    }
}

/// Processing state of a knowledge source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    /// Indexed and available to the assistant.
    Synced,
    /// Being processed; progress is meaningful.
    Syncing,
    /// Processing failed. Display-only, nothing transitions into it.
    Error,
}

impl SyncStatus {
    /// Check if the status is final for the progress driver.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Synced | Self::Error)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Synced => "synced",
            Self::Syncing => "syncing",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str() {
        assert_eq!("URL".parse::<SourceKind>().unwrap(), SourceKind::Url);
        assert!("video".parse::<SourceKind>().is_err());
    }

    #[test]
    fn test_status_serde() {
        let json = serde_json::to_string(&SyncStatus::Syncing).unwrap();
        assert_eq!(json, "\"syncing\"");
        assert!(SyncStatus::Error.is_terminal());
        assert!(!SyncStatus::Syncing.is_terminal());
    }
}
