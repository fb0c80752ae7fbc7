//! Chat widget appearance model.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use kbase_core::AppError;
use kbase_core::config::StudioConfig;

/// Screen corner the chat widget docks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetPosition {
    /// Bottom-right corner.
    BottomRight,
    /// Bottom-left corner.
    BottomLeft,
}

impl WidgetPosition {
    /// Return the position as used in embed snippets.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BottomRight => "bottom-right",
            Self::BottomLeft => "bottom-left",
        }
    }
}

impl fmt::Display for WidgetPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WidgetPosition {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bottom-right" => Ok(Self::BottomRight),
            "bottom-left" => Ok(Self::BottomLeft),
            other => Err(AppError::validation(format!(
                "Unknown widget position '{other}'"
            ))),
        }
    }
}

/// Appearance and behavior of the embeddable chat widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Brand color as `#rrggbb`.
    pub brand_color: String,
    /// First message shown by the widget.
    pub greeting: String,
    /// Conversational tone label.
    pub tone: String,
    /// Screen corner the widget docks to.
    pub position: WidgetPosition,
}

impl WidgetConfig {
    /// Build a widget configuration from the configured studio defaults.
    pub fn from_studio(studio: &StudioConfig) -> Result<Self, AppError> {
        let config = Self {
            brand_color: studio.brand_color.clone(),
            greeting: studio.greeting.clone(),
            tone: studio.tone.clone(),
            position: studio.position.parse()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the brand color is a `#rrggbb` hex value and the greeting
    /// is not blank.
    pub fn validate(&self) -> Result<(), AppError> {
        let hex = self.brand_color.strip_prefix('#').unwrap_or("");
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AppError::validation(format!(
                "Brand color '{}' must be a #rrggbb hex value",
                self.brand_color
            )));
        }
        if self.greeting.trim().is_empty() {
            return Err(AppError::validation("Greeting cannot be empty"));
        }
        Ok(())
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            brand_color: "#6366f1".to_string(),
            greeting: "Hi there! How can I help you today?".to_string(),
            tone: "friendly".to_string(),
            position: WidgetPosition::BottomRight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_studio_defaults() {
        let config = WidgetConfig::from_studio(&StudioConfig::default()).unwrap();
        assert_eq!(config, WidgetConfig::default());
    }

    #[test]
    fn test_rejects_bad_color() {
        let mut config = WidgetConfig::default();
        config.brand_color = "indigo".to_string();
        assert!(config.validate().is_err());
        config.brand_color = "#12345g".to_string();
        assert!(config.validate().is_err());
        config.brand_color = "#A1b2C3".to_string();
        assert!(config.validate().is_ok());
    }
}
