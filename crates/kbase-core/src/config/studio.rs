//! Chat widget ("studio") defaults.

use serde::{Deserialize, Serialize};

/// Default appearance of the embeddable chat widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioConfig {
    /// Brand color as `#rrggbb`.
    #[serde(default = "default_brand_color")]
    pub brand_color: String,
    /// First message shown by the widget.
    #[serde(default = "default_greeting")]
    pub greeting: String,
    /// Conversational tone label.
    #[serde(default = "default_tone")]
    pub tone: String,
    /// Screen corner the widget docks to.
    #[serde(default = "default_position")]
    pub position: String,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            brand_color: default_brand_color(),
            greeting: default_greeting(),
            tone: default_tone(),
            position: default_position(),
        }
    }
}

fn default_brand_color() -> String {
    "#6366f1".to_string()
}

fn default_greeting() -> String {
    "Hi there! How can I help you today?".to_string()
}

fn default_tone() -> String {
    "friendly".to_string()
}

fn default_position() -> String {
    "bottom-right".to_string()
}
