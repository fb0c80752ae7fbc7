//! Embed snippets for the chat widget.
//!
//! The dashboard offers two snippets: a plain HTML `<script>` tag pair and
//! a React component. Both interpolate the configured widget appearance.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use kbase_core::error::AppError;
use kbase_entity::widget::WidgetConfig;

/// Script served by the widget CDN.
pub const WIDGET_SCRIPT_URL: &str = "https://cdn.supportai.com/widget.js";

/// Package providing the React component.
pub const REACT_PACKAGE: &str = "@supportai/react";

/// Which snippet flavour to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedTarget {
    /// `<script>` tags for any website.
    Html,
    /// A React component.
    React,
}

impl fmt::Display for EmbedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Html => write!(f, "html"),
            Self::React => write!(f, "react"),
        }
    }
}

impl FromStr for EmbedTarget {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "react" => Ok(Self::React),
            other => Err(AppError::validation(format!(
                "Unknown embed target '{other}', expected html or react"
            ))),
        }
    }
}

/// Renders the embed snippet for a validated widget configuration.
///
/// String values are emitted as JSON string literals so quotes in the
/// greeting cannot break out of the generated code.
pub fn render_snippet(config: &WidgetConfig, target: EmbedTarget) -> Result<String, AppError> {
    config.validate()?;

    let brand_color = serde_json::to_string(&config.brand_color)?;
    let greeting = serde_json::to_string(&config.greeting)?;
    let tone = serde_json::to_string(&config.tone)?;
    let position = serde_json::to_string(config.position.as_str())?;

    let snippet = match target {
        EmbedTarget::Html => format!(
            r#"<!-- SupportAI Chatbot -->
<script>
  window.supportAIConfig = {{
    brandColor: {brand_color},
    greeting: {greeting},
    tone: {tone},
    position: {position}
  }};
</script>
<script src="{WIDGET_SCRIPT_URL}" async></script>"#
        ),
        EmbedTarget::React => format!(
            r#"import {{ SupportAIWidget }} from '{REACT_PACKAGE}'

function App() {{
  return (
    <SupportAIWidget
      brandColor={{{brand_color}}}
      greeting={{{greeting}}}
      tone={{{tone}}}
      position={{{position}}}
    />
  )
}}"#
        ),
    };

    Ok(snippet)
}
