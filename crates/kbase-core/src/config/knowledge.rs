//! Knowledge base intake configuration.

use serde::{Deserialize, Serialize};

/// Rules applied to new sources and the initial session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// File extensions accepted for `file` sources (without the dot).
    #[serde(default = "default_accepted_extensions")]
    pub accepted_extensions: Vec<String>,
    /// Whether a fresh session starts with the demo folders and sources.
    #[serde(default = "default_true")]
    pub seed_demo_data: bool,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            accepted_extensions: default_accepted_extensions(),
            seed_demo_data: true,
        }
    }
}

impl KnowledgeConfig {
    /// Check whether a file name carries one of the accepted extensions.
    pub fn accepts_file(&self, file_name: &str) -> bool {
        let Some((stem, ext)) = file_name.rsplit_once('.') else {
            return false;
        };
        !stem.is_empty()
            && self
                .accepted_extensions
                .iter()
                .any(|accepted| accepted.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }
}

fn default_accepted_extensions() -> Vec<String> {
    ["pdf", "docx", "txt", "md"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_true() -> bool {
    true
}
