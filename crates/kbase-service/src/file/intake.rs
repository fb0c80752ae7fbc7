//! Validation of raw source input before it enters the registry.

use serde::{Deserialize, Serialize};
use url::Url;

use kbase_core::config::KnowledgeConfig;
use kbase_core::error::{AppError, ErrorKind};
use kbase_entity::file::{NewSource, SourceKind};

/// Raw input from the "Add New Source" form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceInput {
    /// A picked document; only the file name is known.
    File {
        /// File name including extension.
        file_name: String,
    },
    /// A web page to crawl.
    Url {
        /// Absolute URL.
        url: String,
    },
    /// Pasted text.
    Text {
        /// Title shown as the source name.
        title: String,
        /// Text body.
        body: String,
    },
}

/// Turns [`SourceInput`] into a validated [`NewSource`].
#[derive(Debug, Clone, Default)]
pub struct SourceIntake {
    config: KnowledgeConfig,
}

impl SourceIntake {
    /// Creates an intake using the given acceptance rules.
    pub fn new(config: KnowledgeConfig) -> Self {
        Self { config }
    }

    /// Validates the input and derives the display name.
    ///
    /// - files must carry an accepted extension; the name is the file name
    /// - URLs must be absolute with a host; the name is the host
    /// - text needs a non-blank title and body; the name is the title
    pub fn prepare(&self, input: SourceInput) -> Result<NewSource, AppError> {
        match input {
            SourceInput::File { file_name } => {
                let file_name = file_name.trim();
                if file_name.is_empty() {
                    return Err(AppError::validation("File name cannot be empty"));
                }
                if !self.config.accepts_file(file_name) {
                    return Err(AppError::validation(format!(
                        "'{file_name}' is not a supported document, expected one of: {}",
                        self.config.accepted_extensions.join(", ")
                    )));
                }
                Ok(NewSource {
                    kind: SourceKind::File,
                    content: file_name.to_string(),
                    name: file_name.to_string(),
                })
            }
            SourceInput::Url { url } => {
                let raw = url.trim();
                let parsed = Url::parse(raw).map_err(|e| {
                    AppError::with_source(
                        ErrorKind::InvalidUrl,
                        format!("'{raw}' is not a valid absolute URL"),
                        e,
                    )
                })?;
                let host = parsed
                    .host_str()
                    .filter(|host| !host.is_empty())
                    .ok_or_else(|| AppError::invalid_url(format!("'{raw}' has no host")))?;
                Ok(NewSource {
                    kind: SourceKind::Url,
                    content: raw.to_string(),
                    name: host.to_string(),
                })
            }
            SourceInput::Text { title, body } => {
                let title = title.trim();
                if title.is_empty() {
                    return Err(AppError::validation("Text title cannot be empty"));
                }
                if body.trim().is_empty() {
                    return Err(AppError::validation("Text content cannot be empty"));
                }
                Ok(NewSource {
                    kind: SourceKind::Text,
                    content: body,
                    name: title.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intake() -> SourceIntake {
        SourceIntake::new(KnowledgeConfig::default())
    }

    #[test]
    fn test_url_name_is_host() {
        let source = intake()
            .prepare(SourceInput::Url {
                url: " https://docs.example.com:8443/api?x=1 ".into(),
            })
            .unwrap();
        assert_eq!(source.kind, SourceKind::Url);
        assert_eq!(source.name, "docs.example.com");
        assert_eq!(source.content, "https://docs.example.com:8443/api?x=1");
    }

    #[test]
    fn test_invalid_url_is_reported() {
        for bad in ["docs.example.com", "not a url", "mailto:help@example.com", ""] {
            let err = intake()
                .prepare(SourceInput::Url { url: bad.into() })
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidUrl, "input {bad:?}");
        }
    }

    #[test]
    fn test_file_extension_checked() {
        let ok = intake()
            .prepare(SourceInput::File {
                file_name: "Quick Start Tutorial.PDF".into(),
            })
            .unwrap();
        assert_eq!(ok.name, "Quick Start Tutorial.PDF");

        let err = intake()
            .prepare(SourceInput::File {
                file_name: "slides.pptx".into(),
            })
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_text_requires_title_and_body() {
        let err = intake()
            .prepare(SourceInput::Text {
                title: " ".into(),
                body: "content".into(),
            })
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = intake()
            .prepare(SourceInput::Text {
                title: "Pricing FAQ".into(),
                body: "\n".into(),
            })
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let ok = intake()
            .prepare(SourceInput::Text {
                title: "Pricing FAQ".into(),
                body: "Plans start at $10.".into(),
            })
            .unwrap();
        assert_eq!(ok.name, "Pricing FAQ");
    }

    #[test]
    fn test_input_deserializes_from_tagged_json() {
        let input: SourceInput =
            serde_json::from_str(r#"{"type":"url","url":"https://example.com"}"#).unwrap();
        assert_eq!(
            input,
            SourceInput::Url {
                url: "https://example.com".into()
            }
        );
    }
}
