//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field carries a serde default so that a missing
//! file yields a usable configuration.

pub mod knowledge;
pub mod logging;
pub mod studio;
pub mod sync;

use serde::{Deserialize, Serialize};

pub use self::knowledge::KnowledgeConfig;
pub use self::logging::LoggingConfig;
pub use self::studio::StudioConfig;
pub use self::sync::{SyncConfig, SyncProfile};

use crate::error::AppError;

/// Prefix for environment variable overrides (`KBASE__SYNC__UPLOAD__STEP=20`).
const ENV_PREFIX: &str = "KBASE";

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (base file + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Source intake and seeding settings.
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
    /// Simulated sync driver settings.
    #[serde(default)]
    pub sync: SyncConfig,
    /// Chat widget defaults.
    #[serde(default)]
    pub studio: StudioConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the base file at `path` with an environment-specific overlay
    /// (`config/{env}`) and environment variables prefixed with `KBASE__`.
    /// Both files are optional.
    pub fn load(path: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let parsed: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        parsed.validate()?;
        tracing::debug!("Configuration loaded from '{}' (env: {})", path, env);
        Ok(parsed)
    }

    /// Parse configuration from a TOML string without touching the filesystem.
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;
        let parsed: Self = config.try_deserialize()?;
        parsed.validate()?;
        Ok(parsed)
    }

    /// Reject values the progress driver and intake cannot work with.
    pub fn validate(&self) -> Result<(), AppError> {
        self.sync.validate()?;
        if self.knowledge.accepted_extensions.is_empty() {
            return Err(AppError::configuration(
                "knowledge.accepted_extensions must not be empty",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = AppConfig::from_toml("").expect("empty config is valid");
        assert_eq!(config.sync.upload, SyncProfile::new(300, 10));
        assert_eq!(config.sync.resync, SyncProfile::new(200, 15));
        assert_eq!(config.studio.brand_color, "#6366f1");
        assert!(config.knowledge.seed_demo_data);
    }

    #[test]
    fn test_overrides_section() {
        let config = AppConfig::from_toml(
            r#"
            [sync.upload]
            interval_ms = 50
            step = 25

            [knowledge]
            seed_demo_data = false
            "#,
        )
        .expect("valid config");
        assert_eq!(config.sync.upload, SyncProfile::new(50, 25));
        assert!(!config.knowledge.seed_demo_data);
    }

    #[test]
    fn test_rejects_zero_step() {
        let err = AppConfig::from_toml(
            r#"
            [sync.resync]
            interval_ms = 200
            step = 0
            "#,
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_rejects_zero_interval() {
        let err = AppConfig::from_toml(
            r#"
            [sync.upload]
            interval_ms = 0
            step = 10
            "#,
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
        assert!(err.message.contains("sync.upload.interval_ms"));
    }
}
