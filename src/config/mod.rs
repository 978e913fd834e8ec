use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::trigger::TriggerSettings;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub triggers: TriggerSettings,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// tracing-subscriber EnvFilter directive used when RUST_LOG is unset
    pub filter: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from a key lookup (the process environment outside of tests)
    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Settings file first so the individual variables below win over it
        if let Some(path) = lookup("TRIGGER_SETTINGS_FILE") {
            match load_settings_file(&path) {
                Ok(settings) => self.triggers = settings,
                Err(e) => {
                    // An unusable settings file must not leave every handler enabled
                    tracing::warn!("Disabling all handlers, trigger settings unusable: {}", e);
                    self.triggers.disable_all = true;
                }
            }
        }

        if let Some(v) = lookup("TRIGGER_DISABLE_ALL") {
            match parse_flag(&v) {
                Some(flag) => self.triggers.disable_all = flag,
                None => tracing::warn!(
                    "Ignoring TRIGGER_DISABLE_ALL={:?}, expected true/false, 1/0, yes/no or on/off",
                    v
                ),
            }
        }
        if let Some(v) = lookup("TRIGGER_DISABLED_HANDLERS") {
            self.triggers.disabled_handlers.extend(
                v.split(',')
                    .map(|s| s.trim())
                    .filter(|s| !s.is_empty())
                    .map(|s| s.to_string()),
            );
        }

        if let Some(v) = lookup("LOG_FILTER") {
            self.logging.filter = v;
        }

        self
    }

    /// Shared settings snapshot for building handler disable switches
    pub fn trigger_settings(&self) -> Arc<TriggerSettings> {
        Arc::new(self.triggers.clone())
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            triggers: TriggerSettings::default(),
            logging: LoggingConfig {
                filter: "trigger_dispatch=debug".to_string(),
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            triggers: TriggerSettings::default(),
            logging: LoggingConfig {
                filter: "trigger_dispatch=info".to_string(),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            triggers: TriggerSettings::default(),
            logging: LoggingConfig {
                filter: "warn".to_string(),
            },
        }
    }
}

/// Parse a boolean switch value, case-insensitive
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Load trigger settings from a YAML file
pub fn load_settings_file(path: impl AsRef<Path>) -> Result<TriggerSettings, ConfigError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    TriggerSettings::from_yaml(&source).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
