use crate::presentation::config::{Environment, LoggingSettings};

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub level: String,
    pub json_format: bool,
}

impl TracingConfig {
    pub fn from_settings(environment: Environment, logging: &LoggingSettings) -> Self {
        Self {
            environment: environment.to_string(),
            level: logging.level.clone(),
            json_format: logging.json_format,
        }
    }

    pub fn default_directives(&self) -> String {
        format!("{},atapro=debug,tower_http=debug", self.level)
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".to_string()),
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: std::env::var("LOG_FORMAT")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
        }
    }
}
