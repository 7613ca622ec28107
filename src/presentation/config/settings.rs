use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;

use crate::application::services::PollSettings;
use crate::domain::{AccessRegistry, MinutesVariant};
use crate::infrastructure::llm::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};

use super::ConfigurationError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub gemini: GeminiSettings,
    #[serde(default)]
    pub pipeline: PipelineSettings,
    #[serde(default)]
    pub access: AccessSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Settings {
    /// Checks everything that must hold before the service accepts requests.
    pub fn validate(&self) -> Result<AccessRegistry, ConfigurationError> {
        if self.gemini.api_key.trim().is_empty() {
            return Err(ConfigurationError::MissingCredential("gemini.api_key"));
        }
        Ok(AccessRegistry::from_users(&self.access.users)?)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Clone, Deserialize)]
pub struct GeminiSettings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
}

impl std::fmt::Debug for GeminiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiSettings")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_gemini_base_url(),
            model: default_gemini_model(),
        }
    }
}

fn default_gemini_base_url() -> String {
    DEFAULT_GEMINI_BASE_URL.to_string()
}

fn default_gemini_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    pub poll_interval_secs: u64,
    /// `0` disables the readiness timeout.
    pub poll_timeout_secs: u64,
    pub scratch_dir: Option<String>,
    pub default_variant: MinutesVariant,
    pub max_upload_mb: usize,
}

impl PipelineSettings {
    pub fn poll_settings(&self) -> PollSettings {
        PollSettings {
            interval: Duration::from_secs(self.poll_interval_secs.max(1)),
            timeout: (self.poll_timeout_secs > 0)
                .then(|| Duration::from_secs(self.poll_timeout_secs)),
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: 2,
            poll_timeout_secs: 600,
            scratch_dir: None,
            default_variant: MinutesVariant::General,
            max_upload_mb: 200,
        }
    }
}

#[derive(Clone, Deserialize)]
pub struct AccessSettings {
    /// Display name → access key.
    #[serde(default)]
    pub users: HashMap<String, String>,
    /// Idle time after which a session is dropped. `0` keeps sessions until logout.
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
}

impl AccessSettings {
    pub fn session_ttl(&self) -> Option<Duration> {
        (self.session_ttl_secs > 0).then(|| Duration::from_secs(self.session_ttl_secs))
    }
}

impl Default for AccessSettings {
    fn default() -> Self {
        Self {
            users: HashMap::new(),
            session_ttl_secs: default_session_ttl_secs(),
        }
    }
}

fn default_session_ttl_secs() -> u64 {
    8 * 60 * 60
}

impl std::fmt::Debug for AccessSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.users.keys().collect();
        names.sort();
        f.debug_struct("AccessSettings")
            .field("users", &names)
            .field("session_ttl_secs", &self.session_ttl_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub json_format: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}
