mod environment;
mod loader;
mod settings;

pub use environment::Environment;
pub use loader::{ConfigurationError, ENV_PREFIX, ENV_SEPARATOR, load_settings};
pub use settings::{
    AccessSettings, GeminiSettings, LoggingSettings, PipelineSettings, ServerSettings, Settings,
};
