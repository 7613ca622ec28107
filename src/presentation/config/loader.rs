use config::Environment as EnvironmentSource;
use config::{Config, File};

use crate::domain::AccessRegistryError;

use super::{Environment, Settings};

pub const ENV_PREFIX: &str = "APP";
pub const ENV_SEPARATOR: &str = "__";

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("invalid environment: {0}")]
    InvalidEnvironment(String),
    #[error("could not load settings: {0}")]
    Load(#[from] config::ConfigError),
    #[error("missing required setting: {0}")]
    MissingCredential(&'static str),
    #[error("invalid access keys: {0}")]
    InvalidAccess(#[from] AccessRegistryError),
}

/// `.env`, then `appsettings.<env>.toml`, then `APP__SECTION__KEY` variables.
pub fn load_settings(environment: Environment) -> Result<Settings, ConfigurationError> {
    dotenvy::dotenv().ok();

    let configuration = Config::builder()
        .add_source(File::with_name(&environment.settings_file()).required(false))
        .add_source(
            EnvironmentSource::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR),
        )
        .build()?;

    Ok(configuration.try_deserialize()?)
}
