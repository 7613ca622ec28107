use std::time::Duration;

use config::{Config, File, FileFormat};

use atapro::domain::MinutesVariant;
use atapro::infrastructure::llm::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
use atapro::presentation::config::{ConfigurationError, Environment, Settings};

fn settings_from_toml(toml: &str) -> Settings {
    Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap()
}

#[test]
fn given_minimal_file_when_loading_then_defaults_fill_the_rest() {
    let settings = settings_from_toml(
        r#"
        [gemini]
        api_key = "k"
        "#,
    );

    assert_eq!(settings.server.port, 3000);
    assert_eq!(settings.gemini.base_url, DEFAULT_GEMINI_BASE_URL);
    assert_eq!(settings.gemini.model, DEFAULT_GEMINI_MODEL);
    assert_eq!(settings.pipeline.default_variant, MinutesVariant::General);
    assert_eq!(settings.pipeline.max_upload_bytes(), 200 * 1024 * 1024);
    assert_eq!(settings.logging.level, "info");
    assert!(settings.access.users.is_empty());
}

#[test]
fn given_access_users_when_validating_then_registry_authenticates_them() {
    let settings = settings_from_toml(
        r#"
        [gemini]
        api_key = "k"

        [access.users]
        ana = "chave-ana"
        "#,
    );

    let registry = settings.validate().unwrap();

    assert_eq!(registry.authenticate("chave-ana"), Some("ana"));
}

#[test]
fn given_missing_api_key_when_validating_then_startup_is_refused() {
    let settings = settings_from_toml("[server]\nport = 8080\n");

    assert!(matches!(
        settings.validate(),
        Err(ConfigurationError::MissingCredential("gemini.api_key"))
    ));
}

#[test]
fn given_shared_access_keys_when_validating_then_startup_is_refused() {
    let settings = settings_from_toml(
        r#"
        [gemini]
        api_key = "k"

        [access.users]
        ana = "igual"
        rui = "igual"
        "#,
    );

    assert!(matches!(
        settings.validate(),
        Err(ConfigurationError::InvalidAccess(_))
    ));
}

#[test]
fn given_zero_timeout_when_building_poll_settings_then_wait_is_unbounded() {
    let settings = settings_from_toml(
        r#"
        [pipeline]
        poll_interval_secs = 5
        poll_timeout_secs = 0
        default_variant = "condominium"
        "#,
    );

    let poll = settings.pipeline.poll_settings();

    assert_eq!(poll.interval, Duration::from_secs(5));
    assert_eq!(poll.timeout, None);
    assert_eq!(
        settings.pipeline.default_variant,
        MinutesVariant::Condominium
    );
}

#[test]
fn given_api_key_when_debug_printing_then_it_is_redacted() {
    let settings = settings_from_toml("[gemini]\napi_key = \"super-secret\"\n");

    let printed = format!("{:?}", settings);

    assert!(!printed.contains("super-secret"));
    assert!(printed.contains("[REDACTED]"));
}

#[test]
fn given_environment_names_when_parsing_then_aliases_resolve() {
    assert_eq!(
        Environment::try_from("production".to_string()),
        Ok(Environment::Prod)
    );
    assert_eq!(Environment::Local.settings_file(), "appsettings.local");
    assert!(Environment::try_from("staging".to_string()).is_err());
}

#[test]
fn given_no_session_ttl_when_loading_then_sessions_idle_out_after_eight_hours() {
    let settings = settings_from_toml("[gemini]\napi_key = \"k\"\n");

    assert_eq!(
        settings.access.session_ttl(),
        Some(Duration::from_secs(8 * 60 * 60))
    );
}

#[test]
fn given_zero_session_ttl_when_loading_then_sessions_never_idle_out() {
    let settings = settings_from_toml(
        r#"
        [access]
        session_ttl_secs = 0
        "#,
    );

    assert_eq!(settings.access.session_ttl(), None);
}
