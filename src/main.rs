use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use atapro::application::ports::{SessionRepository, StagingStore};
use atapro::application::services::{MinutesPipeline, MinutesService, SessionService};
use atapro::infrastructure::llm::GeminiClient;
use atapro::infrastructure::observability::{TracingConfig, init_tracing};
use atapro::infrastructure::persistence::InMemorySessionRepository;
use atapro::infrastructure::rendering::DocumentRendererFactory;
use atapro::infrastructure::storage::LocalStagingStore;
use atapro::presentation::{AppState, Environment, create_router, load_settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = load_settings(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::from_settings(environment, &settings.logging));

    let registry = settings.validate().context("Invalid configuration")?;
    tracing::info!(users = registry.len(), model = %settings.gemini.model, "Configuration loaded");

    let client = Arc::new(GeminiClient::new(
        settings.gemini.api_key.clone(),
        Some(settings.gemini.base_url.clone()),
        Some(settings.gemini.model.clone()),
    ));

    let staging_store: Arc<dyn StagingStore> = match &settings.pipeline.scratch_dir {
        Some(dir) => Arc::new(
            LocalStagingStore::new(PathBuf::from(dir)).context("Failed to prepare scratch dir")?,
        ),
        None => Arc::new(LocalStagingStore::in_system_temp()),
    };

    let session_store = Arc::new(InMemorySessionRepository::with_idle_ttl(
        settings.access.session_ttl(),
    ));
    if let Some(ttl) = settings.access.session_ttl() {
        spawn_session_sweeper(Arc::clone(&session_store), ttl);
    }
    let session_repository: Arc<dyn SessionRepository> = session_store;
    let session_service = Arc::new(SessionService::new(registry, session_repository));

    let pipeline = MinutesPipeline::new(
        client,
        staging_store,
        settings.pipeline.poll_settings(),
    );
    let minutes_service = Arc::new(MinutesService::new(
        pipeline,
        Arc::clone(&session_service),
        DocumentRendererFactory::all(),
    ));

    let state = AppState {
        minutes_service,
        session_service,
        default_variant: settings.pipeline.default_variant,
        max_upload_bytes: settings.pipeline.max_upload_bytes(),
    };

    let router = create_router(state);

    let ip = settings
        .server
        .host
        .parse()
        .with_context(|| format!("Invalid server.host: {}", settings.server.host))?;
    let addr = SocketAddr::new(ip, settings.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn spawn_session_sweeper(store: Arc<InMemorySessionRepository>, ttl: Duration) {
    let period = (ttl / 4).clamp(Duration::from_secs(1), Duration::from_secs(300));
    tracing::info!(ttl_secs = ttl.as_secs(), "Session sweeper started");
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            store.purge_expired().await;
        }
    });
}
