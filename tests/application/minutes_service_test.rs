use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use atapro::application::ports::StagingStore;
use atapro::application::services::{
    MinutesError, MinutesPipeline, MinutesService, PipelineError, PollSettings, SessionError,
    SessionService,
};
use atapro::domain::{
    AccessRegistry, DocumentFormat, MinutesDocument, MinutesVariant, RemoteFileState, SessionId,
    UploadedAudio,
};
use atapro::infrastructure::llm::MockMediaModelClient;
use atapro::infrastructure::persistence::InMemorySessionRepository;
use atapro::infrastructure::rendering::DocumentRendererFactory;
use atapro::infrastructure::storage::LocalStagingStore;

struct Fixture {
    dir: tempfile::TempDir,
    client: Arc<MockMediaModelClient>,
    sessions: Arc<SessionService>,
    service: MinutesService<MockMediaModelClient>,
}

fn create_fixture(client: MockMediaModelClient) -> Fixture {
    create_fixture_with_poll(
        client,
        PollSettings {
            interval: Duration::from_millis(10),
            timeout: Some(Duration::from_secs(5)),
        },
    )
}

fn create_fixture_with_poll(client: MockMediaModelClient, poll: PollSettings) -> Fixture {
    let client = Arc::new(client);
    let dir = tempfile::TempDir::new().unwrap();
    let store: Arc<dyn StagingStore> =
        Arc::new(LocalStagingStore::new(dir.path().to_path_buf()).unwrap());
    let users = HashMap::from([("Rui".to_string(), "chave".to_string())]);
    let sessions = Arc::new(SessionService::new(
        AccessRegistry::from_users(&users).unwrap(),
        Arc::new(InMemorySessionRepository::new()),
    ));
    let pipeline = MinutesPipeline::new(Arc::clone(&client), store, poll);
    let service = MinutesService::new(
        pipeline,
        Arc::clone(&sessions),
        DocumentRendererFactory::all(),
    );
    Fixture {
        dir,
        client,
        sessions,
        service,
    }
}

#[tokio::test]
async fn given_session_when_generating_then_minutes_become_current() {
    let fixture = create_fixture(MockMediaModelClient::new("**ATA** da reunião"));
    let session = fixture.sessions.login("chave").await.unwrap();

    let minutes = fixture
        .service
        .generate(
            session.id,
            vec![UploadedAudio::new("a.mp3", &b"x"[..])],
            MinutesVariant::Formal,
        )
        .await
        .unwrap();

    let current = fixture.sessions.current_minutes(session.id).await.unwrap();
    assert_eq!(current.id, minutes.id);
    assert_eq!(current.variant, MinutesVariant::Formal);
}

#[tokio::test]
async fn given_failed_generation_when_generating_then_run_lock_is_released() {
    let fixture = create_fixture(MockMediaModelClient::failing_generation("HTTP 500"));
    let session = fixture.sessions.login("chave").await.unwrap();

    let result = fixture
        .service
        .generate(
            session.id,
            vec![UploadedAudio::new("a.mp3", &b"x"[..])],
            MinutesVariant::General,
        )
        .await;

    assert!(matches!(
        result,
        Err(MinutesError::Pipeline(PipelineError::Synthesis(_)))
    ));
    assert!(fixture.sessions.begin_run(session.id).await.is_ok());
}

#[tokio::test]
async fn given_unknown_session_when_generating_then_pipeline_is_not_started() {
    let fixture = create_fixture(MockMediaModelClient::new("ATA"));

    let result = fixture
        .service
        .generate(
            SessionId::new(),
            vec![UploadedAudio::new("a.mp3", &b"x"[..])],
            MinutesVariant::General,
        )
        .await;

    assert!(matches!(result, Err(MinutesError::Session(_))));
}

#[tokio::test]
async fn given_current_minutes_when_downloading_text_then_bytes_match_model_output() {
    let fixture = create_fixture(MockMediaModelClient::new("Linha 1\nLinha 2"));
    let session = fixture.sessions.login("chave").await.unwrap();
    fixture
        .service
        .generate(
            session.id,
            vec![UploadedAudio::new("a.mp3", &b"x"[..])],
            MinutesVariant::General,
        )
        .await
        .unwrap();

    let document = fixture
        .service
        .download(session.id, DocumentFormat::PlainText)
        .await
        .unwrap();

    assert_eq!(document.bytes, b"Linha 1\nLinha 2");
    assert_eq!(document.filename, "Ata_Reuniao_AtaPro.txt");
    assert_eq!(document.content_type, "text/plain; charset=utf-8");
}

#[tokio::test]
async fn given_no_minutes_when_downloading_then_no_minutes_error_is_returned() {
    let fixture = create_fixture(MockMediaModelClient::new("ATA"));
    let session = fixture.sessions.login("chave").await.unwrap();

    let result = fixture.service.download(session.id, DocumentFormat::Pdf).await;

    assert!(matches!(
        result,
        Err(MinutesError::Session(SessionError::NoMinutes))
    ));
}

async fn wait_for_minutes(fixture: &Fixture, session_id: SessionId) -> MinutesDocument {
    for _ in 0..200 {
        if let Ok(minutes) = fixture.sessions.current_minutes(session_id).await {
            return minutes;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("detached run never finished");
}

#[tokio::test(start_paused = true)]
async fn given_dropped_request_mid_poll_when_run_ends_then_files_and_lock_are_released() {
    let client = MockMediaModelClient::new("ATA")
        .with_initial_state(RemoteFileState::Processing)
        .with_status_script("a.mp3", vec![RemoteFileState::Processing; 20]);
    let fixture = create_fixture_with_poll(
        client,
        PollSettings {
            interval: Duration::from_millis(10),
            timeout: None,
        },
    );
    let session = fixture.sessions.login("chave").await.unwrap();

    let dropped = tokio::time::timeout(
        Duration::from_millis(50),
        fixture.service.generate(
            session.id,
            vec![UploadedAudio::new("a.mp3", &b"x"[..])],
            MinutesVariant::General,
        ),
    )
    .await;
    assert!(dropped.is_err());

    let minutes = wait_for_minutes(&fixture, session.id).await;

    assert_eq!(minutes.text, "ATA");
    assert_eq!(fixture.client.calls().deleted, vec!["files/mock-1".to_string()]);
    assert_eq!(std::fs::read_dir(fixture.dir.path()).unwrap().count(), 0);
    assert!(fixture.sessions.begin_run(session.id).await.is_ok());
}

#[tokio::test]
async fn given_logout_during_run_when_run_succeeds_then_minutes_are_still_returned() {
    let client = MockMediaModelClient::new("ATA")
        .with_initial_state(RemoteFileState::Processing)
        .with_status_script("a.mp3", vec![RemoteFileState::Processing; 5]);
    let fixture = create_fixture(client);
    let session = fixture.sessions.login("chave").await.unwrap();

    let (result, _) = tokio::join!(
        fixture.service.generate(
            session.id,
            vec![UploadedAudio::new("a.mp3", &b"x"[..])],
            MinutesVariant::General,
        ),
        async {
            tokio::time::sleep(Duration::from_millis(15)).await;
            fixture.sessions.logout(session.id).await.unwrap();
        }
    );

    assert_eq!(result.unwrap().text, "ATA");
    assert!(matches!(
        fixture.sessions.get(session.id).await,
        Err(SessionError::UnknownSession)
    ));
}
