use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Json;
use serde_json::{Value, json};

use atapro::application::ports::{MediaModelClient, MediaModelError};
use atapro::domain::{RemoteAudioHandle, RemoteFileState, StagedAudio};
use atapro::infrastructure::llm::GeminiClient;

const TEST_API_KEY: &str = "test-key";

#[derive(Default)]
struct Recorded {
    api_keys: Vec<String>,
    upload_fields: Vec<String>,
    upload_protocol: Option<String>,
    generate_path: Option<String>,
    generate_body: Option<Value>,
    deleted: Vec<String>,
}

type Shared = Arc<Mutex<Recorded>>;

fn record_key(shared: &Shared, headers: &HeaderMap) {
    let key = headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    shared.lock().unwrap().api_keys.push(key);
}

async fn upload(
    State(shared): State<Shared>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> impl IntoResponse {
    record_key(&shared, &headers);
    let protocol = headers
        .get("x-goog-upload-protocol")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        fields.push(field.name().unwrap_or_default().to_string());
        let _ = field.bytes().await.unwrap();
    }
    {
        let mut recorded = shared.lock().unwrap();
        recorded.upload_fields = fields;
        recorded.upload_protocol = protocol;
    }
    Json(json!({
        "file": {
            "name": "files/abc123",
            "uri": "https://files.invalid/files/abc123",
            "mimeType": "audio/mpeg",
            "state": "PROCESSING"
        }
    }))
}

async fn status(
    State(shared): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> impl IntoResponse {
    record_key(&shared, &headers);
    Json(json!({
        "name": format!("files/{}", id),
        "uri": format!("https://files.invalid/files/{}", id),
        "mimeType": "audio/mpeg",
        "state": "ACTIVE"
    }))
}

async fn remove(
    State(shared): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> impl IntoResponse {
    record_key(&shared, &headers);
    shared.lock().unwrap().deleted.push(id);
    Json(json!({}))
}

async fn generate(
    State(shared): State<Shared>,
    headers: HeaderMap,
    Path(model_action): Path<String>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    record_key(&shared, &headers);
    {
        let mut recorded = shared.lock().unwrap();
        recorded.generate_path = Some(model_action);
        recorded.generate_body = Some(body);
    }
    Json(json!({
        "candidates": [{
            "content": { "parts": [{ "text": "**ATA** " }, { "text": "da reunião" }] },
            "finishReason": "STOP"
        }]
    }))
}

async fn spawn_fake_gemini() -> (String, Shared) {
    let shared: Shared = Arc::new(Mutex::new(Recorded::default()));
    let router = Router::new()
        .route("/upload/v1beta/files", post(upload))
        .route("/v1beta/files/{id}", get(status).delete(remove))
        .route("/v1beta/models/{model_action}", post(generate))
        .with_state(Arc::clone(&shared));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{}", addr), shared)
}

async fn spawn_status_server(status: StatusCode) -> String {
    let router = Router::new().route(
        "/v1beta/models/{model_action}",
        post(move || async move { (status, "slow down") }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn handle(name: &str) -> RemoteAudioHandle {
    RemoteAudioHandle {
        name: name.to_string(),
        uri: format!("https://files.invalid/{}", name),
        mime_type: "audio/mpeg".to_string(),
        source_filename: "a.mp3".to_string(),
        state: RemoteFileState::Active,
    }
}

#[tokio::test]
async fn given_staged_file_when_uploading_then_multipart_upload_returns_processing_handle() {
    let (base_url, shared) = spawn_fake_gemini().await;
    let client = GeminiClient::new(TEST_API_KEY.to_string(), Some(base_url), None);
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("atapro-1.mp3");
    std::fs::write(&path, b"audio").unwrap();
    let staged = StagedAudio::new(path, "a.mp3".to_string(), "audio/mpeg".to_string());

    let handle = client.upload(&staged).await.unwrap();

    assert_eq!(handle.name, "files/abc123");
    assert_eq!(handle.state, RemoteFileState::Processing);
    assert_eq!(handle.source_filename, "a.mp3");
    let recorded = shared.lock().unwrap();
    assert_eq!(recorded.upload_fields, vec!["metadata", "file"]);
    assert_eq!(recorded.upload_protocol.as_deref(), Some("multipart"));
    assert_eq!(recorded.api_keys, vec![TEST_API_KEY]);
}

#[tokio::test]
async fn given_missing_staged_file_when_uploading_then_file_read_error_is_returned() {
    let client = GeminiClient::new(
        TEST_API_KEY.to_string(),
        Some("http://127.0.0.1:9".to_string()),
        None,
    );
    let staged = StagedAudio::new(
        "/nonexistent/atapro-missing.mp3".into(),
        "a.mp3".to_string(),
        "audio/mpeg".to_string(),
    );

    let result = client.upload(&staged).await;

    assert!(matches!(result, Err(MediaModelError::FileRead(_))));
}

#[tokio::test]
async fn given_remote_file_when_checking_status_then_state_is_refreshed() {
    let (base_url, _shared) = spawn_fake_gemini().await;
    let client = GeminiClient::new(TEST_API_KEY.to_string(), Some(base_url), None);
    let mut processing = handle("files/abc123");
    processing.state = RemoteFileState::Processing;

    let refreshed = client.get_status(&processing).await.unwrap();

    assert_eq!(refreshed.state, RemoteFileState::Active);
    assert_eq!(refreshed.source_filename, "a.mp3");
}

#[tokio::test]
async fn given_remote_file_when_deleting_then_resource_is_removed() {
    let (base_url, shared) = spawn_fake_gemini().await;
    let client = GeminiClient::new(TEST_API_KEY.to_string(), Some(base_url), None);

    client.delete(&handle("files/abc123")).await.unwrap();

    assert_eq!(shared.lock().unwrap().deleted, vec!["abc123"]);
}

#[tokio::test]
async fn given_handles_when_generating_then_instruction_precedes_files_and_text_is_joined() {
    let (base_url, shared) = spawn_fake_gemini().await;
    let client = GeminiClient::new(
        TEST_API_KEY.to_string(),
        Some(format!("{}/", base_url)),
        Some("gemini-test".to_string()),
    );

    let text = client
        .generate(
            "Redige a ata",
            &[handle("files/one"), handle("files/two")],
        )
        .await
        .unwrap();

    assert_eq!(text, "**ATA** da reunião");
    let recorded = shared.lock().unwrap();
    assert_eq!(
        recorded.generate_path.as_deref(),
        Some("gemini-test:generateContent")
    );
    let body = recorded.generate_body.as_ref().unwrap();
    let parts = body["contents"][0]["parts"].as_array().unwrap();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0]["text"], "Redige a ata");
    assert_eq!(parts[1]["fileData"]["fileUri"], "https://files.invalid/files/one");
    assert_eq!(parts[2]["fileData"]["mimeType"], "audio/mpeg");
}

#[tokio::test]
async fn given_quota_exhausted_when_generating_then_rate_limited_is_returned() {
    let base_url = spawn_status_server(StatusCode::TOO_MANY_REQUESTS).await;
    let client = GeminiClient::new(TEST_API_KEY.to_string(), Some(base_url), None);

    let result = client.generate("Redige a ata", &[handle("files/one")]).await;

    assert!(matches!(result, Err(MediaModelError::RateLimited)));
}

#[tokio::test]
async fn given_server_error_when_generating_then_status_and_body_are_reported() {
    let base_url = spawn_status_server(StatusCode::INTERNAL_SERVER_ERROR).await;
    let client = GeminiClient::new(TEST_API_KEY.to_string(), Some(base_url), None);

    let result = client.generate("Redige a ata", &[handle("files/one")]).await;

    match result {
        Err(MediaModelError::ApiRequestFailed(message)) => {
            assert!(message.contains("500"));
            assert!(message.contains("slow down"));
        }
        other => panic!("expected API failure, got {:?}", other.map(|_| ())),
    }
}
