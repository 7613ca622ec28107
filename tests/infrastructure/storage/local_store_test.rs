use atapro::application::ports::StagingStore;
use atapro::domain::UploadedAudio;
use atapro::infrastructure::storage::LocalStagingStore;

fn create_test_store() -> (tempfile::TempDir, LocalStagingStore) {
    let dir = tempfile::TempDir::new().unwrap();
    let store = LocalStagingStore::new(dir.path().to_path_buf()).unwrap();
    (dir, store)
}

#[tokio::test]
async fn given_upload_when_staging_then_bytes_are_written_with_original_suffix() {
    let (dir, store) = create_test_store();
    let audio = UploadedAudio::new("Parte 1.M4A", &b"audio bytes"[..]);

    let staged = store.stage(&audio).await.unwrap();

    assert!(staged.path.starts_with(dir.path()));
    assert_eq!(staged.path.extension().and_then(|e| e.to_str()), Some("m4a"));
    assert_eq!(staged.original_filename, "Parte 1.M4A");
    assert_eq!(staged.mime_type, "audio/mp4");
    assert_eq!(std::fs::read(&staged.path).unwrap(), b"audio bytes");
}

#[tokio::test]
async fn given_same_filename_twice_when_staging_then_paths_do_not_collide() {
    let (_dir, store) = create_test_store();
    let audio = UploadedAudio::new("a.mp3", &b"x"[..]);

    let first = store.stage(&audio).await.unwrap();
    let second = store.stage(&audio).await.unwrap();

    assert_ne!(first.path, second.path);
}

#[tokio::test]
async fn given_staged_file_when_discarding_twice_then_both_calls_succeed() {
    let (_dir, store) = create_test_store();
    let staged = store
        .stage(&UploadedAudio::new("a.wav", &b"x"[..]))
        .await
        .unwrap();

    store.discard(&staged).await.unwrap();
    assert!(!staged.path.exists());
    store.discard(&staged).await.unwrap();
}

#[test]
fn given_nested_base_path_when_creating_then_directories_are_created() {
    let dir = tempfile::TempDir::new().unwrap();
    let nested = dir.path().join("scratch").join("audio");

    let store = LocalStagingStore::new(nested.clone()).unwrap();

    assert!(nested.is_dir());
    assert_eq!(store.base_path(), &nested);
}
