use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::Mutex;

use crate::application::ports::{MediaModelClient, MediaModelError};
use crate::domain::{RemoteAudioHandle, RemoteFileState, StagedAudio};

/// What the mock has been asked to do so far.
#[derive(Debug, Default, Clone)]
pub struct MockCalls {
    pub uploaded: Vec<String>,
    pub uploaded_paths: Vec<PathBuf>,
    pub staged_file_present: Vec<bool>,
    pub status_checks: Vec<String>,
    pub deleted: Vec<String>,
    pub instructions: Vec<String>,
    pub generated_from: Vec<Vec<String>>,
}

/// Scripted stand-in for the hosted media model.
///
/// Each uploaded file starts in `initial_state`; every status check pops the next
/// state from that file's script and reports `ACTIVE` once the script runs dry.
pub struct MockMediaModelClient {
    response: Result<String, String>,
    initial_state: RemoteFileState,
    status_scripts: Mutex<HashMap<String, VecDeque<RemoteFileState>>>,
    failing_upload: Option<String>,
    failing_deletes: bool,
    calls: Mutex<MockCalls>,
}

impl MockMediaModelClient {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: Ok(response.into()),
            initial_state: RemoteFileState::Active,
            status_scripts: Mutex::new(HashMap::new()),
            failing_upload: None,
            failing_deletes: false,
            calls: Mutex::new(MockCalls::default()),
        }
    }

    pub fn failing_generation(message: impl Into<String>) -> Self {
        Self {
            response: Err(message.into()),
            ..Self::new("")
        }
    }

    pub fn with_initial_state(mut self, state: RemoteFileState) -> Self {
        self.initial_state = state;
        self
    }

    pub fn with_status_script(
        self,
        filename: impl Into<String>,
        states: impl IntoIterator<Item = RemoteFileState>,
    ) -> Self {
        if let Ok(mut scripts) = self.status_scripts.lock() {
            scripts.insert(filename.into(), states.into_iter().collect());
        }
        self
    }

    pub fn with_failing_upload(mut self, filename: impl Into<String>) -> Self {
        self.failing_upload = Some(filename.into());
        self
    }

    pub fn with_failing_deletes(mut self) -> Self {
        self.failing_deletes = true;
        self
    }

    pub fn calls(&self) -> MockCalls {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, f: impl FnOnce(&mut MockCalls)) {
        if let Ok(mut calls) = self.calls.lock() {
            f(&mut calls);
        }
    }
}

#[async_trait::async_trait]
impl MediaModelClient for MockMediaModelClient {
    async fn upload(&self, audio: &StagedAudio) -> Result<RemoteAudioHandle, MediaModelError> {
        let present = audio.path.exists();
        self.record(|c| {
            c.uploaded.push(audio.original_filename.clone());
            c.uploaded_paths.push(audio.path.clone());
            c.staged_file_present.push(present);
        });

        if self.failing_upload.as_deref() == Some(audio.original_filename.as_str()) {
            return Err(MediaModelError::ApiRequestFailed(format!(
                "HTTP 500 Internal Server Error: cannot store {}",
                audio.original_filename
            )));
        }

        let index = self.calls().uploaded.len();
        Ok(RemoteAudioHandle {
            name: format!("files/mock-{}", index),
            uri: format!("https://mock.invalid/files/mock-{}", index),
            mime_type: audio.mime_type.clone(),
            source_filename: audio.original_filename.clone(),
            state: self.initial_state,
        })
    }

    async fn get_status(
        &self,
        handle: &RemoteAudioHandle,
    ) -> Result<RemoteAudioHandle, MediaModelError> {
        self.record(|c| c.status_checks.push(handle.source_filename.clone()));

        let next = self
            .status_scripts
            .lock()
            .ok()
            .and_then(|mut scripts| {
                scripts
                    .get_mut(&handle.source_filename)
                    .and_then(VecDeque::pop_front)
            })
            .unwrap_or(RemoteFileState::Active);

        Ok(handle.with_state(next))
    }

    async fn delete(&self, handle: &RemoteAudioHandle) -> Result<(), MediaModelError> {
        self.record(|c| c.deleted.push(handle.name.clone()));
        if self.failing_deletes {
            return Err(MediaModelError::ApiRequestFailed("HTTP 503".to_string()));
        }
        Ok(())
    }

    async fn generate(
        &self,
        instruction: &str,
        handles: &[RemoteAudioHandle],
    ) -> Result<String, MediaModelError> {
        self.record(|c| {
            c.instructions.push(instruction.to_string());
            c.generated_from
                .push(handles.iter().map(|h| h.source_filename.clone()).collect());
        });

        self.response
            .clone()
            .map_err(MediaModelError::ApiRequestFailed)
    }
}
