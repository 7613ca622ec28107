use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::application::ports::{
    MediaModelClient, MediaModelError, StagingStore, StagingStoreError,
};
use crate::application::services::minutes_prompt::instruction_for;
use crate::domain::{
    MinutesDocument, MinutesVariant, RemoteAudioHandle, StagedAudio, UploadedAudio,
    order_by_filename,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    /// `None` waits for as long as the remote side keeps processing.
    pub timeout: Option<Duration>,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            timeout: Some(Duration::from_secs(600)),
        }
    }
}

/// Everything a run created that must be removed once it ends.
#[derive(Debug, Default)]
pub struct RunArtifacts {
    pub staged: Vec<StagedAudio>,
    pub remote: Vec<RemoteAudioHandle>,
}

pub struct MinutesPipeline<C>
where
    C: MediaModelClient,
{
    client: Arc<C>,
    staging_store: Arc<dyn StagingStore>,
    poll: PollSettings,
}

impl<C> MinutesPipeline<C>
where
    C: MediaModelClient,
{
    pub fn new(client: Arc<C>, staging_store: Arc<dyn StagingStore>, poll: PollSettings) -> Self {
        Self {
            client,
            staging_store,
            poll,
        }
    }

    pub async fn run(
        &self,
        audios: Vec<UploadedAudio>,
        variant: MinutesVariant,
    ) -> Result<MinutesDocument, PipelineError> {
        if audios.is_empty() {
            return Err(PipelineError::NoInput);
        }

        let audios = order_by_filename(audios);
        let source_files: Vec<String> = audios.iter().map(|a| a.filename.clone()).collect();

        let mut artifacts = RunArtifacts::default();
        let result = self.execute(&audios, variant, &mut artifacts).await;
        self.cleanup(artifacts).await;

        match result {
            Ok(text) => {
                tracing::info!(
                    variant = %variant,
                    files = source_files.len(),
                    chars = text.len(),
                    "Minutes drafted"
                );
                Ok(MinutesDocument::new(text, variant, source_files))
            }
            Err(e) => {
                tracing::error!(error = %e, "Minutes pipeline failed");
                Err(e)
            }
        }
    }

    async fn execute(
        &self,
        audios: &[UploadedAudio],
        variant: MinutesVariant,
        artifacts: &mut RunArtifacts,
    ) -> Result<String, PipelineError> {
        self.upload_all(audios, artifacts).await?;
        let ready = self.await_ready(&artifacts.remote).await?;
        self.synthesize(variant, &ready).await
    }

    /// Stages and uploads each input in order. Every staged file and remote
    /// handle is recorded in `artifacts` as soon as it exists.
    pub async fn upload_all(
        &self,
        audios: &[UploadedAudio],
        artifacts: &mut RunArtifacts,
    ) -> Result<(), PipelineError> {
        tracing::info!(files = audios.len(), "Uploading recordings");

        for audio in audios {
            let staged = self.staging_store.stage(audio).await.map_err(|source| {
                PipelineError::Staging {
                    filename: audio.filename.clone(),
                    source,
                }
            })?;
            artifacts.staged.push(staged.clone());

            let handle = self.client.upload(&staged).await.map_err(|source| {
                PipelineError::Upload {
                    filename: audio.filename.clone(),
                    source,
                }
            })?;
            tracing::info!(
                filename = %audio.filename,
                remote = %handle.name,
                state = %handle.state,
                "Recording received"
            );
            artifacts.remote.push(handle);
        }

        Ok(())
    }

    /// Waits on each handle in turn; total wait is the sum of the individual waits.
    pub async fn await_ready(
        &self,
        handles: &[RemoteAudioHandle],
    ) -> Result<Vec<RemoteAudioHandle>, PipelineError> {
        let mut ready = Vec::with_capacity(handles.len());
        for handle in handles {
            ready.push(self.wait_until_ready(handle).await?);
        }
        Ok(ready)
    }

    async fn wait_until_ready(
        &self,
        handle: &RemoteAudioHandle,
    ) -> Result<RemoteAudioHandle, PipelineError> {
        let started = Instant::now();
        let mut current = handle.clone();

        while current.state.is_pending() {
            if let Some(timeout) = self.poll.timeout {
                if started.elapsed() >= timeout {
                    return Err(PipelineError::ReadinessTimeout {
                        filename: handle.source_filename.clone(),
                        waited_secs: started.elapsed().as_secs(),
                    });
                }
            }

            tokio::time::sleep(self.poll.interval).await;
            current = self.client.get_status(&current).await.map_err(|source| {
                PipelineError::Status {
                    filename: handle.source_filename.clone(),
                    source,
                }
            })?;
            tracing::debug!(remote = %current.name, state = %current.state, "Polled remote file");
        }

        if current.state.is_failed() {
            return Err(PipelineError::RemoteProcessingFailed {
                filename: handle.source_filename.clone(),
            });
        }

        Ok(current)
    }

    pub async fn synthesize(
        &self,
        variant: MinutesVariant,
        handles: &[RemoteAudioHandle],
    ) -> Result<String, PipelineError> {
        tracing::info!(variant = %variant, files = handles.len(), "Drafting minutes");
        self.client
            .generate(instruction_for(variant), handles)
            .await
            .map_err(PipelineError::Synthesis)
    }

    /// Best-effort removal of everything the run created. Failures are logged only.
    pub async fn cleanup(&self, artifacts: RunArtifacts) {
        for handle in &artifacts.remote {
            if let Err(e) = self.client.delete(handle).await {
                tracing::warn!(error = %e, remote = %handle.name, "Failed to delete remote file");
            }
        }
        for staged in &artifacts.staged {
            if let Err(e) = self.staging_store.discard(staged).await {
                tracing::warn!(
                    error = %e,
                    path = %staged.path.display(),
                    "Failed to delete staged file"
                );
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("no audio files were provided")]
    NoInput,
    #[error("could not stage '{filename}': {source}")]
    Staging {
        filename: String,
        source: StagingStoreError,
    },
    #[error("could not upload '{filename}': {source}")]
    Upload {
        filename: String,
        source: MediaModelError,
    },
    #[error("could not check the status of '{filename}': {source}")]
    Status {
        filename: String,
        source: MediaModelError,
    },
    #[error("the media service could not read the audio file '{filename}'")]
    RemoteProcessingFailed { filename: String },
    #[error("'{filename}' was still processing after {waited_secs}s")]
    ReadinessTimeout { filename: String, waited_secs: u64 },
    #[error("minutes generation failed: {0}")]
    Synthesis(MediaModelError),
}
