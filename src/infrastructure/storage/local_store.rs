use std::io::{self, Write};
use std::path::PathBuf;

use crate::application::ports::{StagingStore, StagingStoreError};
use crate::domain::{StagedAudio, UploadedAudio};

const STAGED_FILE_PREFIX: &str = "atapro-";

/// Stages each upload as a uniquely named file under `base_path`.
pub struct LocalStagingStore {
    base_path: PathBuf,
}

impl LocalStagingStore {
    pub fn new(base_path: PathBuf) -> Result<Self, StagingStoreError> {
        std::fs::create_dir_all(&base_path).map_err(StagingStoreError::Io)?;
        Ok(Self { base_path })
    }

    pub fn in_system_temp() -> Self {
        Self {
            base_path: std::env::temp_dir(),
        }
    }

    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }
}

#[async_trait::async_trait]
impl StagingStore for LocalStagingStore {
    async fn stage(&self, audio: &UploadedAudio) -> Result<StagedAudio, StagingStoreError> {
        let base_path = self.base_path.clone();
        let suffix = audio.suffix();
        let data = audio.data.clone();

        let path = tokio::task::spawn_blocking(move || -> Result<PathBuf, StagingStoreError> {
            let mut file = tempfile::Builder::new()
                .prefix(STAGED_FILE_PREFIX)
                .suffix(&suffix)
                .tempfile_in(&base_path)?;
            file.write_all(&data)?;
            file.flush()?;
            let (_, path) = file
                .keep()
                .map_err(|e| StagingStoreError::StageFailed(e.to_string()))?;
            Ok(path)
        })
        .await
        .map_err(|e| StagingStoreError::StageFailed(e.to_string()))??;

        tracing::debug!(
            filename = %audio.filename,
            path = %path.display(),
            bytes = audio.size_bytes(),
            "Audio staged"
        );

        Ok(StagedAudio::new(
            path,
            audio.filename.clone(),
            audio.mime_type().to_string(),
        ))
    }

    async fn discard(&self, staged: &StagedAudio) -> Result<(), StagingStoreError> {
        match tokio::fs::remove_file(&staged.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StagingStoreError::DeleteFailed(format!(
                "{}: {}",
                staged.path.display(),
                e
            ))),
        }
    }
}
