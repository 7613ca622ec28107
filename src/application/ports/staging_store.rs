use std::io;

use crate::domain::{StagedAudio, UploadedAudio};

/// Scratch space for uploaded audio while a run is in flight.
#[async_trait::async_trait]
pub trait StagingStore: Send + Sync {
    async fn stage(&self, audio: &UploadedAudio) -> Result<StagedAudio, StagingStoreError>;

    /// Removing something already gone succeeds.
    async fn discard(&self, staged: &StagedAudio) -> Result<(), StagingStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StagingStoreError {
    #[error("staging failed: {0}")]
    StageFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
