use async_trait::async_trait;

use crate::domain::{RemoteAudioHandle, StagedAudio};

/// Hosted model that accepts audio uploads and drafts text from them.
#[async_trait]
pub trait MediaModelClient: Send + Sync {
    async fn upload(&self, audio: &StagedAudio) -> Result<RemoteAudioHandle, MediaModelError>;

    /// Re-fetches the handle; the returned copy carries the current state.
    async fn get_status(
        &self,
        handle: &RemoteAudioHandle,
    ) -> Result<RemoteAudioHandle, MediaModelError>;

    async fn delete(&self, handle: &RemoteAudioHandle) -> Result<(), MediaModelError>;

    async fn generate(
        &self,
        instruction: &str,
        handles: &[RemoteAudioHandle],
    ) -> Result<String, MediaModelError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MediaModelError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("could not read staged audio: {0}")]
    FileRead(String),
}
