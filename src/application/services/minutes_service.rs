use std::sync::Arc;

use crate::application::ports::{DocumentRenderer, MediaModelClient};
use crate::application::services::{MinutesPipeline, PipelineError, SessionError, SessionService};
use crate::domain::{DocumentFormat, MinutesDocument, MinutesVariant, SessionId, UploadedAudio};

pub struct RenderedDocument {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Runs the pipeline on behalf of a session and renders its current minutes.
pub struct MinutesService<C>
where
    C: MediaModelClient,
{
    pipeline: Arc<MinutesPipeline<C>>,
    sessions: Arc<SessionService>,
    renderers: Vec<Arc<dyn DocumentRenderer>>,
}

impl<C> MinutesService<C>
where
    C: MediaModelClient + 'static,
{
    pub fn new(
        pipeline: MinutesPipeline<C>,
        sessions: Arc<SessionService>,
        renderers: Vec<Arc<dyn DocumentRenderer>>,
    ) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            sessions,
            renderers,
        }
    }

    /// The run itself is detached from the caller: dropping the returned
    /// future (client disconnect, proxy timeout) does not stop cleanup or
    /// the release of the session's run lock.
    pub async fn generate(
        &self,
        session_id: SessionId,
        audios: Vec<UploadedAudio>,
        variant: MinutesVariant,
    ) -> Result<MinutesDocument, MinutesError> {
        self.sessions.begin_run(session_id).await?;

        let pipeline = Arc::clone(&self.pipeline);
        let sessions = Arc::clone(&self.sessions);
        let run = tokio::spawn(async move {
            let result = pipeline.run(audios, variant).await;
            let stored = result.as_ref().ok().cloned();
            let finished = sessions.finish_run(session_id, stored).await;
            (result, finished)
        });

        match run.await {
            Ok((result, finished)) => {
                finished?;
                Ok(result?)
            }
            Err(e) => {
                tracing::error!(session_id = %session_id, error = %e, "Minutes run aborted");
                self.sessions.finish_run(session_id, None).await?;
                Err(MinutesError::Aborted(e.to_string()))
            }
        }
    }

    pub async fn download(
        &self,
        session_id: SessionId,
        format: DocumentFormat,
    ) -> Result<RenderedDocument, MinutesError> {
        let minutes = self.sessions.current_minutes(session_id).await?;
        let renderer = self
            .renderers
            .iter()
            .find(|r| r.format() == format)
            .ok_or(MinutesError::UnsupportedFormat(format))?;

        let bytes = renderer
            .render(&minutes.text, minutes.variant)
            .map_err(|e| MinutesError::Rendering(e.to_string()))?;

        tracing::debug!(format = %format, bytes = bytes.len(), "Minutes rendered");

        Ok(RenderedDocument {
            filename: minutes.download_filename(format.extension()),
            content_type: format.as_mime(),
            bytes,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MinutesError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error("no renderer registered for {0}")]
    UnsupportedFormat(DocumentFormat),
    #[error("rendering failed: {0}")]
    Rendering(String),
    #[error("minutes run aborted: {0}")]
    Aborted(String),
}
