use std::sync::Arc;

use crate::application::ports::{RepositoryError, SessionRepository};
use crate::domain::{AccessRegistry, MinutesDocument, Session, SessionId};

pub struct SessionService {
    registry: AccessRegistry,
    repository: Arc<dyn SessionRepository>,
}

impl SessionService {
    pub fn new(registry: AccessRegistry, repository: Arc<dyn SessionRepository>) -> Self {
        if registry.is_empty() {
            tracing::warn!("No access keys configured; every login will be rejected");
        }
        Self {
            registry,
            repository,
        }
    }

    pub async fn login(&self, access_key: &str) -> Result<Session, SessionError> {
        let display_name = self
            .registry
            .authenticate(access_key)
            .ok_or(SessionError::InvalidAccessKey)?
            .to_string();

        let session = Session::new(display_name);
        self.repository.create(&session).await?;
        tracing::info!(session_id = %session.id, user = %session.display_name, "Session opened");
        Ok(session)
    }

    pub async fn logout(&self, id: SessionId) -> Result<(), SessionError> {
        self.repository.delete(id).await?;
        tracing::info!(session_id = %id, "Session closed");
        Ok(())
    }

    pub async fn get(&self, id: SessionId) -> Result<Session, SessionError> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(SessionError::UnknownSession)
    }

    pub async fn current_minutes(&self, id: SessionId) -> Result<MinutesDocument, SessionError> {
        self.get(id)
            .await?
            .current_minutes
            .ok_or(SessionError::NoMinutes)
    }

    /// Start over: clears the current minutes slot.
    pub async fn clear_minutes(&self, id: SessionId) -> Result<(), SessionError> {
        let mut session = self.get(id).await?;
        session.reset();
        self.repository.save(&session).await?;
        Ok(())
    }

    pub async fn begin_run(&self, id: SessionId) -> Result<(), SessionError> {
        match self.repository.try_begin_run(id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(SessionError::RunInProgress),
            Err(RepositoryError::NotFound(_)) => Err(SessionError::UnknownSession),
            Err(e) => Err(e.into()),
        }
    }

    /// Ends the run; a produced document replaces the current one wholesale.
    ///
    /// A session closed while the run was in flight is not an error: the
    /// document is simply not stored.
    pub async fn finish_run(
        &self,
        id: SessionId,
        minutes: Option<MinutesDocument>,
    ) -> Result<(), SessionError> {
        if let Some(minutes) = minutes {
            self.store_minutes(id, minutes).await?;
        }
        self.repository.end_run(id).await?;
        Ok(())
    }

    async fn store_minutes(
        &self,
        id: SessionId,
        minutes: MinutesDocument,
    ) -> Result<(), SessionError> {
        let Some(mut session) = self.repository.get_by_id(id).await? else {
            tracing::info!(session_id = %id, "Session closed during run; minutes not kept");
            return Ok(());
        };

        session.replace_minutes(minutes);
        match self.repository.save(&session).await {
            Ok(()) => Ok(()),
            Err(RepositoryError::NotFound(_)) => {
                tracing::info!(session_id = %id, "Session closed during run; minutes not kept");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid access key")]
    InvalidAccessKey,
    #[error("session not found or expired")]
    UnknownSession,
    #[error("no minutes have been generated in this session")]
    NoMinutes,
    #[error("a minutes run is already in progress for this session")]
    RunInProgress,
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
}
