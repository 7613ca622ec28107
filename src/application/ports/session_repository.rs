use async_trait::async_trait;

use crate::domain::{Session, SessionId};

use super::RepositoryError;

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &Session) -> Result<(), RepositoryError>;

    async fn get_by_id(&self, id: SessionId) -> Result<Option<Session>, RepositoryError>;

    async fn save(&self, session: &Session) -> Result<(), RepositoryError>;

    async fn delete(&self, id: SessionId) -> Result<(), RepositoryError>;

    /// Sets the in-progress flag only if it was clear. Returns whether it was claimed.
    async fn try_begin_run(&self, id: SessionId) -> Result<bool, RepositoryError>;

    async fn end_run(&self, id: SessionId) -> Result<(), RepositoryError>;
}
