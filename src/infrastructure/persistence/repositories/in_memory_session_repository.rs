use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::application::ports::{RepositoryError, SessionRepository};
use crate::domain::{Session, SessionId};

struct StoredSession {
    session: Session,
    last_seen: Instant,
}

impl StoredSession {
    fn new(session: Session) -> Self {
        Self {
            session,
            last_seen: Instant::now(),
        }
    }

    /// A session with a run in flight never expires.
    fn is_expired(&self, idle_ttl: Option<Duration>, now: Instant) -> bool {
        match idle_ttl {
            Some(ttl) => {
                !self.session.run_in_progress && now.duration_since(self.last_seen) >= ttl
            }
            None => false,
        }
    }
}

/// Process-local session storage. Nothing survives a restart.
///
/// With an idle TTL, a session untouched for that long is treated as gone
/// on its next lookup and removed by [`purge_expired`](Self::purge_expired).
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<SessionId, StoredSession>>,
    idle_ttl: Option<Duration>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_ttl(idle_ttl: Option<Duration>) -> Self {
        Self {
            sessions: RwLock::default(),
            idle_ttl,
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drops every idle session; returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, stored| !stored.is_expired(self.idle_ttl, now));
        let removed = before - sessions.len();
        if removed > 0 {
            tracing::info!(removed, remaining = sessions.len(), "Expired sessions purged");
        }
        removed
    }

    /// Looks up a live session and marks it as seen, evicting it if it went idle.
    fn touch<'a>(
        &self,
        sessions: &'a mut HashMap<SessionId, StoredSession>,
        id: SessionId,
    ) -> Option<&'a mut StoredSession> {
        let now = Instant::now();
        let expired = sessions
            .get(&id)
            .is_some_and(|stored| stored.is_expired(self.idle_ttl, now));
        if expired {
            sessions.remove(&id);
            tracing::info!(session_id = %id, "Session expired");
            return None;
        }

        let stored = sessions.get_mut(&id)?;
        stored.last_seen = now;
        Some(stored)
    }
}

#[async_trait::async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, session: &Session) -> Result<(), RepositoryError> {
        self.sessions
            .write()
            .await
            .insert(session.id, StoredSession::new(session.clone()));
        Ok(())
    }

    async fn get_by_id(&self, id: SessionId) -> Result<Option<Session>, RepositoryError> {
        let mut sessions = self.sessions.write().await;
        Ok(self
            .touch(&mut sessions, id)
            .map(|stored| stored.session.clone()))
    }

    async fn save(&self, session: &Session) -> Result<(), RepositoryError> {
        let mut sessions = self.sessions.write().await;
        match self.touch(&mut sessions, session.id) {
            Some(stored) => {
                let run_in_progress = stored.session.run_in_progress;
                stored.session = session.clone();
                stored.session.run_in_progress = run_in_progress;
                Ok(())
            }
            None => Err(RepositoryError::NotFound(session.id.to_string())),
        }
    }

    async fn delete(&self, id: SessionId) -> Result<(), RepositoryError> {
        self.sessions.write().await.remove(&id);
        Ok(())
    }

    async fn try_begin_run(&self, id: SessionId) -> Result<bool, RepositoryError> {
        let mut sessions = self.sessions.write().await;
        let stored = self
            .touch(&mut sessions, id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        if stored.session.run_in_progress {
            return Ok(false);
        }
        stored.session.run_in_progress = true;
        Ok(true)
    }

    async fn end_run(&self, id: SessionId) -> Result<(), RepositoryError> {
        if let Some(stored) = self.sessions.write().await.get_mut(&id) {
            stored.session.run_in_progress = false;
            stored.last_seen = Instant::now();
        }
        Ok(())
    }
}
