use std::sync::Arc;

use crate::application::ports::MediaModelClient;
use crate::application::services::{MinutesService, SessionService};
use crate::domain::MinutesVariant;

pub struct AppState<C>
where
    C: MediaModelClient,
{
    pub minutes_service: Arc<MinutesService<C>>,
    pub session_service: Arc<SessionService>,
    pub default_variant: MinutesVariant,
    pub max_upload_bytes: usize,
}

impl<C> Clone for AppState<C>
where
    C: MediaModelClient,
{
    fn clone(&self) -> Self {
        Self {
            minutes_service: Arc::clone(&self.minutes_service),
            session_service: Arc::clone(&self.session_service),
            default_variant: self.default_variant,
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}
