use chrono::{DateTime, Utc};

use super::{MinutesDocument, SessionId};

/// Per-session context: who is logged in and the one "current" minutes slot.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub display_name: String,
    pub current_minutes: Option<MinutesDocument>,
    pub run_in_progress: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(display_name: String) -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            display_name,
            current_minutes: None,
            run_in_progress: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn replace_minutes(&mut self, minutes: MinutesDocument) {
        self.current_minutes = Some(minutes);
        self.updated_at = Utc::now();
    }

    /// Start over: forget the current minutes.
    pub fn reset(&mut self) {
        self.current_minutes = None;
        self.updated_at = Utc::now();
    }
}
