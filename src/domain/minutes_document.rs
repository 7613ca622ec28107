use chrono::{DateTime, Utc};

use super::{MinutesId, MinutesVariant};

#[derive(Debug, Clone, PartialEq)]
pub struct MinutesDocument {
    pub id: MinutesId,
    pub text: String,
    pub variant: MinutesVariant,
    pub source_files: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl MinutesDocument {
    pub fn new(text: String, variant: MinutesVariant, source_files: Vec<String>) -> Self {
        Self {
            id: MinutesId::new(),
            text,
            variant,
            source_files,
            created_at: Utc::now(),
        }
    }

    pub fn download_filename(&self, extension: &str) -> String {
        format!("{}.{}", self.variant.filename_stem(), extension)
    }
}
