use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedAudio {
    pub path: PathBuf,
    pub original_filename: String,
    pub mime_type: String,
}

impl StagedAudio {
    pub fn new(path: PathBuf, original_filename: String, mime_type: String) -> Self {
        Self {
            path,
            original_filename,
            mime_type,
        }
    }
}
