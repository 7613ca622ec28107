use std::path::Path;

use bytes::Bytes;

const DEFAULT_SUFFIX: &str = ".mp3";

#[derive(Debug, Clone, PartialEq)]
pub struct UploadedAudio {
    pub filename: String,
    pub data: Bytes,
}

impl UploadedAudio {
    pub fn new(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }

    /// Lower-cased extension including the leading dot, `.mp3` when the name has none.
    pub fn suffix(&self) -> String {
        Path::new(&self.filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .map(|ext| format!(".{}", ext.to_lowercase()))
            .unwrap_or_else(|| DEFAULT_SUFFIX.to_string())
    }

    pub fn mime_type(&self) -> &'static str {
        mime_for_suffix(&self.suffix())
    }

    pub fn size_bytes(&self) -> u64 {
        self.data.len() as u64
    }
}

pub fn mime_for_suffix(suffix: &str) -> &'static str {
    match suffix {
        ".wav" => "audio/wav",
        ".m4a" | ".mp4" => "audio/mp4",
        ".ogg" | ".opus" => "audio/ogg",
        ".aac" => "audio/aac",
        ".flac" => "audio/flac",
        ".webm" => "audio/webm",
        _ => "audio/mpeg",
    }
}

/// Stable sort by filename so "Parte 1" reaches the model before "Parte 2".
pub fn order_by_filename(mut audios: Vec<UploadedAudio>) -> Vec<UploadedAudio> {
    audios.sort_by(|a, b| a.filename.cmp(&b.filename));
    audios
}
