mod access_registry;
mod document_format;
pub mod inline_format;
mod minutes_document;
mod minutes_id;
mod minutes_variant;
mod remote_audio_handle;
mod remote_file_state;
mod session;
mod session_id;
mod staged_audio;
mod uploaded_audio;

pub use access_registry::{AccessRegistry, AccessRegistryError};
pub use document_format::DocumentFormat;
pub use inline_format::{InlineRun, LineKind, classify_line, strip_inline_markers, tokenize_inline};
pub use minutes_document::MinutesDocument;
pub use minutes_id::MinutesId;
pub use minutes_variant::MinutesVariant;
pub use remote_audio_handle::RemoteAudioHandle;
pub use remote_file_state::RemoteFileState;
pub use session::Session;
pub use session_id::SessionId;
pub use staged_audio::StagedAudio;
pub use uploaded_audio::{UploadedAudio, mime_for_suffix, order_by_filename};
