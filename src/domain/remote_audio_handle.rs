use super::RemoteFileState;

/// Reference to an audio file held by the remote media service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteAudioHandle {
    pub name: String,
    pub uri: String,
    pub mime_type: String,
    pub source_filename: String,
    pub state: RemoteFileState,
}

impl RemoteAudioHandle {
    pub fn with_state(&self, state: RemoteFileState) -> Self {
        Self {
            state,
            ..self.clone()
        }
    }
}
