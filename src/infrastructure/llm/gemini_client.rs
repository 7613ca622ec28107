use async_trait::async_trait;
use reqwest::{Client, Response, multipart};

use crate::application::ports::{MediaModelClient, MediaModelError};
use crate::domain::{RemoteAudioHandle, RemoteFileState, StagedAudio};
use crate::infrastructure::observability::sanitize_prompt;

use super::gemini_types::{
    Content, FileData, GeminiFile, GenerateContentRequest, GenerateContentResponse, Part,
    UploadFileMetadata, UploadMetadata, UploadResponse,
};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-flash-latest";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini Files API + `generateContent` over REST.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: model.unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
        }
    }

    fn resource_url(&self, name: &str) -> String {
        format!("{}/v1beta/{}", self.base_url, name)
    }

    fn to_handle(file: GeminiFile, source_filename: &str, fallback_mime: &str) -> RemoteAudioHandle {
        let state = file
            .state
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(RemoteFileState::Unspecified);
        RemoteAudioHandle {
            name: file.name,
            uri: file.uri,
            mime_type: file.mime_type.unwrap_or_else(|| fallback_mime.to_string()),
            source_filename: source_filename.to_string(),
            state,
        }
    }
}

async fn check_status(response: Response) -> Result<Response, MediaModelError> {
    if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(MediaModelError::RateLimited);
    }

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(MediaModelError::ApiRequestFailed(format!(
            "HTTP {}: {}",
            status, body
        )));
    }

    Ok(response)
}

#[async_trait]
impl MediaModelClient for GeminiClient {
    async fn upload(&self, audio: &StagedAudio) -> Result<RemoteAudioHandle, MediaModelError> {
        let data = tokio::fs::read(&audio.path)
            .await
            .map_err(|e| MediaModelError::FileRead(format!("{}: {}", audio.path.display(), e)))?;
        let size = data.len();

        let metadata = serde_json::to_string(&UploadMetadata {
            file: UploadFileMetadata {
                display_name: &audio.original_filename,
            },
        })
        .map_err(|e| MediaModelError::InvalidResponse(format!("metadata: {}", e)))?;

        let metadata_part = multipart::Part::text(metadata)
            .mime_str("application/json")
            .map_err(|e| MediaModelError::ApiRequestFailed(format!("mime: {}", e)))?;
        let file_name = audio
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| audio.original_filename.clone());
        let file_part = multipart::Part::bytes(data)
            .file_name(file_name)
            .mime_str(&audio.mime_type)
            .map_err(|e| MediaModelError::ApiRequestFailed(format!("mime: {}", e)))?;

        let form = multipart::Form::new()
            .part("metadata", metadata_part)
            .part("file", file_part);

        tracing::debug!(
            filename = %audio.original_filename,
            mime = %audio.mime_type,
            bytes = size,
            "Uploading audio to Gemini"
        );

        let response = self
            .client
            .post(format!("{}/upload/v1beta/files", self.base_url))
            .header(API_KEY_HEADER, &self.api_key)
            .header("X-Goog-Upload-Protocol", "multipart")
            .multipart(form)
            .send()
            .await
            .map_err(|e| MediaModelError::ApiRequestFailed(format!("request: {}", e)))?;

        let uploaded: UploadResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| MediaModelError::InvalidResponse(e.to_string()))?;

        Ok(Self::to_handle(
            uploaded.file,
            &audio.original_filename,
            &audio.mime_type,
        ))
    }

    async fn get_status(
        &self,
        handle: &RemoteAudioHandle,
    ) -> Result<RemoteAudioHandle, MediaModelError> {
        let response = self
            .client
            .get(self.resource_url(&handle.name))
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| MediaModelError::ApiRequestFailed(format!("request: {}", e)))?;

        let file: GeminiFile = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| MediaModelError::InvalidResponse(e.to_string()))?;

        Ok(Self::to_handle(
            file,
            &handle.source_filename,
            &handle.mime_type,
        ))
    }

    async fn delete(&self, handle: &RemoteAudioHandle) -> Result<(), MediaModelError> {
        let response = self
            .client
            .delete(self.resource_url(&handle.name))
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| MediaModelError::ApiRequestFailed(format!("request: {}", e)))?;

        check_status(response).await?;
        Ok(())
    }

    async fn generate(
        &self,
        instruction: &str,
        handles: &[RemoteAudioHandle],
    ) -> Result<String, MediaModelError> {
        let mut parts = Vec::with_capacity(handles.len() + 1);
        parts.push(Part::Text {
            text: instruction.to_string(),
        });
        parts.extend(handles.iter().map(|h| Part::File {
            file_data: FileData {
                mime_type: h.mime_type.clone(),
                file_uri: h.uri.clone(),
            },
        }));

        let request_body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts,
            }],
        };

        tracing::debug!(
            model = %self.model,
            files = handles.len(),
            instruction = %sanitize_prompt(instruction),
            "Requesting Gemini generation"
        );

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| MediaModelError::ApiRequestFailed(format!("request: {}", e)))?;

        let generated: GenerateContentResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| MediaModelError::InvalidResponse(e.to_string()))?;

        let candidate = generated
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| MediaModelError::InvalidResponse("no candidates".to_string()))?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(MediaModelError::InvalidResponse(format!(
                "empty response (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }

        tracing::info!(chars = text.len(), "Gemini generation completed");
        Ok(text)
    }
}
