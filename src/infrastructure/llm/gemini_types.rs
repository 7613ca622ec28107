use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub(super) struct UploadMetadata<'a> {
    pub file: UploadFileMetadata<'a>,
}

#[derive(Serialize)]
pub(super) struct UploadFileMetadata<'a> {
    pub display_name: &'a str,
}

#[derive(Deserialize)]
pub(super) struct UploadResponse {
    pub file: GeminiFile,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GeminiFile {
    pub name: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

#[derive(Serialize)]
pub(super) struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Serialize)]
pub(super) struct Content {
    pub role: &'static str,
    pub parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
pub(super) enum Part {
    Text {
        text: String,
    },
    File {
        #[serde(rename = "fileData")]
        file_data: FileData,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct FileData {
    pub mime_type: String,
    pub file_uri: String,
}

#[derive(Deserialize)]
pub(super) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Deserialize)]
pub(super) struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
pub(super) struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}
