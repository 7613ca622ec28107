use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::MediaModelClient;
use crate::domain::{MinutesDocument, MinutesVariant, UploadedAudio};
use crate::presentation::state::AppState;

use super::error::{error_response, minutes_error_response, session_error_response};
use super::session_guard::require_session;

const FILES_FIELD: &str = "files";
const CONSENT_FIELD: &str = "consent";
const VARIANT_FIELD: &str = "variant";
const UNNAMED_UPLOAD: &str = "gravacao";

#[derive(Serialize)]
pub struct MinutesResponse {
    pub minutes_id: String,
    pub variant: MinutesVariant,
    pub source_files: Vec<String>,
    pub text: String,
    pub created_at: String,
}

impl From<MinutesDocument> for MinutesResponse {
    fn from(minutes: MinutesDocument) -> Self {
        Self {
            minutes_id: minutes.id.as_uuid().to_string(),
            variant: minutes.variant,
            source_files: minutes.source_files,
            text: minutes.text,
            created_at: minutes.created_at.to_rfc3339(),
        }
    }
}

struct MinutesForm {
    audios: Vec<UploadedAudio>,
    consent: bool,
    variant: Option<MinutesVariant>,
}

fn is_affirmative(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "on" | "yes" | "1" | "sim"
    )
}

async fn read_form(multipart: &mut Multipart) -> Result<MinutesForm, Response> {
    let mut form = MinutesForm {
        audios: Vec::new(),
        consent: false,
        variant: None,
    };

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart");
                return Err(error_response(e.status(), e.body_text()));
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            FILES_FIELD => {
                let filename = field
                    .file_name()
                    .filter(|n| !n.is_empty())
                    .unwrap_or(UNNAMED_UPLOAD)
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| error_response(e.status(), e.body_text()))?;
                if data.is_empty() {
                    tracing::debug!(filename = %filename, "Skipping empty upload");
                    continue;
                }
                tracing::debug!(filename = %filename, bytes = data.len(), "Received audio");
                form.audios.push(UploadedAudio::new(filename, data));
            }
            CONSENT_FIELD => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| error_response(e.status(), e.body_text()))?;
                form.consent = is_affirmative(&value);
            }
            VARIANT_FIELD => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| error_response(e.status(), e.body_text()))?;
                let variant = value
                    .parse::<MinutesVariant>()
                    .map_err(|e| error_response(StatusCode::BAD_REQUEST, e))?;
                form.variant = Some(variant);
            }
            other => {
                tracing::debug!(field = %other, "Ignoring unknown multipart field");
            }
        }
    }

    Ok(form)
}

#[tracing::instrument(skip_all)]
pub async fn generate_minutes_handler<C>(
    State(state): State<AppState<C>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    C: MediaModelClient + 'static,
{
    let session = match require_session(&state, &headers).await {
        Ok(s) => s,
        Err(response) => return response,
    };

    let form = match read_form(&mut multipart).await {
        Ok(f) => f,
        Err(response) => return response,
    };

    if !form.consent {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Consent from all participants is required before processing",
        );
    }
    if form.audios.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "No audio files uploaded");
    }

    let variant = form.variant.unwrap_or(state.default_variant);
    tracing::info!(
        session_id = %session.id,
        files = form.audios.len(),
        variant = %variant,
        "Generating minutes"
    );

    match state
        .minutes_service
        .generate(session.id, form.audios, variant)
        .await
    {
        Ok(minutes) => (StatusCode::OK, Json(MinutesResponse::from(minutes))).into_response(),
        Err(e) => minutes_error_response(&e),
    }
}

#[tracing::instrument(skip_all)]
pub async fn current_minutes_handler<C>(
    State(state): State<AppState<C>>,
    headers: HeaderMap,
) -> impl IntoResponse
where
    C: MediaModelClient + 'static,
{
    let session = match require_session(&state, &headers).await {
        Ok(s) => s,
        Err(response) => return response,
    };

    match session.current_minutes {
        Some(minutes) => (StatusCode::OK, Json(MinutesResponse::from(minutes))).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            "No minutes have been generated in this session",
        ),
    }
}

#[tracing::instrument(skip_all)]
pub async fn clear_minutes_handler<C>(
    State(state): State<AppState<C>>,
    headers: HeaderMap,
) -> impl IntoResponse
where
    C: MediaModelClient + 'static,
{
    let session = match require_session(&state, &headers).await {
        Ok(s) => s,
        Err(response) => return response,
    };

    match state.session_service.clear_minutes(session.id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => session_error_response(&e),
    }
}
