use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

use crate::application::ports::MediaModelClient;
use crate::domain::DocumentFormat;
use crate::presentation::state::AppState;

use super::error::{error_response, minutes_error_response};
use super::session_guard::require_session;

#[tracing::instrument(skip(state, headers))]
pub async fn download_minutes_handler<C>(
    State(state): State<AppState<C>>,
    Path(format): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse
where
    C: MediaModelClient + 'static,
{
    let session = match require_session(&state, &headers).await {
        Ok(s) => s,
        Err(response) => return response,
    };

    let format = match format.parse::<DocumentFormat>() {
        Ok(f) => f,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e),
    };

    match state.minutes_service.download(session.id, format).await {
        Ok(document) => (
            StatusCode::OK,
            [
                (CONTENT_TYPE, document.content_type.to_string()),
                (
                    CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", document.filename),
                ),
            ],
            document.bytes,
        )
            .into_response(),
        Err(e) => minutes_error_response(&e),
    }
}
