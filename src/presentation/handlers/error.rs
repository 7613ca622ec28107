use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::{MinutesError, PipelineError, SessionError};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

pub fn session_error_response(error: &SessionError) -> Response {
    let status = match error {
        SessionError::InvalidAccessKey | SessionError::UnknownSession => StatusCode::UNAUTHORIZED,
        SessionError::NoMinutes => StatusCode::NOT_FOUND,
        SessionError::RunInProgress => StatusCode::CONFLICT,
        SessionError::Repository(e) => {
            tracing::error!(error = %e, "Session storage failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    error_response(status, error.to_string())
}

pub fn minutes_error_response(error: &MinutesError) -> Response {
    match error {
        MinutesError::Session(e) => session_error_response(e),
        MinutesError::Pipeline(PipelineError::NoInput) => {
            error_response(StatusCode::BAD_REQUEST, error.to_string())
        }
        MinutesError::Pipeline(e) => {
            tracing::error!(error = %e, "Minutes pipeline failed");
            error_response(StatusCode::BAD_GATEWAY, e.to_string())
        }
        MinutesError::UnsupportedFormat(_) => {
            error_response(StatusCode::BAD_REQUEST, error.to_string())
        }
        MinutesError::Rendering(e) => {
            tracing::error!(error = %e, "Rendering failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
        }
        MinutesError::Aborted(_) => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
        }
    }
}
