use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;

use crate::application::ports::MediaModelClient;
use crate::domain::{Session, SessionId};
use crate::presentation::state::AppState;

use super::error::{error_response, session_error_response};

pub const SESSION_ID_HEADER: &str = "x-session-id";

/// Resolves the `x-session-id` header to a live session.
pub async fn require_session<C>(
    state: &AppState<C>,
    headers: &HeaderMap,
) -> Result<Session, Response>
where
    C: MediaModelClient + 'static,
{
    let session_id = headers
        .get(SESSION_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(SessionId::parse)
        .ok_or_else(|| {
            error_response(
                StatusCode::UNAUTHORIZED,
                format!("Missing or malformed {} header", SESSION_ID_HEADER),
            )
        })?;

    state
        .session_service
        .get(session_id)
        .await
        .map_err(|e| session_error_response(&e))
}
