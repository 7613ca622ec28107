use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::ports::MediaModelClient;
use crate::presentation::state::AppState;

use super::error::session_error_response;
use super::session_guard::require_session;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub access_key: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub session_id: String,
    pub display_name: String,
}

#[tracing::instrument(skip_all)]
pub async fn login_handler<C>(
    State(state): State<AppState<C>>,
    Json(request): Json<LoginRequest>,
) -> impl IntoResponse
where
    C: MediaModelClient + 'static,
{
    match state.session_service.login(&request.access_key).await {
        Ok(session) => (
            StatusCode::CREATED,
            Json(LoginResponse {
                session_id: session.id.to_string(),
                display_name: session.display_name,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Login rejected");
            session_error_response(&e)
        }
    }
}

#[tracing::instrument(skip_all)]
pub async fn logout_handler<C>(
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

    match state.session_service.logout(session.id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => session_error_response(&e),
    }
}
