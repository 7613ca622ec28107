use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::MediaModelClient;
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    clear_minutes_handler, current_minutes_handler, download_minutes_handler,
    generate_minutes_handler, health_handler, login_handler, logout_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<C>(state: AppState<C>) -> Router
where
    C: MediaModelClient + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/v1/sessions",
            post(login_handler::<C>).delete(logout_handler::<C>),
        )
        .route(
            "/api/v1/minutes",
            post(generate_minutes_handler::<C>)
                .get(current_minutes_handler::<C>)
                .delete(clear_minutes_handler::<C>),
        )
        .route(
            "/api/v1/minutes/download/{format}",
            get(download_minutes_handler::<C>),
        )
        .layer(body_limit)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
