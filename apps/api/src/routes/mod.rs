pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assistant::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Assistant API
        .route("/api/v1/assistant/respond", post(handlers::handle_respond))
        .route(
            "/api/v1/assistant/sessions",
            post(handlers::handle_open_session),
        )
        .route(
            "/api/v1/assistant/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_close_session),
        )
        .route(
            "/api/v1/assistant/sessions/:id/messages",
            post(handlers::handle_send_message),
        )
        .route(
            "/api/v1/assistant/sessions/:id/refresh",
            post(handlers::handle_refresh_session),
        )
        .with_state(state)
}
