use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/progress/status", post(handlers::toggle_status))
        .route("/progress/reset", post(handlers::reset_form))
        .route("/api/catalog", get(handlers::get_catalog))
        .route("/api/progress", get(handlers::get_progress))
        .route(
            "/api/progress/status",
            get(handlers::get_status).post(handlers::set_status),
        )
        .route("/api/progress/reset", post(handlers::reset))
        .route("/api/progress/summary", get(handlers::get_summary))
        .route("/api/guards/:id/completion", get(handlers::get_guard_completion))
        .route("/api/search-link", get(handlers::search_link))
        .with_state(state)
}
