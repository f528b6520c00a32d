use crate::handlers;
use crate::state::AppState;
use axum::{routing::{delete, get, post, put}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/state", get(handlers::get_state))
        .route("/api/today", get(handlers::get_today))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/habits", post(handlers::add_habit))
        .route("/api/habits/:id/toggle", post(handlers::toggle_habit))
        .route("/api/habits/:id", delete(handlers::remove_habit))
        .route("/api/health/:date", put(handlers::update_health))
        .route("/api/wealth", post(handlers::add_wealth))
        .route("/api/wealth/:id", delete(handlers::remove_wealth))
        .with_state(state)
}
