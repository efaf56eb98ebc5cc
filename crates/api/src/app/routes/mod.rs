use axum::{Router, routing::get};

pub mod ai;
pub mod analytics;
pub mod inventory;
pub mod system;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/analytics/overview", get(analytics::overview))
        .nest("/ai", ai::router())
        .nest("/inventory", inventory::router())
}
