//! API layer -- axum routes, handlers, and the dashboard page.

mod error;
mod page;
mod query;
mod routes;
pub mod state;

pub use self::error::ApiError;
pub use self::query::TableQuery;

use self::state::AppState;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

/// Build the application router with the dashboard page and API routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::dashboard))
        .nest("/api/v1", routes::api_routes())
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn fallback() -> (axum::http::StatusCode, &'static str) {
    (axum::http::StatusCode::NOT_FOUND, "not found")
}
