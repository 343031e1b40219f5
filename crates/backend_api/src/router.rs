use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{handlers, repository::SalesRepository};

/// Create the main application router with all API endpoints
pub fn create_router(repo: Arc<dyn SalesRepository>) -> Router {
    // The display client is served from a different origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/sales-report", get(handlers::get_sales_report))
        .with_state(repo)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
