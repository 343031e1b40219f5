use axum::{extract::State, response::IntoResponse, Json};
use models::SalesReport;
use std::sync::Arc;

use crate::{repository::SalesRepository, Result};

pub type RepositoryState = Arc<dyn SalesRepository>;

/// GET /api/sales-report
/// Rebuilds the full report from the record source on every request
pub async fn get_sales_report(State(repo): State<RepositoryState>) -> Result<Json<SalesReport>> {
    let records = repo.fetch_records().await?;
    let report = report_engine::generate_report(&records).rounded();

    tracing::info!(
        records = records.len(),
        months = report.month_wise_sales.len(),
        "served sales report"
    );

    Ok(Json(report))
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "sales-report-api"
    }))
}
