use std::sync::Arc;

use axum::{Json, extract::Extension};

use stocksense_analytics::{AnalyticsSnapshot, aggregate};

use crate::app::services::AppServices;

/// Recomputed from the current record set on every request.
pub async fn overview(Extension(services): Extension<Arc<AppServices>>) -> Json<AnalyticsSnapshot> {
    let records = services.repository.list_all();
    Json(aggregate(&records))
}
