use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new().route("/recommendations", post(generate_recommendations))
}

/// The body is optional: an empty body means no season context.
pub async fn generate_recommendations(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    body: Bytes,
) -> axum::response::Response {
    let request: dto::GenerateRecommendationsRequest = if body.iter().all(u8::is_ascii_whitespace) {
        dto::GenerateRecommendationsRequest::default()
    } else {
        match serde_json::from_slice(&body) {
            Ok(r) => r,
            Err(e) => {
                return errors::json_error(
                    StatusCode::BAD_REQUEST,
                    "validation_error",
                    format!("invalid request body: {e}"),
                );
            }
        }
    };

    tracing::info!(principal = %principal.principal_id(), "recommendations requested");

    match services.recommendations.generate(request.season.as_deref()).await {
        Ok(recommendations) => {
            Json(dto::RecommendationsResponse { recommendations }).into_response()
        }
        Err(e) => errors::recommendation_error_to_response(e),
    }
}
