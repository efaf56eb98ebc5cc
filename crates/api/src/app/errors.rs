use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stocksense_ai::RecommendationError;
use stocksense_core::{DomainError, ItemId};

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "Item not found"),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
    }
}

pub fn recommendation_error_to_response(err: RecommendationError) -> axum::response::Response {
    match err {
        RecommendationError::EmptyInventory => json_error(
            StatusCode::BAD_REQUEST,
            "empty_inventory",
            "No inventory data available for recommendations",
        ),
        RecommendationError::InferenceUnavailable(_) => json_error(
            StatusCode::BAD_GATEWAY,
            "inference_unavailable",
            "Failed to generate AI recommendations",
        ),
        // Raw reply stays in the server log.
        RecommendationError::MalformedInferenceOutput => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "malformed_inference_output",
            "AI response parsing failed",
        ),
    }
}

pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "validation_error", rejection.body_text())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn parse_item_id(s: &str) -> Result<ItemId, axum::response::Response> {
    s.parse::<ItemId>().map_err(domain_error_to_response)
}
