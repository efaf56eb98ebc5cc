use serde::{Deserialize, Serialize};

use stocksense_ai::Recommendation;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Default, Deserialize)]
pub struct GenerateRecommendationsRequest {
    /// Free-text season context, e.g. "winter".
    #[serde(default)]
    pub season: Option<String>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
