use std::sync::Arc;

use stocksense_ai::{InferenceClient, RecommendationService};
use stocksense_inventory::InventoryRepository;

/// Handles shared by all request handlers.
#[derive(Clone)]
pub struct AppServices {
    pub repository: Arc<dyn InventoryRepository>,
    pub recommendations: RecommendationService,
}

impl AppServices {
    pub fn new(repository: Arc<dyn InventoryRepository>, client: Arc<dyn InferenceClient>) -> Self {
        let recommendations = RecommendationService::new(repository.clone(), client);
        Self {
            repository,
            recommendations,
        }
    }
}
