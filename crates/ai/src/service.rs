//! Recommendation pipeline orchestration.
//!
//! ```text
//! Idle
//!   ↓ list records (empty → Failed: EmptyInventory)
//! BuildingPrompt
//!   ↓
//! AwaitingInference (error → Failed: InferenceUnavailable)
//!   ↓
//! Parsing (malformed → Failed: MalformedInferenceOutput)
//!   ↓
//! Done
//! ```
//!
//! One attempt per call. Nothing is memoized: identical calls repeat the whole
//! pipeline, including the inference request.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use stocksense_inventory::InventoryRepository;

use crate::inference::{InferenceClient, InferenceError, ResponseShape};
use crate::parser::parse_recommendations;
use crate::prompt::PromptBuilder;
use crate::recommendation::Recommendation;

/// Every failure a `generate` call can surface.
#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error("no inventory data available for recommendations")]
    EmptyInventory,

    #[error("inference service unavailable: {0}")]
    InferenceUnavailable(#[source] InferenceError),

    /// The raw reply is logged server-side and intentionally not carried here.
    #[error("inference output could not be interpreted")]
    MalformedInferenceOutput,
}

/// Pipeline stage, reported in logs.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GenerationStage {
    Idle,
    BuildingPrompt,
    AwaitingInference,
    Parsing,
    Done,
    Failed,
}

impl GenerationStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationStage::Idle => "idle",
            GenerationStage::BuildingPrompt => "building_prompt",
            GenerationStage::AwaitingInference => "awaiting_inference",
            GenerationStage::Parsing => "parsing",
            GenerationStage::Done => "done",
            GenerationStage::Failed => "failed",
        }
    }
}

/// Orchestrates prompt build → inference → parse over the current record set.
#[derive(Clone)]
pub struct RecommendationService {
    repository: Arc<dyn InventoryRepository>,
    client: Arc<dyn InferenceClient>,
    prompts: PromptBuilder,
}

impl RecommendationService {
    pub fn new(repository: Arc<dyn InventoryRepository>, client: Arc<dyn InferenceClient>) -> Self {
        Self {
            repository,
            client,
            prompts: PromptBuilder::default(),
        }
    }

    /// Generate restocking recommendations for the current inventory.
    ///
    /// A blank `season_hint` is treated as absent.
    pub async fn generate(
        &self,
        season_hint: Option<&str>,
    ) -> Result<Vec<Recommendation>, RecommendationError> {
        enter(GenerationStage::Idle);
        let records = self.repository.list_all();
        if records.is_empty() {
            enter(GenerationStage::Failed);
            return Err(RecommendationError::EmptyInventory);
        }

        enter(GenerationStage::BuildingPrompt);
        let season = season_hint.map(str::trim).filter(|s| !s.is_empty());
        let prompt = self.prompts.build(&records, season);
        info!(
            records = records.len(),
            season = season.unwrap_or(""),
            prompt_bytes = prompt.len(),
            "requesting restocking recommendations"
        );

        enter(GenerationStage::AwaitingInference);
        let raw = match self.client.complete(&prompt, ResponseShape::StructuredJson).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("inference call failed: {e}");
                enter(GenerationStage::Failed);
                return Err(RecommendationError::InferenceUnavailable(e));
            }
        };

        enter(GenerationStage::Parsing);
        let recommendations = match parse_recommendations(&raw) {
            Ok(recs) => recs,
            Err(e) => {
                error!(raw = %raw, "could not interpret inference reply: {e}");
                enter(GenerationStage::Failed);
                return Err(RecommendationError::MalformedInferenceOutput);
            }
        };

        enter(GenerationStage::Done);
        info!(count = recommendations.len(), "restocking recommendations generated");
        Ok(recommendations)
    }
}

fn enter(stage: GenerationStage) {
    debug!(stage = stage.as_str(), "recommendation pipeline");
}
