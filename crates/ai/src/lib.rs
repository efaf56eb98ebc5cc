//! `stocksense-ai`
//!
//! **Responsibility:** restocking recommendations from an external language model.
//!
//! The pipeline is strictly sequential per call:
//! prompt build → inference call → tolerant reply parsing.
//! - It never mutates inventory records.
//! - Recommendations are ephemeral; nothing here caches or persists them.
//! - The inference client is injected; this crate holds no global state.

pub mod inference;
pub mod parser;
pub mod prompt;
pub mod recommendation;
pub mod service;

pub use inference::{InferenceClient, InferenceError, ResponseShape};
pub use parser::{ParseError, ReplyEnvelope, parse_recommendations};
pub use prompt::PromptBuilder;
pub use recommendation::{Recommendation, RiskLevel};
pub use service::{GenerationStage, RecommendationError, RecommendationService};
