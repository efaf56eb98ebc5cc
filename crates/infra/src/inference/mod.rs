//! Inference service clients.
//!
//! Each client performs exactly one HTTP exchange per call; retries and
//! caching are deliberately absent.

pub mod openai;

pub use openai::{OpenAiInferenceClient, extract_output_text};
