use async_trait::async_trait;
use serde_json::{Value as JsonValue, json};
use tracing::debug;

use stocksense_ai::{InferenceClient, InferenceError, ResponseShape};

use crate::config::InferenceConfig;

/// Longest provider error body carried into an `InferenceError`.
const MAX_ERROR_BODY: usize = 512;

/// Inference client for the OpenAI Responses API (`POST /v1/responses`).
///
/// Also works against any compatible server via `InferenceConfig::base_url`.
/// One call is one HTTP exchange: no retries, no backoff.
pub struct OpenAiInferenceClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl OpenAiInferenceClient {
    pub fn new(config: &InferenceConfig) -> Result<Self, InferenceError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| InferenceError::Transport(format!("failed to build http client: {e}")))?;

        Ok(Self {
            http,
            endpoint: format!("{}/v1/responses", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body(&self, prompt: &str, shape: ResponseShape) -> JsonValue {
        let format = match shape {
            // json_object mode replies with an object even though the prompt asks for an array;
            // the parser's envelope tolerance (`recommendations`/`data`) absorbs that.
            ResponseShape::StructuredJson => json!({ "type": "json_object" }),
        };
        json!({
            "model": self.model,
            "input": prompt,
            "text": { "format": format },
        })
    }
}

#[async_trait]
impl InferenceClient for OpenAiInferenceClient {
    async fn complete(&self, prompt: &str, shape: ResponseShape) -> Result<String, InferenceError> {
        let body = self.request_body(prompt, shape);

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| InferenceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let mut message = response.text().await.unwrap_or_default();
            truncate_at_char_boundary(&mut message, MAX_ERROR_BODY);
            return Err(InferenceError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let json: JsonValue = response
            .json()
            .await
            .map_err(|e| InferenceError::MissingOutput(format!("response body was not JSON: {e}")))?;

        let text = extract_output_text(&json)
            .ok_or_else(|| InferenceError::MissingOutput("no output_text content".to_string()))?;
        debug!(model = %self.model, reply_bytes = text.len(), "inference reply received");
        Ok(text)
    }
}

/// Pull the reply text out of a Responses API payload.
///
/// Prefers the top-level `output_text` convenience field; otherwise returns the
/// first `output_text` content part across `output[]` items.
pub fn extract_output_text(json: &JsonValue) -> Option<String> {
    if let Some(text) = json.get("output_text").and_then(|t| t.as_str()) {
        return Some(text.to_string());
    }

    json.get("output")?
        .as_array()?
        .iter()
        .filter_map(|item| item.get("content")?.as_array())
        .flatten()
        .find(|part| part.get("type").and_then(|t| t.as_str()) == Some("output_text"))
        .and_then(|part| part.get("text")?.as_str())
        .map(str::to_string)
}

fn truncate_at_char_boundary(s: &mut String, max: usize) {
    if s.len() <= max {
        return;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s.truncate(end);
}
