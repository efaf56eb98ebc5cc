use async_trait::async_trait;
use thiserror::Error;

/// Response-shape directive passed along with a prompt.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ResponseShape {
    /// Ask the provider to constrain its reply to a JSON document.
    StructuredJson,
}

/// Failure of a single inference exchange.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Network failure or timeout before a reply arrived.
    #[error("inference transport failed: {0}")]
    Transport(String),

    /// The provider answered with a non-success status (quota, auth, outage).
    #[error("inference provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    /// The provider answered, but without any reply text.
    #[error("inference provider response had no output text: {0}")]
    MissingOutput(String),
}

/// Sends a prompt to a language-model service and returns its raw reply text.
///
/// Implementations encapsulate transport, credentials, and vendor-specific API
/// details. One call is one exchange: implementations must not retry.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    async fn complete(&self, prompt: &str, shape: ResponseShape) -> Result<String, InferenceError>;
}
