// src/provider/mod.rs — Structured-generation provider layer

pub mod google;

use async_trait::async_trait;
use serde_json::Value;

use crate::infra::errors::TabijiError;

/// The extraction capability, treated as a black box: instruction text in,
/// structured JSON text out. Exactly one outbound call per `generate`; no
/// internal retries (retry policy belongs to the caller).
#[async_trait]
pub trait StructuredProvider: Send + Sync {
    fn id(&self) -> &str;
    fn name(&self) -> &str;

    async fn generate(&self, request: GenerationRequest) -> Result<String, TabijiError>;
}

/// One structured-generation request.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub model: String,
    pub system: Option<String>,
    pub prompt: String,
    /// When set, the backend is constrained to emit JSON conforming to
    /// this schema.
    pub response_schema: Option<Value>,
    pub max_output_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

/// Resolve the configured provider from the environment.
///
/// Checks GEMINI_API_KEY first, then GOOGLE_API_KEY.
pub fn from_env() -> Result<google::GoogleProvider, TabijiError> {
    let key = std::env::var("GEMINI_API_KEY")
        .or_else(|_| std::env::var("GOOGLE_API_KEY"))
        .map_err(|_| TabijiError::MissingCredential)?;
    if key.trim().is_empty() {
        return Err(TabijiError::MissingCredential);
    }
    Ok(google::GoogleProvider::new(key))
}
