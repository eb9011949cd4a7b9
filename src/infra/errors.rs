// src/infra/errors.rs — Error types for Tabiji

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabijiError {
    // Document fetch failed — network trouble, non-success status, or a
    // sheet that is not shared publicly.
    #[error("Sheet unavailable: {message}")]
    SourceUnavailable { message: String },

    // Extraction backend returned no payload at all. Distinct from a
    // malformed one: callers may want to retry only this.
    #[error("Extraction backend returned no data")]
    EmptyResult,

    // Extraction result was not parseable as the itinerary schema.
    #[error("Failed to parse itinerary data: {0}")]
    DataFormat(String),

    #[error("No API key configured. Set GEMINI_API_KEY or GOOGLE_API_KEY.")]
    MissingCredential,

    // Transport-level backend errors (possibly retriable)
    #[error("Provider '{provider}' error: {message}")]
    Provider {
        provider: String,
        message: String,
        retriable: bool,
    },

    #[error("Weather lookup failed: {message}")]
    Weather { message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TabijiError {
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            TabijiError::EmptyResult
                | TabijiError::Provider {
                    retriable: true,
                    ..
                }
        )
    }
}
