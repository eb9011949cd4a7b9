// src/infra/config.rs — Configuration loading (TOML)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::infra::paths;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub trip: TripConfig,

    #[serde(default)]
    pub extraction: ExtractionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripConfig {
    /// Google Sheets document id of the trip plan.
    #[serde(default)]
    pub sheet_id: Option<String>,

    /// Real calendar date of Day 1. Everything else is computed from it.
    #[serde(default)]
    pub anchor_date: Option<NaiveDate>,

    /// Traveler headcount; the default divisor for group expenses.
    #[serde(default = "default_participants")]
    pub participants: u32,
}

fn default_participants() -> u32 {
    6
}

impl Default for TripConfig {
    fn default() -> Self {
        Self {
            sheet_id: None,
            anchor_date: None,
            participants: 6,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Model id passed to the structured-generation backend.
    #[serde(default = "default_model")]
    pub model: String,

    /// Language for extracted descriptions and summaries.
    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default)]
    pub max_output_tokens: Option<u32>,
}

fn default_model() -> String {
    "gemini-2.5-flash".into()
}

fn default_language() -> String {
    "Traditional Chinese".into()
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            language: default_language(),
            max_output_tokens: None,
        }
    }
}

impl Config {
    /// Load config from the default location, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = paths::config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
