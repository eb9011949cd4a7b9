// src/extract/mod.rs — Schema-constrained extraction pipeline
//
// Raw tabular text goes in, a typed `Trip` comes out. The heavy lifting is
// delegated to the structured-generation backend; this module owns the
// instruction payload, the output schema, and the parse/validate step.
// Numeric invariants (expense totals) are NOT enforced here — the ledger
// normalizes them after extraction.

pub mod prompt;

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::infra::errors::TabijiError;
use crate::itinerary::{schema, Trip};
use crate::provider::{GenerationRequest, StructuredProvider};
use crate::util::truncate_str;

/// Caller-supplied extraction parameters. The anchor date is the real
/// calendar date of Day 1; nothing about the calendar is hardcoded.
#[derive(Debug, Clone)]
pub struct ExtractionSpec {
    pub anchor_date: NaiveDate,
    pub participants: u32,
    pub language: String,
    /// How many day rows the calendar table covers.
    pub day_count: u32,
}

impl ExtractionSpec {
    pub fn new(anchor_date: NaiveDate, participants: u32) -> Self {
        Self {
            anchor_date,
            participants,
            language: "Traditional Chinese".into(),
            day_count: 8,
        }
    }
}

pub struct Extractor {
    provider: Arc<dyn StructuredProvider>,
    model: String,
    max_output_tokens: Option<u32>,
}

impl Extractor {
    pub fn new(provider: Arc<dyn StructuredProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            max_output_tokens: None,
        }
    }

    pub fn with_max_output_tokens(mut self, max: Option<u32>) -> Self {
        self.max_output_tokens = max;
        self
    }

    /// Run one extraction: exactly one outbound call to the backend.
    pub async fn extract(
        &self,
        csv_text: &str,
        spec: &ExtractionSpec,
    ) -> Result<Trip, TabijiError> {
        let request = GenerationRequest {
            model: self.model.clone(),
            system: Some(prompt::system_instruction(&spec.language)),
            prompt: prompt::build_instruction(csv_text, spec),
            response_schema: Some(schema::trip_response_schema()),
            max_output_tokens: self.max_output_tokens,
            temperature: None,
        };

        tracing::debug!(
            model = %self.model,
            csv_bytes = csv_text.len(),
            "submitting itinerary extraction"
        );

        let text = self.provider.generate(request).await?;

        if text.trim().is_empty() {
            return Err(TabijiError::EmptyResult);
        }

        tracing::trace!("extraction response: {}", truncate_str(&text, 512));

        let mut trip = parse_trip(&text)?;
        if trip.participants == 0 {
            trip.participants = spec.participants;
        }
        Ok(trip)
    }
}

/// Parse backend output as the itinerary schema.
///
/// Unparseable payloads are a `DataFormat` error; the caller distinguishes
/// this from `EmptyResult` when deciding whether a retry makes sense.
pub fn parse_trip(text: &str) -> Result<Trip, TabijiError> {
    let trip: Trip =
        serde_json::from_str(text).map_err(|e| TabijiError::DataFormat(e.to_string()))?;
    Ok(ensure_event_ids(trip))
}

/// Guarantee every event carries a unique id. The id is the ledger's join
/// key; a backend that omits or duplicates one gets a deterministic
/// `d{day}-e{event}` fallback before anything downstream sees the trip.
fn ensure_event_ids(mut trip: Trip) -> Trip {
    let mut seen: HashSet<String> = HashSet::new();

    for (di, day) in trip.days.iter_mut().enumerate() {
        for (ei, event) in day.events.iter_mut().enumerate() {
            let id = event.id.trim();
            if id.is_empty() || seen.contains(id) {
                let mut fallback = format!("d{}-e{}", di + 1, ei + 1);
                while seen.contains(&fallback) {
                    fallback.push('x');
                }
                event.id = fallback;
            } else if id.len() != event.id.len() {
                event.id = id.to_string();
            }
            seen.insert(event.id.clone());
        }
    }

    trip
}
