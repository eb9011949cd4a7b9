// src/cli/mod.rs — CLI definition (clap derive)

pub mod edit;
pub mod expenses;
pub mod show;

use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::extract::{ExtractionSpec, Extractor};
use crate::infra::config::Config;
use crate::session::{LoadPhase, Session};
use crate::source::SheetClient;

#[derive(Parser)]
#[command(name = "tabiji", about = "Spreadsheet-to-itinerary trip planner", version)]
pub struct Cli {
    /// Google Sheets document id (overrides config)
    #[arg(short, long)]
    pub sheet: Option<String>,

    /// Extraction model (overrides config)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Date of Day 1, YYYY-MM-DD (overrides config)
    #[arg(short, long)]
    pub anchor: Option<NaiveDate>,

    /// Config file path
    #[arg(long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a day's timeline, weather, and the next-stop tip
    Show {
        /// Day to show (1-based)
        #[arg(short, long, default_value = "1")]
        day: usize,
    },
    /// Print the trip-wide expense report
    Expenses,
    /// Interactively edit an event's expense
    Edit,
}

/// Fetch the sheet, run extraction, and hand the result to a fresh session.
///
/// All four failure classes (missing credential, sheet fetch, empty result,
/// malformed result) land in the session's Failed phase rather than
/// escaping; the caller renders the error banner.
pub async fn load_session(cli: &Cli, config: &Config) -> anyhow::Result<Session> {
    let sheet_id = cli
        .sheet
        .clone()
        .or_else(|| config.trip.sheet_id.clone())
        .ok_or_else(|| {
            anyhow::anyhow!("No sheet configured. Pass --sheet or set trip.sheet_id in config.toml.")
        })?;

    let anchor = cli.anchor.or(config.trip.anchor_date).ok_or_else(|| {
        anyhow::anyhow!(
            "No anchor date configured. Pass --anchor or set trip.anchor_date in config.toml."
        )
    })?;

    let model = cli
        .model
        .clone()
        .unwrap_or_else(|| config.extraction.model.clone());

    let mut session = Session::new();
    let token = session.begin_load();

    let result = async {
        let provider = Arc::new(crate::provider::from_env()?);
        let csv = SheetClient::new().fetch_csv(&sheet_id).await?;

        let mut spec = ExtractionSpec::new(anchor, config.trip.participants);
        spec.language = config.extraction.language.clone();

        Extractor::new(provider, model)
            .with_max_output_tokens(config.extraction.max_output_tokens)
            .extract(&csv, &spec)
            .await
    }
    .await;

    session.complete_load(token, result);
    Ok(session)
}

/// Render the shared error banner for a failed load.
pub fn print_error_banner(session: &Session) {
    if let LoadPhase::Failed(message) = session.phase() {
        eprintln!("⚠ Unable to load itinerary");
        eprintln!("  {}", message);
        if session.trip().is_some() {
            eprintln!("  (showing the last successfully loaded itinerary)");
        }
    }
}
