// src/main.rs — Tabiji entry point

use clap::Parser;

use tabiji::cli::{self, Cli, Commands};
use tabiji::infra::config::Config;
use tabiji::infra::logger;

#[tokio::main]
async fn main() {
    // Initialize logging (respects RUST_LOG)
    logger::init_logging("warn");

    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config (falls back to defaults if no config.toml)
    let config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };

    match &cli.command {
        Some(Commands::Expenses) => {
            let session = cli::load_session(&cli, &config).await?;
            cli::expenses::run_expenses(&session)
        }
        Some(Commands::Edit) => {
            let mut session = cli::load_session(&cli, &config).await?;
            cli::edit::run_edit(&mut session)
        }
        Some(Commands::Show { day }) => {
            let day = *day;
            let session = cli::load_session(&cli, &config).await?;
            cli::show::run_show(&session, day).await
        }
        None => {
            let session = cli::load_session(&cli, &config).await?;
            cli::show::run_show(&session, 1).await
        }
    }
}
