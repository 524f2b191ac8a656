//! Command-line interface for the scraper.

use clap::{Parser, Subcommand};

use crate::cameras::scrape_cameras;
use crate::config::ScraperConfig;
use crate::error::Result;
use crate::http::create_client;
use crate::open511::{camera_document, event_document};
use crate::roadwork::scrape_roadwork;
use crate::types::Scraped;

/// Scrape Québec 511 roadwork and traffic cameras into Open511 XML.
#[derive(Parser)]
#[command(name = "quebec511-scraper")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape traffic cameras and print an Open511 document.
    Cameras,

    /// Scrape roadwork events and print an Open511 document.
    Roadwork,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = ScraperConfig::default();
    let client = create_client()?;

    let document = match cli.command {
        Commands::Cameras => {
            let (cameras, skipped) = split_outcomes(scrape_cameras(&client, &config)?);
            tracing::info!(kept = cameras.len(), skipped, "assembled cameras");
            camera_document(&config.lang, &cameras)?
        }
        Commands::Roadwork => {
            let (events, skipped) = split_outcomes(scrape_roadwork(&client, &config)?);
            tracing::info!(kept = events.len(), skipped, "assembled events");
            event_document(&config.lang, &events)?
        }
    };

    println!("{document}");
    Ok(())
}

/// Partition outcomes into kept records and a skip count.
fn split_outcomes<T>(outcomes: Vec<Scraped<T>>) -> (Vec<T>, usize) {
    let mut records = Vec::with_capacity(outcomes.len());
    let mut skipped = 0;
    for outcome in outcomes {
        match outcome {
            Scraped::Record(record) => records.push(record),
            Scraped::Skipped { .. } => skipped += 1,
        }
    }
    (records, skipped)
}
