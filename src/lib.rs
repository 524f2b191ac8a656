//! Quebec 511 scraper - convert roadwork and traffic cameras to Open511 XML.
//!
//! This crate scrapes two of the Québec transport ministry's web map
//! services and emits Open511 documents on standard output: roadwork events
//! (major and minor) and traffic cameras. One run produces one complete,
//! fresh document; nothing is cached or persisted.
//!
//! # Example
//!
//! ```
//! use quebec511_scraper::types::{parse_date, Severity};
//!
//! assert_eq!(Severity::from_raw_id("maj123"), Severity::Major);
//! assert!(parse_date("2012-02-12").is_ok());
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Upstream URLs, bounding box, pacing policy
//! - [`types`]: Core data types (Camera, RoadEvent, Point, ...)
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client for the map services
//! - [`list`]: Wire adapter for the JSON list endpoints
//! - [`extract`]: Selector-driven text extraction from HTML fragments
//! - [`roadwork`]: Roadwork pipeline
//! - [`cameras`]: Camera pipeline
//! - [`open511`]: Open511 document assembly and serialization
//! - [`cli`]: Command-line interface

pub mod cameras;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod http;
pub mod list;
pub mod open511;
pub mod roadwork;
pub mod types;

// Re-export main functions
pub use cameras::scrape_cameras;
pub use roadwork::scrape_roadwork;

// Re-export commonly used items
pub use config::ScraperConfig;
pub use error::{Result, ScrapeError};
pub use types::{Camera, RoadEvent, Scraped};
