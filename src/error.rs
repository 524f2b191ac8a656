//! Error types for the scraper.

use thiserror::Error;

/// Main error type for the scraper library.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// List endpoint returned a body that is not valid JSON.
    #[error("Could not load JSON from {url}: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to fetch the detail page for a record.
    #[error("Failed to fetch detail page for {id}: {source}")]
    DetailFetch {
        id: String,
        #[source]
        source: reqwest::Error,
    },

    /// Invalid date format.
    #[error("Invalid date: '{0}'. Expected YYYY-MM-DD (e.g., 2012-02-12)")]
    InvalidDate(String),

    /// Camera detail page contained no recognizable image URL.
    #[error("No image URL found in detail page for camera {0}")]
    MissingImageUrl(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML serialization error.
    #[error("XML serialization failed: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Serialized document was not valid UTF-8.
    #[error("Serialized document was not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type alias for scraper operations.
pub type Result<T> = std::result::Result<T, ScrapeError>;
