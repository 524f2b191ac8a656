//! HTTP client wrapper for the Québec 511 endpoints.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::HTTP_TIMEOUT_SECS;
use crate::error::Result;

/// User agent string identifying this scraper.
const USER_AGENT: &str = concat!("quebec511-scraper/", env!("CARGO_PKG_VERSION"));

/// Create a configured HTTP client.
///
/// # Returns
/// A `reqwest::blocking::Client` configured with appropriate timeout and user agent.
pub fn create_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Fetch a URL and return the response body as text.
///
/// A single attempt: non-2xx statuses and transport failures are returned as
/// errors. The query string, if any, must already be part of `url`.
pub fn fetch_text(client: &Client, url: &str) -> Result<String> {
    tracing::debug!(url, "GET");
    let response = client.get(url).send()?.error_for_status()?;
    Ok(response.text()?)
}

/// Fetch a URL with query parameters and return the response body as text.
pub fn fetch_text_with_query(
    client: &Client,
    url: &str,
    query: &[(&str, String)],
) -> Result<String> {
    tracing::debug!(url, ?query, "GET");
    let response = client.get(url).query(query).send()?.error_for_status()?;
    Ok(response.text()?)
}
