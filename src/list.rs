//! Wire adapter for the JSON list endpoints.
//!
//! The list response schema is upstream-controlled and unversioned, so every
//! field name and type quirk is isolated here. Ids and coordinates arrive as
//! either strings or numbers depending on the endpoint.

use reqwest::blocking::Client;
use serde::{Deserialize, Deserializer};

use crate::config::BoundingBox;
use crate::error::{Result, ScrapeError};
use crate::http::fetch_text_with_query;

/// One entry from a list endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Summary {
    /// Raw upstream id (not yet jurisdiction-prefixed).
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    /// Latitude.
    #[serde(deserialize_with = "float_or_string")]
    pub lat: f64,

    /// Longitude.
    #[serde(deserialize_with = "float_or_string")]
    pub lng: f64,

    /// Display text; the camera list carries the localized camera name here.
    #[serde(default)]
    pub info: String,
}

/// Accept a JSON string or number and render it as a string.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
    })
}

/// Accept a JSON number or a numeric string.
fn float_or_string<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Float(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Float(f) => Ok(f),
        Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

/// Parse a list-endpoint response body.
///
/// `url` is carried only for error context.
pub fn parse_summaries(url: &str, body: &str) -> Result<Vec<Summary>> {
    serde_json::from_str(body).map_err(|source| ScrapeError::Json {
        url: url.to_string(),
        source,
    })
}

/// Fetch a list of summaries from a list endpoint.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `url` - List endpoint URL
/// * `action` - Category discriminator (`Chantier.Majeur`, `Camera`, ...)
/// * `lang` - Optional `lang` parameter (camera list only)
/// * `bounds` - Geographic query region
pub fn fetch_summaries(
    client: &Client,
    url: &str,
    action: &str,
    lang: Option<&str>,
    bounds: &BoundingBox,
) -> Result<Vec<Summary>> {
    let body = fetch_list_body(client, url, action, lang, bounds)?;
    parse_summaries(url, &body)
}

/// Fetch a list of summaries, treating a malformed JSON body as empty.
///
/// Transport failures still propagate; only parse failures are downgraded.
/// This is the roadwork pipeline's behavior.
pub fn fetch_summaries_lenient(
    client: &Client,
    url: &str,
    action: &str,
    lang: Option<&str>,
    bounds: &BoundingBox,
) -> Result<Vec<Summary>> {
    let body = fetch_list_body(client, url, action, lang, bounds)?;
    match parse_summaries(url, &body) {
        Ok(summaries) => Ok(summaries),
        Err(e) => {
            tracing::error!(url, action, error = %e, "could not load JSON, treating as empty");
            Ok(Vec::new())
        }
    }
}

fn fetch_list_body(
    client: &Client,
    url: &str,
    action: &str,
    lang: Option<&str>,
    bounds: &BoundingBox,
) -> Result<String> {
    let mut query: Vec<(&str, String)> = vec![("action", action.to_string())];
    if let Some(lang) = lang {
        query.push(("lang", lang.to_string()));
    }
    query.extend(bounds.query_params());
    fetch_text_with_query(client, url, &query)
}
