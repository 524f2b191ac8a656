//! Camera pipeline: localized list fetches and image-URL extraction.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use reqwest::blocking::Client;

use crate::config::{ScraperConfig, ACTION_CAMERA};
use crate::error::{Result, ScrapeError};
use crate::http::fetch_text;
use crate::list::{fetch_summaries, Summary};
use crate::types::{Camera, Point, Scraped};

/// Still-image URL as embedded in the camera detail pages.
#[allow(clippy::expect_used)]
static IMAGE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"http://www\.quebec511\.info/images/fr/cameras/[^/]+/cam/\d+\.jpg")
        .expect("valid regex")
});

/// Scrape all traffic cameras.
///
/// The French list is the master; a second fetch with `lang=en` provides the
/// optional English name variants. A camera whose detail page cannot be
/// fetched or carries no image URL becomes [`Scraped::Skipped`].
pub fn scrape_cameras(client: &Client, config: &ScraperConfig) -> Result<Vec<Scraped<Camera>>> {
    let summaries = fetch_summaries(
        client,
        &config.camera_list_url,
        ACTION_CAMERA,
        Some(config.lang.as_str()),
        &config.bounds,
    )?;
    let english_names = fetch_english_names(client, config)?;

    tracing::info!(count = summaries.len(), "fetched camera summaries");

    let mut outcomes = Vec::with_capacity(summaries.len());
    for summary in &summaries {
        match fetch_image_url(client, config, &summary.id) {
            Ok(image_url) => outcomes.push(Scraped::Record(build_camera(
                config,
                summary,
                &english_names,
                Some(image_url),
            ))),
            Err(e) => {
                tracing::warn!(id = %summary.id, error = %e, "couldn't fetch image for camera");
                outcomes.push(Scraped::Skipped {
                    id: summary.id.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }
    Ok(outcomes)
}

/// Fetch the English-language list and index display names by id.
fn fetch_english_names(client: &Client, config: &ScraperConfig) -> Result<HashMap<String, String>> {
    let summaries = fetch_summaries(
        client,
        &config.camera_list_url,
        ACTION_CAMERA,
        Some("en"),
        &config.bounds,
    )?;
    Ok(summaries.into_iter().map(|s| (s.id, s.info)).collect())
}

/// Fetch a camera's detail page and extract the still-image URL.
pub fn fetch_image_url(client: &Client, config: &ScraperConfig, id: &str) -> Result<String> {
    let url = config.camera_detail_url(id);
    let body = fetch_text(client, &url).map_err(|e| match e {
        ScrapeError::Http(source) => ScrapeError::DetailFetch {
            id: id.to_string(),
            source,
        },
        other => other,
    })?;
    extract_image_url(id, &body)
}

/// Find the still-image URL in a detail page body.
pub fn extract_image_url(id: &str, body: &str) -> Result<String> {
    IMAGE_URL
        .find(body)
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ScrapeError::MissingImageUrl(id.to_string()))
}

/// Assemble a camera record from its summary and lookups.
///
/// An id absent from the English-name map, or mapped to an empty string,
/// simply means no localized name.
#[must_use]
pub fn build_camera(
    config: &ScraperConfig,
    summary: &Summary,
    english_names: &HashMap<String, String>,
    image_url: Option<String>,
) -> Camera {
    Camera {
        id: config.namespaced_id(&summary.id),
        name: summary.info.clone(),
        name_en: english_names
            .get(&summary.id)
            .filter(|name| !name.is_empty())
            .cloned(),
        position: Point::new(summary.lng, summary.lat),
        image_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn summary(id: &str, info: &str) -> Summary {
        Summary {
            id: id.to_string(),
            lat: 46.8,
            lng: -71.2,
            info: info.to_string(),
        }
    }

    #[test]
    fn test_extract_image_url() {
        let body = r#"<html><img src="http://www.quebec511.info/images/fr/cameras/quebec/cam/123.jpg" /></html>"#;
        assert_eq!(
            extract_image_url("123", body).unwrap(),
            "http://www.quebec511.info/images/fr/cameras/quebec/cam/123.jpg"
        );
    }

    #[test]
    fn test_extract_image_url_missing() {
        let err = extract_image_url("123", "<html>no image here</html>").unwrap_err();
        assert!(matches!(err, ScrapeError::MissingImageUrl(_)));
    }

    #[test]
    fn test_build_camera_with_english_name() {
        let config = ScraperConfig::default();
        let mut names = HashMap::new();
        names.insert("42".to_string(), "Bridge east".to_string());

        let camera = build_camera(&config, &summary("42", "Pont est"), &names, None);
        assert_eq!(camera.id, "mtq.scrapers.open511.org/42");
        assert_eq!(camera.name, "Pont est");
        assert_eq!(camera.name_en.as_deref(), Some("Bridge east"));
        assert_eq!(camera.position, Point::new(-71.2, 46.8));
    }

    #[test]
    fn test_build_camera_missing_english_name_is_not_fatal() {
        let config = ScraperConfig::default();
        let camera = build_camera(&config, &summary("42", "Pont est"), &HashMap::new(), None);
        assert_eq!(camera.name_en, None);
    }

    #[test]
    fn test_build_camera_empty_english_name_omitted() {
        let config = ScraperConfig::default();
        let mut names = HashMap::new();
        names.insert("42".to_string(), String::new());

        let camera = build_camera(&config, &summary("42", "Pont est"), &names, None);
        assert_eq!(camera.name_en, None);
    }
}
