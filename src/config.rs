//! Scraper configuration: upstream URLs, query bounds, and pacing.
//!
//! Everything the fetchers need is carried explicitly in a [`ScraperConfig`]
//! so there are no module-level mutable defaults; tests swap in a mock
//! server's URLs and a zero-interval pacing policy.

use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Roadwork list endpoint (JSON).
pub const ROADWORK_LIST_URL: &str = "http://quebec511.info/fr/Carte/Element.ashx";

/// Roadwork detail page prefix; the record id is appended.
pub const ROADWORK_DETAIL_URL: &str =
    "http://quebec511.info/fr/Carte/Fenetres/FenetreTravailRoutier.aspx?id=";

/// Camera list endpoint (JSON).
pub const CAMERA_LIST_URL: &str = "http://carte.quebec511.gouv.qc.ca/fr/Element.ashx";

/// Camera detail page prefix; the camera id is appended.
pub const CAMERA_DETAIL_URL: &str =
    "http://carte.quebec511.gouv.qc.ca/fr/Fenetres/FenetreCamera.aspx?id=";

/// Jurisdiction namespace prepended to every record id before emission.
pub const JURISDICTION_ID: &str = "mtq.scrapers.open511.org";

/// List action for major roadwork.
pub const ACTION_CHANTIER_MAJEUR: &str = "Chantier.Majeur";

/// List action for minor roadwork.
pub const ACTION_CHANTIER_MINEUR: &str = "Chantier.Mineur";

/// List action for traffic cameras.
pub const ACTION_CAMERA: &str = "Camera";

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Default delay between roadwork detail fetches (milliseconds).
pub const DETAIL_FETCH_DELAY_MS: u64 = 500;

/// A geographic query region (xMin, yMin, xMax, yMax).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

/// Bounds covering all of Québec.
pub const QUEBEC_BOUNDS: BoundingBox = BoundingBox {
    x_min: -79.9,
    y_min: 44.4,
    x_max: -53.4,
    y_max: 62.5,
};

impl BoundingBox {
    /// Render the bounds as list-endpoint query parameters.
    #[must_use]
    pub fn query_params(&self) -> [(&'static str, String); 4] {
        [
            ("xMin", self.x_min.to_string()),
            ("yMin", self.y_min.to_string()),
            ("xMax", self.x_max.to_string()),
            ("yMax", self.y_max.to_string()),
        ]
    }
}

/// Pacing policy applied between consecutive detail fetches.
///
/// The upstream service is not rate-limited, so this is a courtesy measure:
/// a fixed interval with optional jitter on top.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    /// Base delay between requests.
    pub interval: Duration,

    /// Upper bound for extra random delay, if any.
    pub jitter: Option<Duration>,
}

impl Pacing {
    /// A pacing policy with a fixed interval and no jitter.
    #[must_use]
    pub fn fixed(interval: Duration) -> Self {
        Self {
            interval,
            jitter: None,
        }
    }

    /// A policy that never sleeps (used in tests).
    #[must_use]
    pub fn none() -> Self {
        Self::fixed(Duration::ZERO)
    }

    /// Compute the delay for the next pause.
    #[must_use]
    pub fn delay(&self) -> Duration {
        match self.jitter {
            Some(jitter) if !jitter.is_zero() => {
                // Subsecond clock nanos are random enough for a courtesy delay.
                let nanos = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .unwrap_or_default()
                    .subsec_nanos();
                self.interval + Duration::from_nanos(u64::from(nanos) % jitter.as_nanos() as u64)
            }
            _ => self.interval,
        }
    }

    /// Sleep for the computed delay.
    pub fn pause(&self) {
        let delay = self.delay();
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::fixed(Duration::from_millis(DETAIL_FETCH_DELAY_MS))
    }
}

/// Configuration threaded into every fetcher.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Roadwork list endpoint.
    pub roadwork_list_url: String,

    /// Roadwork detail page prefix (id appended).
    pub roadwork_detail_base: String,

    /// Camera list endpoint.
    pub camera_list_url: String,

    /// Camera detail page prefix (id appended).
    pub camera_detail_base: String,

    /// Jurisdiction namespace for emitted ids.
    pub jurisdiction: String,

    /// Geographic query region.
    pub bounds: BoundingBox,

    /// Pacing between detail fetches.
    pub pacing: Pacing,

    /// Language attribute of the emitted document.
    pub lang: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            roadwork_list_url: ROADWORK_LIST_URL.to_string(),
            roadwork_detail_base: ROADWORK_DETAIL_URL.to_string(),
            camera_list_url: CAMERA_LIST_URL.to_string(),
            camera_detail_base: CAMERA_DETAIL_URL.to_string(),
            jurisdiction: JURISDICTION_ID.to_string(),
            bounds: QUEBEC_BOUNDS,
            pacing: Pacing::default(),
            lang: "fr".to_string(),
        }
    }
}

impl ScraperConfig {
    /// Build the detail page URL for a roadwork record.
    #[must_use]
    pub fn roadwork_detail_url(&self, id: &str) -> String {
        format!("{}{id}", self.roadwork_detail_base)
    }

    /// Build the detail page URL for a camera.
    #[must_use]
    pub fn camera_detail_url(&self, id: &str) -> String {
        format!("{}{id}", self.camera_detail_base)
    }

    /// Prefix a raw upstream id with the jurisdiction namespace.
    ///
    /// # Examples
    /// ```
    /// use quebec511_scraper::config::ScraperConfig;
    ///
    /// let config = ScraperConfig::default();
    /// assert_eq!(config.namespaced_id("maj1"), "mtq.scrapers.open511.org/maj1");
    /// ```
    #[must_use]
    pub fn namespaced_id(&self, raw_id: &str) -> String {
        format!("{}/{raw_id}", self.jurisdiction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_query_params() {
        let params = QUEBEC_BOUNDS.query_params();
        assert_eq!(params[0], ("xMin", "-79.9".to_string()));
        assert_eq!(params[1], ("yMin", "44.4".to_string()));
        assert_eq!(params[2], ("xMax", "-53.4".to_string()));
        assert_eq!(params[3], ("yMax", "62.5".to_string()));
    }

    #[test]
    fn test_detail_urls() {
        let config = ScraperConfig::default();
        assert_eq!(
            config.roadwork_detail_url("maj123"),
            "http://quebec511.info/fr/Carte/Fenetres/FenetreTravailRoutier.aspx?id=maj123"
        );
        assert_eq!(
            config.camera_detail_url("42"),
            "http://carte.quebec511.gouv.qc.ca/fr/Fenetres/FenetreCamera.aspx?id=42"
        );
    }

    #[test]
    fn test_namespaced_id() {
        let config = ScraperConfig::default();
        assert_eq!(config.namespaced_id("min456"), "mtq.scrapers.open511.org/min456");
    }

    #[test]
    fn test_pacing_fixed_delay() {
        let pacing = Pacing::fixed(Duration::from_millis(500));
        assert_eq!(pacing.delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_pacing_jitter_bounds() {
        let pacing = Pacing {
            interval: Duration::from_millis(100),
            jitter: Some(Duration::from_millis(50)),
        };
        for _ in 0..10 {
            let delay = pacing.delay();
            assert!(delay >= Duration::from_millis(100));
            assert!(delay < Duration::from_millis(150));
        }
    }

    #[test]
    fn test_pacing_none_never_sleeps() {
        let pacing = Pacing::none();
        assert_eq!(pacing.delay(), Duration::ZERO);
        pacing.pause();
    }
}
