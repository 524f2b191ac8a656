//! Core data types for the scraper.
//!
//! These types are the canonical model between the upstream map services and
//! the Open511 output document. Records live for a single run; nothing is
//! persisted.

use chrono::NaiveDate;

use crate::error::{Result, ScrapeError};

/// A WGS 84 (SRID 4326) point, longitude first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub lon: f64,
    pub lat: f64,
}

impl Point {
    #[must_use]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// Roadwork event status. The upstream site only lists active work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Active,
}

impl Status {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
        }
    }
}

/// Open511 event type. Everything scraped here is roadwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    Construction,
}

impl EventType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Construction => "CONSTRUCTION",
        }
    }
}

/// Event severity, derived from the raw record id rather than any
/// authoritative upstream field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Major,
    Moderate,
}

impl Severity {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Major => "MAJOR",
            Self::Moderate => "MODERATE",
        }
    }

    /// Derive severity from a raw upstream id.
    ///
    /// Major-roadwork records carry a `maj` prefix; everything else is
    /// treated as moderate.
    ///
    /// # Examples
    /// ```
    /// use quebec511_scraper::types::Severity;
    ///
    /// assert_eq!(Severity::from_raw_id("maj123"), Severity::Major);
    /// assert_eq!(Severity::from_raw_id("min456"), Severity::Moderate);
    /// ```
    #[must_use]
    pub fn from_raw_id(raw_id: &str) -> Self {
        if raw_id.starts_with("maj") {
            Self::Major
        } else {
            Self::Moderate
        }
    }
}

/// When a roadwork event is active: a start date and an optional end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecurringSchedule {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

/// A traffic camera, ready for emission.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Jurisdiction-prefixed id.
    pub id: String,

    /// Display name in the document language.
    pub name: String,

    /// English name variant, when the upstream lookup yields one.
    pub name_en: Option<String>,

    /// Camera position.
    pub position: Point,

    /// Still-image URL, when the detail page yielded one.
    pub image_url: Option<String>,
}

/// A roadwork event, ready for emission.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadEvent {
    /// Jurisdiction-prefixed id.
    pub id: String,

    /// Event position.
    pub position: Point,

    pub status: Status,
    pub event_type: EventType,
    pub severity: Severity,

    /// Short identification text from the detail page.
    pub headline: Option<String>,

    /// Free-text description, including location and restriction notes.
    pub description: Option<String>,

    /// Active period, when the detail page carries a start date.
    pub schedule: Option<RecurringSchedule>,
}

/// Per-item pipeline outcome: a record, or a skip with its reason.
///
/// Pipelines return one outcome per summary so the caller assembles the
/// output collection by filtering rather than by catching errors.
#[derive(Debug, Clone, PartialEq)]
pub enum Scraped<T> {
    Record(T),
    Skipped { id: String, reason: String },
}

impl<T> Scraped<T> {
    /// Unwrap the record, discarding skips.
    #[must_use]
    pub fn into_record(self) -> Option<T> {
        match self {
            Self::Record(record) => Some(record),
            Self::Skipped { .. } => None,
        }
    }

    /// True if this item was skipped.
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

/// Parse a hyphen-separated `YYYY-MM-DD` string into a date.
///
/// The string must have exactly three integer components that form a real
/// calendar date. Components may carry surrounding whitespace, as extracted
/// table cells usually do.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let parts: Vec<&str> = s.split('-').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(ScrapeError::InvalidDate(s.to_string()));
    }

    let year: i32 = parts[0]
        .parse()
        .map_err(|_| ScrapeError::InvalidDate(s.to_string()))?;
    let month: u32 = parts[1]
        .parse()
        .map_err(|_| ScrapeError::InvalidDate(s.to_string()))?;
    let day: u32 = parts[2]
        .parse()
        .map_err(|_| ScrapeError::InvalidDate(s.to_string()))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| ScrapeError::InvalidDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_from_raw_id() {
        assert_eq!(Severity::from_raw_id("maj123"), Severity::Major);
        assert_eq!(Severity::from_raw_id("min456"), Severity::Moderate);
        assert_eq!(Severity::from_raw_id("other"), Severity::Moderate);
        assert_eq!(Severity::from_raw_id(""), Severity::Moderate);
    }

    #[test]
    fn test_severity_as_str() {
        assert_eq!(Severity::Major.as_str(), "MAJOR");
        assert_eq!(Severity::Moderate.as_str(), "MODERATE");
    }

    #[test]
    fn test_parse_date_valid() {
        let date = parse_date("2012-02-12").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2012, 2, 12).unwrap());
    }

    #[test]
    fn test_parse_date_whitespace_padded() {
        let expected = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert_eq!(parse_date("\n    2020-01-01\n  ").unwrap(), expected);
        assert_eq!(parse_date(" 2020 - 01 - 01 ").unwrap(), expected);
    }

    #[test]
    fn test_parse_date_two_components() {
        assert!(matches!(
            parse_date("2012-02"),
            Err(ScrapeError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_parse_date_non_numeric() {
        assert!(parse_date("abcd-ef-gh").is_err());
        assert!(parse_date("").is_err());
        assert!(parse_date("2012-02-12-01").is_err());
    }

    #[test]
    fn test_parse_date_invalid_calendar_date() {
        assert!(parse_date("2012-02-30").is_err());
        assert!(parse_date("2012-13-01").is_err());
        assert!(parse_date("2012-00-01").is_err());
    }

    #[test]
    fn test_scraped_into_record() {
        let ok: Scraped<u32> = Scraped::Record(7);
        assert_eq!(ok.into_record(), Some(7));

        let skipped: Scraped<u32> = Scraped::Skipped {
            id: "maj1".to_string(),
            reason: "detail fetch failed".to_string(),
        };
        assert!(skipped.is_skipped());
        assert_eq!(skipped.into_record(), None);
    }
}
