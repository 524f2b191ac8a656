//! Roadwork pipeline: list fetch, paced detail fetches, field extraction.

use std::sync::LazyLock;

use reqwest::blocking::Client;
use scraper::{Html, Selector};

use crate::config::{ScraperConfig, ACTION_CHANTIER_MAJEUR, ACTION_CHANTIER_MINEUR};
use crate::error::{Result, ScrapeError};
use crate::extract::select_text;
use crate::http::fetch_text;
use crate::list::{fetch_summaries_lenient, Summary};
use crate::types::{
    parse_date, EventType, Point, RecurringSchedule, RoadEvent, Scraped, Severity, Status,
};

#[allow(clippy::expect_used)]
static HEADLINE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#tdIdentification").expect("valid selector"));

#[allow(clippy::expect_used)]
static DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#tdDescriptionEntrave,#tdDetail").expect("valid selector"));

#[allow(clippy::expect_used)]
static LOCALISATION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#tdLocalisation").expect("valid selector"));

#[allow(clippy::expect_used)]
static RESTRICTIONS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#tdRestrictionCamionnage").expect("valid selector"));

#[allow(clippy::expect_used)]
static START_DATE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#tdDebut").expect("valid selector"));

#[allow(clippy::expect_used)]
static END_DATE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#tdFin").expect("valid selector"));

/// Scrape all roadwork records (major, then minor).
///
/// A malformed list body yields an empty list for that action. Per-record
/// detail-fetch or extraction failures become [`Scraped::Skipped`] outcomes;
/// malformed dates abort the run.
pub fn scrape_roadwork(client: &Client, config: &ScraperConfig) -> Result<Vec<Scraped<RoadEvent>>> {
    let mut summaries = fetch_summaries_lenient(
        client,
        &config.roadwork_list_url,
        ACTION_CHANTIER_MAJEUR,
        None,
        &config.bounds,
    )?;
    summaries.extend(fetch_summaries_lenient(
        client,
        &config.roadwork_list_url,
        ACTION_CHANTIER_MINEUR,
        None,
        &config.bounds,
    )?);

    tracing::info!(count = summaries.len(), "fetched roadwork summaries");

    let mut outcomes = Vec::with_capacity(summaries.len());
    for summary in &summaries {
        match scrape_event(client, config, summary) {
            Ok(event) => outcomes.push(Scraped::Record(event)),
            Err(e @ ScrapeError::InvalidDate(_)) => return Err(e),
            Err(e) => {
                tracing::warn!(id = %summary.id, error = %e, "skipping roadwork record");
                outcomes.push(Scraped::Skipped {
                    id: summary.id.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }
    Ok(outcomes)
}

/// Fetch one record's detail page and build the event.
fn scrape_event(client: &Client, config: &ScraperConfig, summary: &Summary) -> Result<RoadEvent> {
    let url = config.roadwork_detail_url(&summary.id);
    let html = fetch_text(client, &url).map_err(|e| match e {
        ScrapeError::Http(source) => ScrapeError::DetailFetch {
            id: summary.id.clone(),
            source,
        },
        other => other,
    })?;
    config.pacing.pause();

    event_from_detail(config, summary, &html)
}

/// Build a road event from a summary and its detail page HTML.
pub fn event_from_detail(
    config: &ScraperConfig,
    summary: &Summary,
    detail_html: &str,
) -> Result<RoadEvent> {
    let fragment = Html::parse_fragment(detail_html);

    let headline = select_text(&fragment, &HEADLINE);

    let mut description = select_text(&fragment, &DESCRIPTION);
    let affected_roads = select_text(&fragment, &LOCALISATION);
    let traffic_restrictions = select_text(&fragment, &RESTRICTIONS);
    if !affected_roads.is_empty() {
        description.push_str("\n\nLocalisation: ");
        description.push_str(&affected_roads);
    }
    if !traffic_restrictions.is_empty() {
        description.push_str("\n\nRestrictions: ");
        description.push_str(&traffic_restrictions);
    }

    let start_date = select_text(&fragment, &START_DATE);
    let start_date = start_date.trim();
    let end_date = select_text(&fragment, &END_DATE);
    let end_date = end_date.trim();
    let schedule = if start_date.is_empty() {
        None
    } else {
        let start = parse_date(start_date)?;
        let end = if end_date.is_empty() {
            None
        } else {
            Some(parse_date(end_date)?)
        };
        Some(RecurringSchedule { start, end })
    };

    Ok(RoadEvent {
        id: config.namespaced_id(&summary.id),
        position: Point::new(summary.lng, summary.lat),
        status: Status::Active,
        event_type: EventType::Construction,
        severity: Severity::from_raw_id(&summary.id),
        headline: non_empty(headline),
        description: non_empty(description),
        schedule,
    })
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
