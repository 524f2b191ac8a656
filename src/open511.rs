//! Open511 document assembly and serialization.
//!
//! The document is built depth-first in list order and pretty-printed with a
//! two-space indent. Optional fields are omitted entirely rather than emitted
//! as empty elements.

use std::io::Write;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::Result;
use crate::types::{Camera, Point, RecurringSchedule, RoadEvent};

/// GML namespace used for point geometries.
const GML_NAMESPACE: &str = "http://www.opengis.net/gml";

/// Coordinate reference system for all geography fields.
const SRS_NAME: &str = "urn:ogc:def:crs:EPSG::4326";

/// Serialize cameras into a complete Open511 document.
pub fn camera_document(lang: &str, cameras: &[Camera]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_root_start(&mut writer, lang)?;
    writer.write_event(Event::Start(BytesStart::new("cameras")))?;
    for camera in cameras {
        write_camera(&mut writer, camera)?;
    }
    writer.write_event(Event::End(BytesEnd::new("cameras")))?;
    writer.write_event(Event::End(BytesEnd::new("open511")))?;
    Ok(String::from_utf8(writer.into_inner())?)
}

/// Serialize road events into a complete Open511 document.
pub fn event_document(lang: &str, events: &[RoadEvent]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_root_start(&mut writer, lang)?;
    writer.write_event(Event::Start(BytesStart::new("events")))?;
    for event in events {
        write_road_event(&mut writer, event)?;
    }
    writer.write_event(Event::End(BytesEnd::new("events")))?;
    writer.write_event(Event::End(BytesEnd::new("open511")))?;
    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_root_start<W: Write>(writer: &mut Writer<W>, lang: &str) -> Result<()> {
    let mut root = BytesStart::new("open511");
    root.push_attribute(("xml:lang", lang));
    root.push_attribute(("xmlns:gml", GML_NAMESPACE));
    writer.write_event(Event::Start(root))?;
    Ok(())
}

fn write_camera<W: Write>(writer: &mut Writer<W>, camera: &Camera) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("camera")))?;

    write_text_element(writer, "id", &camera.id)?;
    if !camera.name.is_empty() {
        write_text_element(writer, "name", &camera.name)?;
    }
    if let Some(name_en) = &camera.name_en {
        let mut name = BytesStart::new("name");
        name.push_attribute(("xml:lang", "en"));
        writer.write_event(Event::Start(name))?;
        writer.write_event(Event::Text(BytesText::new(name_en)))?;
        writer.write_event(Event::End(BytesEnd::new("name")))?;
    }
    write_geography(writer, &camera.position)?;
    if let Some(image_url) = &camera.image_url {
        writer.write_event(Event::Start(BytesStart::new("media_files")))?;
        let mut link = BytesStart::new("link");
        link.push_attribute(("rel", "related"));
        link.push_attribute(("href", image_url.as_str()));
        link.push_attribute(("type", "image/jpeg"));
        writer.write_event(Event::Empty(link))?;
        writer.write_event(Event::End(BytesEnd::new("media_files")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("camera")))?;
    Ok(())
}

fn write_road_event<W: Write>(writer: &mut Writer<W>, event: &RoadEvent) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("event")))?;

    write_text_element(writer, "id", &event.id)?;
    write_geography(writer, &event.position)?;
    write_text_element(writer, "status", event.status.as_str())?;
    write_text_element(writer, "event_type", event.event_type.as_str())?;
    write_text_element(writer, "severity", event.severity.as_str())?;
    if let Some(headline) = &event.headline {
        write_text_element(writer, "headline", headline)?;
    }
    if let Some(description) = &event.description {
        write_text_element(writer, "description", description)?;
    }
    if let Some(schedule) = &event.schedule {
        write_schedule(writer, schedule)?;
    }

    writer.write_event(Event::End(BytesEnd::new("event")))?;
    Ok(())
}

fn write_schedule<W: Write>(writer: &mut Writer<W>, schedule: &RecurringSchedule) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("schedule")))?;
    writer.write_event(Event::Start(BytesStart::new("recurring_schedules")))?;
    writer.write_event(Event::Start(BytesStart::new("recurring_schedule")))?;

    write_text_element(writer, "start_date", &schedule.start.to_string())?;
    if let Some(end) = &schedule.end {
        write_text_element(writer, "end_date", &end.to_string())?;
    }

    writer.write_event(Event::End(BytesEnd::new("recurring_schedule")))?;
    writer.write_event(Event::End(BytesEnd::new("recurring_schedules")))?;
    writer.write_event(Event::End(BytesEnd::new("schedule")))?;
    Ok(())
}

fn write_geography<W: Write>(writer: &mut Writer<W>, point: &Point) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("geography")))?;

    let mut gml_point = BytesStart::new("gml:Point");
    gml_point.push_attribute(("srsName", SRS_NAME));
    writer.write_event(Event::Start(gml_point))?;
    let pos = format!(
        "{} {}",
        format_coordinate(point.lon),
        format_coordinate(point.lat)
    );
    write_text_element(writer, "gml:pos", &pos)?;
    writer.write_event(Event::End(BytesEnd::new("gml:Point")))?;

    writer.write_event(Event::End(BytesEnd::new("geography")))?;
    Ok(())
}

/// Render a coordinate with at least one decimal place, so whole-degree
/// values come out as `46.0` rather than `46`.
fn format_coordinate(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EventType, Severity, Status};
    use chrono::NaiveDate;

    fn sample_event() -> RoadEvent {
        RoadEvent {
            id: "mtq.scrapers.open511.org/maj1".to_string(),
            position: Point::new(-71.2, 46.8),
            status: Status::Active,
            event_type: EventType::Construction,
            severity: Severity::Major,
            headline: Some("Travaux majeurs".to_string()),
            description: None,
            schedule: Some(RecurringSchedule {
                start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                end: None,
            }),
        }
    }

    #[test]
    fn test_event_document_structure() {
        let xml = event_document("fr", &[sample_event()]).unwrap();

        assert!(xml.starts_with(
            "<open511 xml:lang=\"fr\" xmlns:gml=\"http://www.opengis.net/gml\">"
        ));
        assert!(xml.contains("<events>"));
        assert!(xml.contains("<id>mtq.scrapers.open511.org/maj1</id>"));
        assert!(xml.contains("<status>ACTIVE</status>"));
        assert!(xml.contains("<event_type>CONSTRUCTION</event_type>"));
        assert!(xml.contains("<severity>MAJOR</severity>"));
        assert!(xml.contains("<headline>Travaux majeurs</headline>"));
        assert!(xml.contains("<gml:Point srsName=\"urn:ogc:def:crs:EPSG::4326\">"));
        assert!(xml.contains("<gml:pos>-71.2 46.8</gml:pos>"));
        assert!(xml.contains("<start_date>2020-01-01</start_date>"));
        assert!(!xml.contains("<end_date>"));
        assert!(!xml.contains("<description>"));
        assert!(xml.ends_with("</open511>"));
    }

    #[test]
    fn test_whole_degree_coordinates_keep_decimal_point() {
        let mut event = sample_event();
        event.position = Point::new(-71.0, 46.0);

        let xml = event_document("fr", &[event]).unwrap();
        assert!(xml.contains("<gml:pos>-71.0 46.0</gml:pos>"));
    }

    #[test]
    fn test_format_coordinate() {
        assert_eq!(format_coordinate(46.0), "46.0");
        assert_eq!(format_coordinate(-71.2), "-71.2");
        assert_eq!(format_coordinate(0.0), "0.0");
    }

    #[test]
    fn test_event_document_with_end_date() {
        let mut event = sample_event();
        event.schedule = Some(RecurringSchedule {
            start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2020, 3, 15),
        });

        let xml = event_document("fr", &[event]).unwrap();
        assert!(xml.contains("<end_date>2020-03-15</end_date>"));
    }

    #[test]
    fn test_event_document_escapes_text() {
        let mut event = sample_event();
        event.headline = Some("Fermeture <complète> & détour".to_string());

        let xml = event_document("fr", &[event]).unwrap();
        assert!(xml.contains("Fermeture &lt;complète&gt; &amp; détour"));
    }

    #[test]
    fn test_camera_document_structure() {
        let camera = Camera {
            id: "mtq.scrapers.open511.org/42".to_string(),
            name: "Pont est".to_string(),
            name_en: Some("Bridge east".to_string()),
            position: Point::new(-73.5, 45.5),
            image_url: Some(
                "http://www.quebec511.info/images/fr/cameras/quebec/cam/42.jpg".to_string(),
            ),
        };

        let xml = camera_document("fr", &[camera]).unwrap();
        assert!(xml.contains("<cameras>"));
        assert!(xml.contains("<id>mtq.scrapers.open511.org/42</id>"));
        assert!(xml.contains("<name>Pont est</name>"));
        assert!(xml.contains("<name xml:lang=\"en\">Bridge east</name>"));
        assert!(xml.contains("<gml:pos>-73.5 45.5</gml:pos>"));
        assert!(xml.contains("<media_files>"));
        assert!(xml.contains(
            "<link rel=\"related\" href=\"http://www.quebec511.info/images/fr/cameras/quebec/cam/42.jpg\" type=\"image/jpeg\"/>"
        ));
    }

    #[test]
    fn test_camera_document_omits_absent_fields() {
        let camera = Camera {
            id: "mtq.scrapers.open511.org/7".to_string(),
            name: "Tunnel".to_string(),
            name_en: None,
            position: Point::new(-73.5, 45.5),
            image_url: None,
        };

        let xml = camera_document("fr", &[camera]).unwrap();
        assert!(!xml.contains("xml:lang=\"en\""));
        assert!(!xml.contains("<media_files>"));
    }

    #[test]
    fn test_empty_documents() {
        let events = event_document("fr", &[]).unwrap();
        assert!(events.contains("<events>"));

        let cameras = camera_document("fr", &[]).unwrap();
        assert!(cameras.contains("<cameras>"));
    }
}
