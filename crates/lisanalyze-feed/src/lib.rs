//! RSS 2.0 feed generation for LIS analysis results
//!
//! Turns one [`RunReport`] into a syndication feed: one item per detected
//! event, with the event's timestamp as publish time and a stable
//! non-permalink identifier derived from file name, timestamp and event
//! text. Readers subscribing to the feed see new laboratory events as
//! they are published.

use chrono::{Duration, NaiveDateTime, Utc};
use lisanalyze_model::RunReport;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use thiserror::Error;

/// Errors from feed generation.
#[derive(Debug, Error)]
pub enum FeedError {
    /// XML writing failed
    #[error("XML error: {0}")]
    Xml(String),

    /// An event timestamp could not be parsed for the publish date
    #[error("timestamp {key:?} is not in YYYY-MM-DDTHH:MM form")]
    BadTimestamp { key: String },
}

/// Feed-level settings.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Channel and item link URL
    pub link: String,
    /// UTC offset (hours) the source timestamps are assumed to be in;
    /// feed dates are emitted in UTC
    pub tz_offset_hours: i64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            link: "https://example.invalid/lisanalyze".to_string(),
            tz_offset_hours: 8,
        }
    }
}

fn xml_err(e: impl std::fmt::Display) -> FeedError {
    FeedError::Xml(e.to_string())
}

/// Render `report` as an RSS 2.0 document.
///
/// `result_file_name` is the name of the machine-readable result file the
/// report was read from; it appears in item descriptions so a reader can
/// trace an entry back to its source.
pub fn feed_xml(
    report: &RunReport,
    result_file_name: &str,
    config: &FeedConfig,
) -> Result<String, FeedError> {
    let mut buf = Vec::new();
    let mut writer = Writer::new_with_indent(&mut buf, b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(xml_err)?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    writer.write_event(Event::Start(rss)).map_err(xml_err)?;
    writer
        .write_event(Event::Start(BytesStart::new("channel")))
        .map_err(xml_err)?;

    text_element(
        &mut writer,
        "title",
        &format!("Analysis results for file {}", report.file_name),
    )?;
    text_element(&mut writer, "link", &config.link)?;
    text_element(
        &mut writer,
        "description",
        "Experimental automated analysis of laboratory test results",
    )?;
    text_element(
        &mut writer,
        "lastBuildDate",
        &Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string(),
    )?;

    for (time, _analyte, event) in report.events() {
        writer
            .write_event(Event::Start(BytesStart::new("item")))
            .map_err(xml_err)?;
        text_element(&mut writer, "title", event)?;
        text_element(&mut writer, "link", &config.link)?;
        text_element(
            &mut writer,
            "description",
            &format!(
                "{result_file_name}: {event} detected at {time} (analysis performed at {})",
                report.analysis_time
            ),
        )?;

        let mut guid = BytesStart::new("guid");
        guid.push_attribute(("isPermaLink", "false"));
        writer.write_event(Event::Start(guid)).map_err(xml_err)?;
        writer
            .write_event(Event::Text(BytesText::new(&format!(
                "{}_{time}_{event}",
                report.file_name
            ))))
            .map_err(xml_err)?;
        writer
            .write_event(Event::End(BytesEnd::new("guid")))
            .map_err(xml_err)?;

        text_element(&mut writer, "pubDate", &pub_date(time, config.tz_offset_hours)?)?;
        writer
            .write_event(Event::End(BytesEnd::new("item")))
            .map_err(xml_err)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("channel")))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesEnd::new("rss")))
        .map_err(xml_err)?;

    String::from_utf8(buf).map_err(xml_err)
}

fn text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), FeedError> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_err)?;
    Ok(())
}

/// Event timestamps are local to the source lab; shift them to UTC for
/// the feed.
fn pub_date(time: &str, tz_offset_hours: i64) -> Result<String, FeedError> {
    let naive = NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M").map_err(|_| {
        FeedError::BadTimestamp {
            key: time.to_string(),
        }
    })?;
    let utc = naive - Duration::hours(tz_offset_hours);
    Ok(utc.format("%a, %d %b %Y %H:%M:%S GMT").to_string())
}
