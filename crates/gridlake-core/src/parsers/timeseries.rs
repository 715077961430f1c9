//! Shared time-series expansion.
//!
//! Series-shaped documents carry `TimeSeries` blocks, each with one or more
//! `Period`s (start, resolution, numbered points). Flat documents carry one
//! record per instant. Both reduce to [`Observation`]s.

use crate::parsers::document::{Document, Encoding, Node};
use crate::parsers::DocumentError;
use crate::{Period, Resolution, SettlementPeriod, TimeSeriesPoint, UtcDateTime};

/// Field names a family reads from its documents.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SeriesSchema {
    /// Candidate child paths of a series block holding its category label.
    pub label_paths: &'static [&'static [&'static str]],
    /// Candidate point fields holding the value.
    pub value_fields: &'static [&'static str],
    /// Applied when a period omits its resolution.
    pub default_resolution: Option<Resolution>,
    /// Candidate label fields of a flat record.
    pub flat_label_fields: &'static [&'static str],
    /// Candidate value fields of a flat record.
    pub flat_value_fields: &'static [&'static str],
}

/// One value at one instant, optionally tagged with a category.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Observation {
    pub timestamp: UtcDateTime,
    pub label: Option<String>,
    pub value: f64,
}

pub(crate) fn observations(
    document: &Document,
    schema: &SeriesSchema,
) -> Result<Vec<Observation>, DocumentError> {
    let series = document.root.descendants_named("TimeSeries");
    if !series.is_empty() {
        return Ok(series
            .into_iter()
            .flat_map(|block| series_observations(block, schema))
            .collect());
    }

    // XML without series blocks is an acknowledgement/no-data document.
    if document.encoding == Encoding::Xml {
        return Ok(Vec::new());
    }

    Ok(document
        .flat_records()?
        .into_iter()
        .filter_map(|record| flat_observation(record, schema))
        .collect())
}

fn series_observations(block: &Node, schema: &SeriesSchema) -> Vec<Observation> {
    let label = schema
        .label_paths
        .iter()
        .find_map(|path| series_label(block, path))
        .map(str::to_owned);

    block
        .descendants_named("Period")
        .into_iter()
        .filter_map(|node| match read_period(node, schema) {
            Ok(period) => Some(period),
            Err(error) => {
                tracing::warn!(error = %error, "skipping unreadable period");
                None
            }
        })
        .flat_map(|period| {
            period
                .points
                .iter()
                .filter_map(|point| match period.timestamp_at(point.position) {
                    Some(timestamp) => Some(Observation {
                        timestamp,
                        label: label.clone(),
                        value: point.quantity,
                    }),
                    None => {
                        tracing::warn!(
                            position = point.position,
                            resolution = %period.resolution,
                            "skipping point outside the representable time range"
                        );
                        None
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

fn series_label<'a>(block: &'a Node, path: &[&str]) -> Option<&'a str> {
    match path {
        [single] => block.field(&[*single]).or_else(|| block.find_text(single)),
        _ => block.path(path).and_then(Node::text),
    }
}

pub(crate) fn read_period(node: &Node, schema: &SeriesSchema) -> Result<Period, DocumentError> {
    let start_text = node
        .path(&["timeInterval", "start"])
        .and_then(Node::text)
        .or_else(|| node.find_text("start"))
        .ok_or(DocumentError::MissingField { field: "start" })?;
    let start = UtcDateTime::parse(start_text)?;

    let resolution = match node.find_text("resolution") {
        Some(token) => token.parse::<Resolution>()?,
        None => schema
            .default_resolution
            .ok_or(DocumentError::MissingField { field: "resolution" })?,
    };

    let points = node
        .descendants_named("Point")
        .into_iter()
        .filter_map(|point| read_point(point, schema.value_fields))
        .collect();

    Ok(Period::new(start, resolution, points))
}

fn read_point(point: &Node, value_fields: &[&str]) -> Option<TimeSeriesPoint> {
    let position = point.field(&["position"])?.trim().parse::<u32>().ok()?;
    let value = parse_number(point.field(value_fields)?)?;
    TimeSeriesPoint::new(position, value).ok()
}

fn flat_observation(record: &Node, schema: &SeriesSchema) -> Option<Observation> {
    let timestamp = flat_timestamp(record)?;
    let value = parse_number(record.field(schema.flat_value_fields)?)?;
    Some(Observation {
        timestamp,
        label: record.field(schema.flat_label_fields).map(str::to_owned),
        value,
    })
}

/// `startTime` (or `timeFrom`) when present, otherwise the start of
/// `settlementPeriod` on `settlementDate`.
pub(crate) fn flat_timestamp(record: &Node) -> Option<UtcDateTime> {
    if let Some(start) = record.field(&["startTime", "timeFrom"]) {
        return UtcDateTime::parse(start).ok();
    }
    let (day, period) = settlement_slot(record)?;
    day.plus_minutes(period.start_offset_minutes())
}

/// `settlementDate` at midnight plus the parsed `settlementPeriod`.
pub(crate) fn settlement_slot(record: &Node) -> Option<(UtcDateTime, SettlementPeriod)> {
    let day = UtcDateTime::parse(record.field(&["settlementDate"])?).ok()?;
    let period = record
        .field(&["settlementPeriod"])?
        .trim()
        .parse::<u32>()
        .ok()
        .and_then(|value| SettlementPeriod::new(value).ok())?;
    Some((day, period))
}

/// Finite number, or `None`.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: SeriesSchema = SeriesSchema {
        label_paths: &[&["MktPSRType", "psrType"]],
        value_fields: &["quantity"],
        default_resolution: None,
        flat_label_fields: &["fuelType"],
        flat_value_fields: &["quantity"],
    };

    #[test]
    fn expands_period_points_from_start_and_resolution() {
        let doc = Document::parse(
            r#"<Doc><TimeSeries><MktPSRType><psrType>B16</psrType></MktPSRType>
               <Period><timeInterval><start>2024-01-15T00:00Z</start></timeInterval>
               <resolution>PT15M</resolution>
               <Point><position>1</position><quantity>10</quantity></Point>
               <Point><position>4</position><quantity>40</quantity></Point>
               </Period></TimeSeries></Doc>"#,
        )
        .expect("valid xml");

        let observed = observations(&doc, &SCHEMA).expect("parses");
        assert_eq!(observed.len(), 2);
        assert_eq!(observed[0].timestamp.format_rfc3339(), "2024-01-15T00:00:00Z");
        assert_eq!(observed[1].timestamp.format_rfc3339(), "2024-01-15T00:45:00Z");
        assert_eq!(observed[1].label.as_deref(), Some("B16"));
    }

    #[test]
    fn flat_record_without_start_time_uses_settlement_period() {
        let doc = Document::parse(
            r#"{"data":[{"settlementDate":"2023-07-18","settlementPeriod":3,"fuelType":"WIND","quantity":"512.5"}]}"#,
        )
        .expect("valid json");

        let observed = observations(&doc, &SCHEMA).expect("parses");
        assert_eq!(observed.len(), 1);
        assert_eq!(observed[0].timestamp.format_rfc3339(), "2023-07-18T01:00:00Z");
        assert_eq!(observed[0].label.as_deref(), Some("WIND"));
        assert_eq!(observed[0].value, 512.5);
    }

    #[test]
    fn points_with_bad_values_are_skipped() {
        let doc = Document::parse(
            r#"<Doc><TimeSeries><Period><timeInterval><start>2024-01-15T00:00Z</start></timeInterval>
               <resolution>PT60M</resolution>
               <Point><position>1</position><quantity>n/a</quantity></Point>
               <Point><position>2</position><quantity>7</quantity></Point>
               </Period></TimeSeries></Doc>"#,
        )
        .expect("valid xml");

        let observed = observations(&doc, &SCHEMA).expect("parses");
        assert_eq!(observed.len(), 1);
        assert_eq!(observed[0].timestamp.format_rfc3339(), "2024-01-15T01:00:00Z");
        assert_eq!(observed[0].label, None);
    }

    #[test]
    fn parse_number_rejects_non_finite() {
        assert_eq!(parse_number(" 12.5 "), Some(12.5));
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }
}
