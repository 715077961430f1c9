//! Behavior-driven tests for document parsing.
//!
//! These tests verify HOW raw ENTSO-E and BMRS documents become normalized
//! records, including timestamp reconstruction and malformed input.

use gridlake_core::parsers::{
    parse_bid_offer, parse_generation, parse_load, parse_outages, parse_physical_notifications,
    parse_prices,
};
use gridlake_core::{DocumentFamily, Resolution, UtcDateTime};
use gridlake_tests::fixtures;

fn ts(value: &str) -> UtcDateTime {
    UtcDateTime::parse(value).expect("valid timestamp")
}

// =============================================================================
// Series documents
// =============================================================================

#[test]
fn when_generation_has_two_series_parser_emits_four_points_per_fuel() {
    // Given: Two TimeSeries blocks (B16, B19), one PT30M period of four points each
    let raw = fixtures::GENERATION_TWO_SERIES_XML;

    // When: The document is parsed
    let records = parse_generation(raw);

    // Then: 8 records across two categories, 30 minutes apart from the period start
    assert_eq!(records.len(), 8);
    for (fuel, chunk) in [("B16", &records[..4]), ("B19", &records[4..])] {
        let expected = [
            "2024-01-15T00:00:00Z",
            "2024-01-15T00:30:00Z",
            "2024-01-15T01:00:00Z",
            "2024-01-15T01:30:00Z",
        ];
        for (record, timestamp) in chunk.iter().zip(expected) {
            assert_eq!(record.fuel_type, fuel);
            assert_eq!(record.timestamp_utc.format_rfc3339(), timestamp);
        }
    }
    assert_eq!(records[7].generation_mw, 8411.0);
}

#[test]
fn when_prices_are_hourly_timestamps_step_by_one_hour() {
    let records = parse_prices(fixtures::PRICES_XML);

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].timestamp_utc, ts("2024-01-14T23:00:00Z"));
    assert_eq!(records[2].timestamp_utc, ts("2024-01-15T01:00:00Z"));
    assert_eq!(records[2].price_eur_per_mwh, -3.5);
}

#[test]
fn when_physical_notification_omits_resolution_half_hour_is_assumed() {
    let records = parse_physical_notifications(fixtures::PHYSICAL_NOTIFICATIONS_XML);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].bm_unit_id, "T_WBURB-1");
    assert_eq!(
        Some(records[1].timestamp_utc),
        ts("2024-01-15T00:00:00Z").plus_minutes(i64::from(Resolution::HALF_HOUR.minutes()))
    );
    assert_eq!(records[1].notification_mw, 420.0);
}

#[test]
fn when_entsoe_acknowledges_no_data_parser_returns_nothing() {
    assert!(parse_prices(fixtures::ACKNOWLEDGEMENT_XML).is_empty());
    assert!(parse_generation(fixtures::ACKNOWLEDGEMENT_XML).is_empty());
}

// =============================================================================
// Flat JSON records
// =============================================================================

#[test]
fn when_public_generation_is_flat_json_start_time_and_fuel_are_read() {
    let records = parse_generation(fixtures::PUBLIC_GENERATION_JSON);

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].fuel_type, "Wind Onshore");
    assert_eq!(records[0].generation_mw, 5021.4);
    assert_eq!(records[2].timestamp_utc, ts("2024-01-15T00:30:00Z"));
}

#[test]
fn when_flat_load_lacks_start_time_settlement_period_start_is_used() {
    let records = parse_load(fixtures::PUBLIC_LOAD_JSON);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].timestamp_utc, ts("2023-07-18T00:00:00Z"));
    assert_eq!(records[1].timestamp_utc, ts("2023-07-18T23:30:00Z"));
}

#[test]
fn when_response_holds_one_record_its_dataset_field_does_not_hide_it() {
    // Given: A public BMRS body with a single record tagged with its dataset
    let raw = r#"{"data":[{"dataset":"B1610","startTime":"2024-01-15T00:00:00Z","quantity":25000}]}"#;

    // When: The document is parsed as load
    let records = parse_load(raw);

    // Then: The record itself is read, not its dataset field
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].timestamp_utc, ts("2024-01-15T00:00:00Z"));
    assert_eq!(records[0].load_mw, 25000.0);
}

#[test]
fn when_bid_offer_levels_are_parsed_timestamp_is_period_midpoint() {
    let records = parse_bid_offer(fixtures::BID_OFFER_JSON);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].timestamp_utc, ts("2024-01-15T00:45:00Z"));
    assert_eq!(records[0].bm_unit_id, "T_ABC-1");
    assert_eq!(records[0].bid_price_gbp_per_mwh, Some(-20.5));
    assert_eq!(records[1].timestamp_utc, ts("2024-01-15T00:15:00Z"));
}

#[test]
fn when_outage_fields_are_missing_they_stay_empty() {
    let records = parse_outages(fixtures::OUTAGES_XML);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].outage_start_utc, Some(ts("2024-01-20T06:00:00Z")));
    assert_eq!(records[0].unavailable_capacity_mw, Some(660.0));
    assert_eq!(records[1].outage_end_utc, None);
    assert_eq!(records[1].unavailable_capacity_mw, None);
    assert_eq!(records[1].outage_type, None);
}

// =============================================================================
// Malformed input and tabular output
// =============================================================================

#[test]
fn when_document_is_truncated_every_family_returns_empty() {
    let truncated = &fixtures::GENERATION_TWO_SERIES_XML[..200];
    for family in DocumentFamily::ALL {
        assert!(family.parse(truncated).is_empty(), "{family} should yield nothing");
        assert!(family.parse("not a document").is_empty());
    }
}

#[test]
fn when_table_is_normalized_rows_sort_by_time_then_fuel() {
    let mut table = DocumentFamily::Generation.parse(fixtures::GENERATION_TWO_SERIES_XML);
    table.append(DocumentFamily::Generation.parse(fixtures::GENERATION_TWO_SERIES_XML));
    table.normalize();

    assert_eq!(table.len(), 8);
    assert_eq!(
        table.rows()[1],
        vec!["2024-01-15T00:00:00Z", "B19", "Wind Onshore", "8123"]
    );
}

#[test]
fn when_outages_are_normalized_rows_sort_by_start_then_unit() {
    let mut table = DocumentFamily::Outage.parse(fixtures::OUTAGES_XML);
    table.normalize();

    assert_eq!(table.rows()[0][0], "T_DRAXX-2");
    assert_eq!(table.rows()[0][2], "");
    assert_eq!(table.rows()[1][0], "T_HEYM27");
}
