//! # Domain Types
//!
//! Time-series building blocks shared by request planning and parsing.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`QueryWindow`] | Inclusive calendar-day range of an extraction |
//! | [`Resolution`] | Point spacing parsed from `PT15M`, `PT1H`, ... |
//! | [`Period`] | Start time, resolution and points of a series block |
//! | [`SettlementPeriod`] | GB half-hour slot, 1 to 48 |
//! | [`RawPayload`] | Response body plus its relative output path |
//! | [`UtcDateTime`] | UTC timestamp with lenient parsing |
//!
//! The record types (`GenerationRecord`, `PriceRecord`, ...) are the
//! normalized rows the parsers emit, one type per document family.

mod models;
mod resolution;
mod timestamp;
mod window;

pub use models::{
    BidOfferRecord, FlowRecord, GenerationRecord, LoadRecord, OutageRecord, Period,
    PhysicalNotificationRecord, PriceRecord, RawPayload, RegisteredCapacityRecord,
    SettlementPeriod, SettlementPeriodRange, TimeSeriesPoint, SETTLEMENT_PERIODS_PER_DAY,
};
pub use resolution::Resolution;
pub use timestamp::{format_iso_date, parse_iso_date, UtcDateTime};
pub use window::QueryWindow;
