use serde::{Deserialize, Serialize};

use crate::{Resolution, UtcDateTime, ValidationError};

/// Number of half-hour settlement periods in a GB trading day.
pub const SETTLEMENT_PERIODS_PER_DAY: u32 = 48;

/// Raw response body captured by a connector, addressed by a self-describing
/// relative path such as `generation_per_type/2024-01-15.xml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPayload {
    pub payload: String,
    pub source_name: String,
    pub logical_path: String,
}

impl RawPayload {
    /// Returns `None` for blank bodies, which are never persisted.
    pub fn new(
        payload: impl Into<String>,
        source_name: impl Into<String>,
        logical_path: impl Into<String>,
    ) -> Option<Self> {
        let payload = payload.into();
        if payload.trim().is_empty() {
            return None;
        }
        Some(Self {
            payload,
            source_name: source_name.into(),
            logical_path: logical_path.into(),
        })
    }
}

/// A numbered slot within a [`Period`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub position: u32,
    pub quantity: f64,
}

impl TimeSeriesPoint {
    pub fn new(position: u32, quantity: f64) -> Result<Self, ValidationError> {
        if position == 0 {
            return Err(ValidationError::InvalidPosition { value: position });
        }
        validate_finite("quantity", quantity)?;
        Ok(Self { position, quantity })
    }
}

/// Start time, spacing and the points of one block of a time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub start: UtcDateTime,
    pub resolution: Resolution,
    pub points: Vec<TimeSeriesPoint>,
}

impl Period {
    pub fn new(start: UtcDateTime, resolution: Resolution, points: Vec<TimeSeriesPoint>) -> Self {
        Self {
            start,
            resolution,
            points,
        }
    }

    /// Absolute timestamp of the point at `position` (1-based), `None` when
    /// the offset leaves the representable range.
    pub fn timestamp_at(&self, position: u32) -> Option<UtcDateTime> {
        self.resolution
            .offset_minutes(position)
            .and_then(|minutes| self.start.plus_minutes(minutes))
    }
}

/// One 30-minute slot of a GB trading day, numbered 1 to 48.
///
/// Day boundaries are not adjusted for clock changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct SettlementPeriod(u32);

impl SettlementPeriod {
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if !(1..=SETTLEMENT_PERIODS_PER_DAY).contains(&value) {
            return Err(ValidationError::InvalidSettlementPeriod { value });
        }
        Ok(Self(value))
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    pub fn start_offset_minutes(self) -> i64 {
        i64::from(self.0 - 1) * 30
    }

    pub fn midpoint_offset_minutes(self) -> i64 {
        i64::from(self.0) * 30 - 15
    }
}

impl TryFrom<u32> for SettlementPeriod {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SettlementPeriod> for u32 {
    fn from(value: SettlementPeriod) -> Self {
        value.0
    }
}

/// Inclusive bounds sent as `settlementPeriodFrom` / `settlementPeriodTo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementPeriodRange {
    pub from: SettlementPeriod,
    pub to: SettlementPeriod,
}

impl SettlementPeriodRange {
    pub fn new(from: u32, to: u32) -> Result<Self, ValidationError> {
        let (from_period, to_period) = (SettlementPeriod::new(from)?, SettlementPeriod::new(to)?);
        if from_period > to_period {
            return Err(ValidationError::EmptySettlementRange { from, to });
        }
        Ok(Self {
            from: from_period,
            to: to_period,
        })
    }

    pub fn periods(&self) -> impl Iterator<Item = SettlementPeriod> {
        (self.from.get()..=self.to.get()).map(SettlementPeriod)
    }
}

impl Default for SettlementPeriodRange {
    fn default() -> Self {
        Self {
            from: SettlementPeriod(1),
            to: SettlementPeriod(SETTLEMENT_PERIODS_PER_DAY),
        }
    }
}

/// Actual generation for one fuel type at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub timestamp_utc: UtcDateTime,
    pub fuel_type: String,
    pub generation_mw: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub timestamp_utc: UtcDateTime,
    pub price_eur_per_mwh: f64,
}

/// Total load, or a cross-border flow, at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadRecord {
    pub timestamp_utc: UtcDateTime,
    pub load_mw: f64,
}

/// Physical flow on one interconnector border at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowRecord {
    pub timestamp_utc: UtcDateTime,
    pub flow_mw: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutageRecord {
    pub bm_unit_id: String,
    pub outage_start_utc: Option<UtcDateTime>,
    pub outage_end_utc: Option<UtcDateTime>,
    pub unavailable_capacity_mw: Option<f64>,
    pub outage_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisteredCapacityRecord {
    pub bm_unit_id: String,
    pub eic_code: Option<String>,
    pub registered_capacity_mw: Option<f64>,
    pub fuel_type: Option<String>,
}

/// Bid-offer level data stamped at the settlement period midpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidOfferRecord {
    pub timestamp_utc: UtcDateTime,
    pub bm_unit_id: String,
    pub bid_price_gbp_per_mwh: Option<f64>,
    pub offer_price_gbp_per_mwh: Option<f64>,
    pub bid_volume_mw: Option<f64>,
    pub offer_volume_mw: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalNotificationRecord {
    pub timestamp_utc: UtcDateTime,
    pub bm_unit_id: String,
    pub notification_mw: f64,
}

fn validate_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    Ok(())
}
