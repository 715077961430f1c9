use crate::{
    BidOfferRecord, FlowRecord, GenerationRecord, LoadRecord, OutageRecord,
    PhysicalNotificationRecord, PriceRecord, RegisteredCapacityRecord, UtcDateTime,
};

use crate::parsers::fuel_type_name;

/// A normalized record that flattens into one table row.
pub trait Tabular {
    const COLUMNS: &'static [&'static str];
    /// Column indexes the table is ordered by.
    const SORT_KEYS: &'static [usize];

    fn row(&self) -> Vec<String>;
}

/// Rows of one document family, as written to the silver layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    sort_keys: Vec<usize>,
}

impl Table {
    pub fn empty<R: Tabular>() -> Self {
        Self {
            columns: R::COLUMNS.iter().map(|column| (*column).to_owned()).collect(),
            rows: Vec::new(),
            sort_keys: R::SORT_KEYS.to_vec(),
        }
    }

    pub fn from_records<R: Tabular>(records: &[R]) -> Self {
        Self {
            rows: records.iter().map(R::row).collect(),
            ..Self::empty::<R>()
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends the rows of `other`, which must come from the same family.
    pub fn append(&mut self, other: Table) {
        if self.columns.is_empty() {
            *self = other;
            return;
        }
        debug_assert_eq!(self.columns, other.columns);
        self.rows.extend(other.rows);
    }

    /// Orders rows by the family's sort keys and drops duplicate rows.
    pub fn normalize(&mut self) {
        let keys = self.sort_keys.clone();
        self.rows.sort_by(|left, right| {
            let key = |row: &Vec<String>| -> Vec<String> {
                keys.iter()
                    .map(|&index| row.get(index).cloned().unwrap_or_default())
                    .collect()
            };
            key(left).cmp(&key(right)).then_with(|| left.cmp(right))
        });
        self.rows.dedup();
    }
}

fn timestamp(value: &UtcDateTime) -> String {
    value.format_rfc3339()
}

fn optional_timestamp(value: &Option<UtcDateTime>) -> String {
    value.as_ref().map(timestamp).unwrap_or_default()
}

fn number(value: f64) -> String {
    value.to_string()
}

fn optional_number(value: Option<f64>) -> String {
    value.map(number).unwrap_or_default()
}

fn optional_text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

impl Tabular for GenerationRecord {
    const COLUMNS: &'static [&'static str] =
        &["timestamp_utc", "fuel_type", "fuel_type_name", "generation_mw"];
    const SORT_KEYS: &'static [usize] = &[0, 1];

    fn row(&self) -> Vec<String> {
        vec![
            timestamp(&self.timestamp_utc),
            self.fuel_type.clone(),
            fuel_type_name(&self.fuel_type)
                .map(str::to_owned)
                .unwrap_or_default(),
            number(self.generation_mw),
        ]
    }
}

impl Tabular for PriceRecord {
    const COLUMNS: &'static [&'static str] = &["timestamp_utc", "price_eur_per_mwh"];
    const SORT_KEYS: &'static [usize] = &[0];

    fn row(&self) -> Vec<String> {
        vec![timestamp(&self.timestamp_utc), number(self.price_eur_per_mwh)]
    }
}

impl Tabular for LoadRecord {
    const COLUMNS: &'static [&'static str] = &["timestamp_utc", "load_mw"];
    const SORT_KEYS: &'static [usize] = &[0];

    fn row(&self) -> Vec<String> {
        vec![timestamp(&self.timestamp_utc), number(self.load_mw)]
    }
}

impl Tabular for FlowRecord {
    const COLUMNS: &'static [&'static str] = &["timestamp_utc", "flow_mw"];
    const SORT_KEYS: &'static [usize] = &[0];

    fn row(&self) -> Vec<String> {
        vec![timestamp(&self.timestamp_utc), number(self.flow_mw)]
    }
}

impl Tabular for OutageRecord {
    const COLUMNS: &'static [&'static str] = &[
        "bm_unit_id",
        "outage_start_utc",
        "outage_end_utc",
        "unavailable_capacity_mw",
        "outage_type",
    ];
    const SORT_KEYS: &'static [usize] = &[1, 0];

    fn row(&self) -> Vec<String> {
        vec![
            self.bm_unit_id.clone(),
            optional_timestamp(&self.outage_start_utc),
            optional_timestamp(&self.outage_end_utc),
            optional_number(self.unavailable_capacity_mw),
            optional_text(&self.outage_type),
        ]
    }
}

impl Tabular for RegisteredCapacityRecord {
    const COLUMNS: &'static [&'static str] = &[
        "bm_unit_id",
        "eic_code",
        "registered_capacity_mw",
        "fuel_type",
    ];
    const SORT_KEYS: &'static [usize] = &[0];

    fn row(&self) -> Vec<String> {
        vec![
            self.bm_unit_id.clone(),
            optional_text(&self.eic_code),
            optional_number(self.registered_capacity_mw),
            optional_text(&self.fuel_type),
        ]
    }
}

impl Tabular for BidOfferRecord {
    const COLUMNS: &'static [&'static str] = &[
        "timestamp_utc",
        "bm_unit_id",
        "bid_price_gbp_per_mwh",
        "offer_price_gbp_per_mwh",
        "bid_volume_mw",
        "offer_volume_mw",
    ];
    const SORT_KEYS: &'static [usize] = &[0, 1];

    fn row(&self) -> Vec<String> {
        vec![
            timestamp(&self.timestamp_utc),
            self.bm_unit_id.clone(),
            optional_number(self.bid_price_gbp_per_mwh),
            optional_number(self.offer_price_gbp_per_mwh),
            optional_number(self.bid_volume_mw),
            optional_number(self.offer_volume_mw),
        ]
    }
}

impl Tabular for PhysicalNotificationRecord {
    const COLUMNS: &'static [&'static str] = &["timestamp_utc", "bm_unit_id", "notification_mw"];
    const SORT_KEYS: &'static [usize] = &[0, 1];

    fn row(&self) -> Vec<String> {
        vec![
            timestamp(&self.timestamp_utc),
            self.bm_unit_id.clone(),
            number(self.notification_mw),
        ]
    }
}
