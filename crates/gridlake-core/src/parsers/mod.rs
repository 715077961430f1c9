//! # Document Parsers
//!
//! One parser per document family. Every parser accepts JSON or XML (tried
//! in that order), reconstructs absolute timestamps from period start,
//! resolution and point position, and never fails: malformed input is
//! logged and yields no records.
//!
//! | Family | Records | Source documents |
//! |--------|---------|------------------|
//! | [`DocumentFamily::Generation`] | [`GenerationRecord`] | ENTSO-E A75, Elexon B1620 / AGPT |
//! | [`DocumentFamily::Price`] | [`PriceRecord`] | ENTSO-E A44 |
//! | [`DocumentFamily::Load`] | [`LoadRecord`] | ENTSO-E A65, Elexon B1610 |
//! | [`DocumentFamily::Flow`] | [`FlowRecord`] | ENTSO-E A11 |
//! | [`DocumentFamily::Outage`] | [`OutageRecord`] | Elexon B1510 |
//! | [`DocumentFamily::RegisteredCapacity`] | [`RegisteredCapacityRecord`] | Elexon B1420 |
//! | [`DocumentFamily::BidOffer`] | [`BidOfferRecord`] | Elexon BOALF |
//! | [`DocumentFamily::PhysicalNotification`] | [`PhysicalNotificationRecord`] | Elexon PN |

mod bid_offer;
mod document;
mod generation;
mod load;
mod outage;
mod physical_notification;
mod price;
mod registered_capacity;
mod table;
mod timeseries;

use std::fmt::{Display, Formatter};

use thiserror::Error;

pub use document::{Document, Encoding, Node, CONTAINER_KEYS};
pub use generation::fuel_type_name;
pub use table::{Table, Tabular};

use crate::{
    BidOfferRecord, FlowRecord, GenerationRecord, LoadRecord, OutageRecord,
    PhysicalNotificationRecord, PriceRecord, RegisteredCapacityRecord, ValidationError,
};

/// Why a raw document produced no records.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document is empty")]
    Empty,

    #[error("document is neither JSON ({json}) nor XML ({xml})")]
    Malformed { json: String, xml: String },

    #[error("document has no series blocks and no recognised record container")]
    UnrecognisedShape,

    #[error("period is missing its '{field}'")]
    MissingField { field: &'static str },

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Shape family of a report's documents, which fixes its parser and columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DocumentFamily {
    Generation,
    Price,
    Load,
    Flow,
    Outage,
    RegisteredCapacity,
    BidOffer,
    PhysicalNotification,
}

impl DocumentFamily {
    pub const ALL: [Self; 8] = [
        Self::Generation,
        Self::Price,
        Self::Load,
        Self::Flow,
        Self::Outage,
        Self::RegisteredCapacity,
        Self::BidOffer,
        Self::PhysicalNotification,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Generation => "generation",
            Self::Price => "price",
            Self::Load => "load",
            Self::Flow => "flow",
            Self::Outage => "outage",
            Self::RegisteredCapacity => "registered_capacity",
            Self::BidOffer => "bid_offer",
            Self::PhysicalNotification => "physical_notification",
        }
    }

    /// Family of a configured report or query, by its name.
    pub fn for_descriptor(name: &str) -> Option<Self> {
        let family = match name {
            "generation_per_type" => Self::Generation,
            "day_ahead_prices" => Self::Price,
            "total_load" => Self::Load,
            "generation_outages" => Self::Outage,
            "generation_registered_capacity" | "registered_capacity" => Self::RegisteredCapacity,
            "bid_offer_level_data" => Self::BidOffer,
            "physical_notifications" => Self::PhysicalNotification,
            other if other.starts_with("cross_border_flows") => Self::Flow,
            _ => return None,
        };
        Some(family)
    }

    /// File stem of the family's silver table.
    pub const fn table_name(self) -> &'static str {
        match self {
            Self::Generation => "generation",
            Self::Price => "prices",
            Self::Load => "load",
            Self::Flow => "flows",
            Self::Outage => "fct_generation_outages",
            Self::RegisteredCapacity => "dim_generation_units",
            Self::BidOffer => "fct_bid_offer_data",
            Self::PhysicalNotification => "fct_physical_notifications",
        }
    }

    pub fn empty_table(self) -> Table {
        match self {
            Self::Generation => Table::empty::<GenerationRecord>(),
            Self::Price => Table::empty::<PriceRecord>(),
            Self::Load => Table::empty::<LoadRecord>(),
            Self::Flow => Table::empty::<FlowRecord>(),
            Self::Outage => Table::empty::<OutageRecord>(),
            Self::RegisteredCapacity => Table::empty::<RegisteredCapacityRecord>(),
            Self::BidOffer => Table::empty::<BidOfferRecord>(),
            Self::PhysicalNotification => Table::empty::<PhysicalNotificationRecord>(),
        }
    }

    /// Parses one raw document into this family's table.
    pub fn parse(self, raw: &str) -> Table {
        match self {
            Self::Generation => Table::from_records(&parse_generation(raw)),
            Self::Price => Table::from_records(&parse_prices(raw)),
            Self::Load => Table::from_records(&parse_load(raw)),
            Self::Flow => Table::from_records(&parse_flows(raw)),
            Self::Outage => Table::from_records(&parse_outages(raw)),
            Self::RegisteredCapacity => Table::from_records(&parse_registered_capacity(raw)),
            Self::BidOffer => Table::from_records(&parse_bid_offer(raw)),
            Self::PhysicalNotification => {
                Table::from_records(&parse_physical_notifications(raw))
            }
        }
    }
}

impl Display for DocumentFamily {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn parse_generation(raw: &str) -> Vec<GenerationRecord> {
    parse_with(DocumentFamily::Generation, raw, generation::records)
}

pub fn parse_prices(raw: &str) -> Vec<PriceRecord> {
    parse_with(DocumentFamily::Price, raw, price::records)
}

pub fn parse_load(raw: &str) -> Vec<LoadRecord> {
    parse_with(DocumentFamily::Load, raw, load::records)
}

pub fn parse_flows(raw: &str) -> Vec<FlowRecord> {
    parse_with(DocumentFamily::Flow, raw, load::flow_records)
}

pub fn parse_outages(raw: &str) -> Vec<OutageRecord> {
    parse_with(DocumentFamily::Outage, raw, outage::records)
}

pub fn parse_registered_capacity(raw: &str) -> Vec<RegisteredCapacityRecord> {
    parse_with(
        DocumentFamily::RegisteredCapacity,
        raw,
        registered_capacity::records,
    )
}

pub fn parse_bid_offer(raw: &str) -> Vec<BidOfferRecord> {
    parse_with(DocumentFamily::BidOffer, raw, bid_offer::records)
}

pub fn parse_physical_notifications(raw: &str) -> Vec<PhysicalNotificationRecord> {
    parse_with(
        DocumentFamily::PhysicalNotification,
        raw,
        physical_notification::records,
    )
}

fn parse_with<R>(
    family: DocumentFamily,
    raw: &str,
    read: fn(&Document) -> Result<Vec<R>, DocumentError>,
) -> Vec<R> {
    match Document::parse(raw).and_then(|document| read(&document)) {
        Ok(records) => {
            if records.is_empty() {
                tracing::warn!(family = %family, "document produced no records");
            }
            records
        }
        Err(error) => {
            tracing::error!(family = %family, error = %error, "failed to parse document");
            Vec::new()
        }
    }
}
