use crate::parsers::document::Document;
use crate::parsers::timeseries::{parse_number, settlement_slot};
use crate::parsers::DocumentError;
use crate::BidOfferRecord;

/// Bid-offer levels stamped at the midpoint of their settlement period.
/// Items without a usable settlement date and period are skipped.
pub(crate) fn records(document: &Document) -> Result<Vec<BidOfferRecord>, DocumentError> {
    Ok(document
        .flat_records()?
        .into_iter()
        .filter_map(|item| {
            let (day, period) = settlement_slot(item)?;
            let timestamp_utc = day.plus_minutes(period.midpoint_offset_minutes())?;
            let number = |field: &str| item.field(&[field]).and_then(parse_number);
            Some(BidOfferRecord {
                timestamp_utc,
                bm_unit_id: item.field(&["bmUnitID"])?.to_owned(),
                bid_price_gbp_per_mwh: number("bidPrice"),
                offer_price_gbp_per_mwh: number("offerPrice"),
                bid_volume_mw: number("bidVolume"),
                offer_volume_mw: number("offerVolume"),
            })
        })
        .collect())
}
