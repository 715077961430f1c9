use crate::parsers::document::Document;
use crate::parsers::timeseries::parse_number;
use crate::parsers::DocumentError;
use crate::{OutageRecord, UtcDateTime};

pub(crate) fn records(document: &Document) -> Result<Vec<OutageRecord>, DocumentError> {
    Ok(document
        .flat_records()?
        .into_iter()
        .filter_map(|item| {
            let timestamp = |field: &str| {
                item.field(&[field])
                    .and_then(|text| UtcDateTime::parse(text).ok())
            };
            Some(OutageRecord {
                bm_unit_id: item.field(&["bMUnitID"])?.to_owned(),
                outage_start_utc: timestamp("startDateTimeUTC"),
                outage_end_utc: timestamp("endDateTimeUTC"),
                unavailable_capacity_mw: item
                    .field(&["capacityUnavailable"])
                    .and_then(parse_number),
                outage_type: item.field(&["outageType"]).map(str::to_owned),
            })
        })
        .collect())
}
