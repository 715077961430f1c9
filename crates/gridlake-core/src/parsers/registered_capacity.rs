use crate::parsers::document::Document;
use crate::parsers::timeseries::parse_number;
use crate::parsers::DocumentError;
use crate::RegisteredCapacityRecord;

/// One record per registered BM unit; this family has no time axis.
pub(crate) fn records(
    document: &Document,
) -> Result<Vec<RegisteredCapacityRecord>, DocumentError> {
    Ok(document
        .flat_records()?
        .into_iter()
        .filter_map(|item| {
            Some(RegisteredCapacityRecord {
                bm_unit_id: item.field(&["bmUnitID"])?.to_owned(),
                eic_code: item.field(&["eicCode"]).map(str::to_owned),
                registered_capacity_mw: item
                    .field(&["registeredCapacity"])
                    .and_then(parse_number),
                fuel_type: item
                    .field(&["powerSystemResourceType"])
                    .map(str::to_owned),
            })
        })
        .collect())
}
