use crate::parsers::document::Document;
use crate::parsers::timeseries::{observations, SeriesSchema};
use crate::parsers::DocumentError;
use crate::{PhysicalNotificationRecord, Resolution};

const SCHEMA: SeriesSchema = SeriesSchema {
    label_paths: &[&["bMUnitID"], &["bmUnit"]],
    value_fields: &["quantity"],
    default_resolution: Some(Resolution::HALF_HOUR),
    flat_label_fields: &["bmUnit", "bMUnitID", "nationalGridBmUnit"],
    flat_value_fields: &["levelFrom", "quantity"],
};

/// Physical notification levels per BM unit. Periods that omit their
/// resolution are taken as half-hourly.
pub(crate) fn records(
    document: &Document,
) -> Result<Vec<PhysicalNotificationRecord>, DocumentError> {
    Ok(observations(document, &SCHEMA)?
        .into_iter()
        .filter_map(|observation| {
            Some(PhysicalNotificationRecord {
                timestamp_utc: observation.timestamp,
                bm_unit_id: observation.label?,
                notification_mw: observation.value,
            })
        })
        .collect())
}
