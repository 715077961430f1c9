use crate::parsers::document::Document;
use crate::parsers::timeseries::{observations, SeriesSchema};
use crate::parsers::DocumentError;
use crate::{FlowRecord, LoadRecord};

const SCHEMA: SeriesSchema = SeriesSchema {
    label_paths: &[],
    value_fields: &["quantity"],
    default_resolution: None,
    flat_label_fields: &[],
    flat_value_fields: &["quantity", "demand"],
};

pub(crate) fn records(document: &Document) -> Result<Vec<LoadRecord>, DocumentError> {
    Ok(observations(document, &SCHEMA)?
        .into_iter()
        .map(|observation| LoadRecord {
            timestamp_utc: observation.timestamp,
            load_mw: observation.value,
        })
        .collect())
}

/// Physical cross-border flows share the load document layout.
pub(crate) fn flow_records(document: &Document) -> Result<Vec<FlowRecord>, DocumentError> {
    Ok(records(document)?
        .into_iter()
        .map(|record| FlowRecord {
            timestamp_utc: record.timestamp_utc,
            flow_mw: record.load_mw,
        })
        .collect())
}
