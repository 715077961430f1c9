use crate::parsers::document::Document;
use crate::parsers::timeseries::{observations, SeriesSchema};
use crate::parsers::DocumentError;
use crate::PriceRecord;

const SCHEMA: SeriesSchema = SeriesSchema {
    label_paths: &[],
    value_fields: &["price.amount"],
    default_resolution: None,
    flat_label_fields: &[],
    flat_value_fields: &["price.amount", "price"],
};

pub(crate) fn records(document: &Document) -> Result<Vec<PriceRecord>, DocumentError> {
    Ok(observations(document, &SCHEMA)?
        .into_iter()
        .map(|observation| PriceRecord {
            timestamp_utc: observation.timestamp,
            price_eur_per_mwh: observation.value,
        })
        .collect())
}
