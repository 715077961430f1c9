use crate::parsers::document::Document;
use crate::parsers::timeseries::{observations, SeriesSchema};
use crate::parsers::DocumentError;
use crate::GenerationRecord;

const SCHEMA: SeriesSchema = SeriesSchema {
    label_paths: &[&["MktPSRType", "psrType"], &["psrType"]],
    value_fields: &["quantity"],
    default_resolution: None,
    flat_label_fields: &["psrType", "fuelType"],
    flat_value_fields: &["quantity", "generation"],
};

/// Actual generation per production type. Series without a fuel label are
/// dropped.
pub(crate) fn records(document: &Document) -> Result<Vec<GenerationRecord>, DocumentError> {
    let mut unlabelled = 0usize;
    let records: Vec<GenerationRecord> = observations(document, &SCHEMA)?
        .into_iter()
        .filter_map(|observation| {
            let Some(fuel_type) = observation.label else {
                unlabelled += 1;
                return None;
            };
            Some(GenerationRecord {
                timestamp_utc: observation.timestamp,
                fuel_type,
                generation_mw: observation.value,
            })
        })
        .collect();

    if unlabelled > 0 {
        tracing::warn!(points = unlabelled, "dropped generation points without a fuel type");
    }
    Ok(records)
}

/// Human-readable name of an ENTSO-E production type code.
pub fn fuel_type_name(code: &str) -> Option<&'static str> {
    let name = match code {
        "B01" => "Biomass",
        "B02" => "Fossil Brown coal/Lignite",
        "B03" => "Fossil Coal-derived gas",
        "B04" => "Fossil Gas",
        "B05" => "Fossil Hard coal",
        "B06" => "Fossil Oil",
        "B07" => "Fossil Oil shale",
        "B08" => "Fossil Peat",
        "B09" => "Geothermal",
        "B10" => "Hydro Pumped Storage",
        "B11" => "Hydro Run-of-river and poundage",
        "B12" => "Hydro Water Reservoir",
        "B13" => "Marine",
        "B14" => "Nuclear",
        "B15" => "Other renewable",
        "B16" => "Solar",
        "B17" => "Waste",
        "B18" => "Wind Offshore",
        "B19" => "Wind Onshore",
        "B20" => "Other",
        "B25" => "Energy storage",
        _ => return None,
    };
    Some(name)
}
