use std::collections::BTreeMap;

use time::{Date, Duration};

use crate::config::QueryDescriptor;
use crate::domain::format_iso_date;
use crate::params::{Emission, ParameterBuilder};
use crate::QueryWindow;

/// Plans one ENTSO-E request per calendar day.
///
/// The descriptor's `domain_params` must already hold resolved literal values;
/// the connector resolves placeholders and drops the ones that came back empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntsoeParameterBuilder;

impl EntsoeParameterBuilder {
    pub fn params_for_day(&self, query: &QueryDescriptor, day: Date) -> BTreeMap<String, String> {
        let mut params = query.params.clone();
        if let Some(document_type) = &query.document_type {
            params.insert(String::from("documentType"), document_type.clone());
        }
        params.insert(String::from("periodStart"), period_bound(day));
        params.insert(
            String::from("periodEnd"),
            period_bound(day + Duration::days(1)),
        );
        params.extend(
            query
                .domain_params
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );
        params
    }
}

impl ParameterBuilder for EntsoeParameterBuilder {
    type Descriptor = QueryDescriptor;

    fn build(&self, query: &QueryDescriptor, window: &QueryWindow) -> Vec<Emission> {
        window
            .days()
            .map(|day| {
                Emission::new(
                    self.params_for_day(query, day),
                    format!("{}/{}.xml", query.name, format_iso_date(day)),
                )
            })
            .collect()
    }
}

/// `yyyyMMddHHmm` at midnight of `day`.
fn period_bound(day: Date) -> String {
    format!(
        "{:04}{:02}{:02}0000",
        day.year(),
        u8::from(day.month()),
        day.day()
    )
}
