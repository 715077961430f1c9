use std::collections::BTreeMap;

use crate::config::{DateParamType, ReportDescriptor};
use crate::dialect::EndpointDialect;
use crate::domain::{format_iso_date, SettlementPeriodRange};
use crate::params::{Emission, ParameterBuilder};
use crate::QueryWindow;

/// Report code whose public endpoint filters on publish time.
const PUBLISH_TIME_CODE: &str = "B1620";

const SETTLEMENT_FROM: &str = "settlementPeriodFrom";
const SETTLEMENT_TO: &str = "settlementPeriodTo";

/// Plans BMRS report requests for either endpoint dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElexonParameterBuilder {
    dialect: EndpointDialect,
    default_settlement_periods: SettlementPeriodRange,
}

impl ElexonParameterBuilder {
    pub fn new(dialect: EndpointDialect) -> Self {
        Self {
            dialect,
            default_settlement_periods: SettlementPeriodRange::default(),
        }
    }

    /// Deployment default for public `settlementPeriodFrom`/`To`; a
    /// report's own static params still take precedence.
    pub fn with_settlement_periods(mut self, range: SettlementPeriodRange) -> Self {
        self.default_settlement_periods = range;
        self
    }

    pub const fn dialect(&self) -> EndpointDialect {
        self.dialect
    }

    fn base_params(&self, report: &ReportDescriptor) -> BTreeMap<String, String> {
        let mut params = report.params.clone();
        params.extend(self.dialect.content_params());
        params
    }

    fn daily_path(&self, report: &ReportDescriptor, day: &str) -> String {
        format!("{}/{day}.{}", report.name, self.dialect.file_extension())
    }

    fn from_to_date(&self, report: &ReportDescriptor, window: &QueryWindow) -> Vec<Emission> {
        window
            .days()
            .map(|day| {
                let day = format_iso_date(day);
                let mut params = self.base_params(report);
                if self.dialect == EndpointDialect::Public && report.code == PUBLISH_TIME_CODE {
                    params.insert(String::from("publishDateTimeFrom"), format!("{day} 00:00"));
                    params.insert(String::from("publishDateTimeTo"), format!("{day} 23:59"));
                } else {
                    params.insert(String::from("FromDate"), day.clone());
                    params.insert(String::from("ToDate"), day.clone());
                }
                Emission::new(params, self.daily_path(report, &day))
            })
            .collect()
    }

    fn settlement_periods_legacy(
        &self,
        report: &ReportDescriptor,
        window: &QueryWindow,
    ) -> Vec<Emission> {
        let ext = self.dialect.file_extension();
        let mut emissions = Vec::new();
        for day in window.days() {
            let day = format_iso_date(day);
            for period in SettlementPeriodRange::default().periods() {
                let period = period.get();
                let mut params = self.base_params(report);
                params.insert(String::from("SettlementDate"), day.clone());
                params.insert(String::from("Period"), period.to_string());
                emissions.push(Emission::new(
                    params,
                    format!("{}/{day}_P{period:02}.{ext}", report.name),
                ));
            }
        }
        emissions
    }

    fn settlement_periods_public(
        &self,
        report: &ReportDescriptor,
        window: &QueryWindow,
    ) -> Vec<Emission> {
        let defaults = self.default_settlement_periods;
        window
            .days()
            .map(|day| {
                let day = format_iso_date(day);
                let mut params = self.base_params(report);
                params.insert(String::from("from"), day.clone());
                params.insert(String::from("to"), day.clone());
                params
                    .entry(SETTLEMENT_FROM.to_owned())
                    .or_insert_with(|| defaults.from.get().to_string());
                params
                    .entry(SETTLEMENT_TO.to_owned())
                    .or_insert_with(|| defaults.to.get().to_string());
                Emission::new(params, self.daily_path(report, &day))
            })
            .collect()
    }
}

impl ParameterBuilder for ElexonParameterBuilder {
    type Descriptor = ReportDescriptor;

    fn build(&self, report: &ReportDescriptor, window: &QueryWindow) -> Vec<Emission> {
        match report.date_param_type {
            DateParamType::None => vec![Emission::new(
                self.base_params(report),
                format!(
                    "{name}/{name}.{ext}",
                    name = report.name,
                    ext = self.dialect.file_extension()
                ),
            )],
            DateParamType::FromToDate => self.from_to_date(report, window),
            DateParamType::SettlementDatePeriod => match self.dialect {
                EndpointDialect::Legacy => self.settlement_periods_legacy(report, window),
                EndpointDialect::Public => self.settlement_periods_public(report, window),
            },
        }
    }
}
