use std::sync::Arc;

use crate::api_client::ElexonApiClient;
use crate::config::{ReportDescriptor, SourceConfig};
use crate::connectors::{fetch_emissions, plan_emissions, Connector, Endpoint, PlannedRequest};
use crate::dialect::EndpointDialect;
use crate::http_client::HttpClient;
use crate::params::{ElexonParameterBuilder, ParameterBuilder};
use crate::{ConfigError, QueryWindow, RawPayload, SourceId};

/// BMRS reports connector.
pub struct ElexonConnector {
    reports: Vec<ReportDescriptor>,
    builder: ElexonParameterBuilder,
    client: ElexonApiClient,
}

impl ElexonConnector {
    pub fn new(
        config: &SourceConfig,
        http_client: Arc<dyn HttpClient>,
    ) -> Result<Self, ConfigError> {
        let base_url = config.base_url(SourceId::Elexon.as_str())?;
        let client = ElexonApiClient::new(
            base_url,
            config.credential().map(str::to_owned),
            http_client,
        )?;

        let mut builder = ElexonParameterBuilder::new(client.dialect());
        if let Some(range) = config.settlement_periods {
            builder = builder.with_settlement_periods(range);
        }

        Ok(Self {
            reports: config.reports.clone(),
            builder,
            client,
        })
    }

    pub const fn dialect(&self) -> EndpointDialect {
        self.client.dialect()
    }

    fn endpoint(report: &ReportDescriptor) -> Endpoint<'_> {
        Endpoint {
            descriptor: &report.name,
            code: &report.code,
            version: &report.version,
        }
    }
}

impl Connector for ElexonConnector {
    fn source(&self) -> SourceId {
        SourceId::Elexon
    }

    fn plan(&self, window: &QueryWindow) -> Vec<PlannedRequest> {
        self.reports
            .iter()
            .flat_map(|report| {
                plan_emissions(
                    &self.client,
                    &Self::endpoint(report),
                    self.builder.build(report, window),
                )
            })
            .collect()
    }

    fn extract(&self, window: &QueryWindow) -> Vec<RawPayload> {
        tracing::info!(
            source = %SourceId::Elexon,
            reports = self.reports.len(),
            dialect = %self.dialect(),
            "starting extraction"
        );

        let mut payloads = Vec::new();
        for report in &self.reports {
            fetch_emissions(
                &self.client,
                SourceId::Elexon,
                &Self::endpoint(report),
                self.builder.build(report, window),
                &mut payloads,
            );
        }

        tracing::info!(
            source = %SourceId::Elexon,
            payloads = payloads.len(),
            "extraction complete"
        );
        payloads
    }
}

