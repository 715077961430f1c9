use std::collections::BTreeMap;
use std::sync::Arc;

use serde_yaml::Value;

use crate::api_client::EntsoeApiClient;
use crate::config::{QueryDescriptor, SourceConfig};
use crate::connectors::{fetch_emissions, plan_emissions, Connector, Endpoint, PlannedRequest};
use crate::http_client::HttpClient;
use crate::params::{EntsoeParameterBuilder, ParameterBuilder};
use crate::placeholder::resolve_placeholder;
use crate::{ConfigError, QueryWindow, RawPayload, SourceId};

/// ENTSO-E transparency platform connector.
pub struct EntsoeConnector {
    queries: Vec<QueryDescriptor>,
    tree: Value,
    builder: EntsoeParameterBuilder,
    client: EntsoeApiClient,
}

impl EntsoeConnector {
    pub fn new(
        config: &SourceConfig,
        http_client: Arc<dyn HttpClient>,
    ) -> Result<Self, ConfigError> {
        let base_url = config.base_url(SourceId::Entsoe.as_str())?;
        let client = EntsoeApiClient::new(
            base_url,
            config.credential().map(str::to_owned),
            http_client,
        )?;

        Ok(Self {
            queries: config.queries.clone(),
            tree: config.tree(),
            builder: EntsoeParameterBuilder,
            client,
        })
    }

    /// Copy of `query` with every domain param resolved against the source
    /// config. Params that resolve to nothing are left out.
    pub fn resolve_query(&self, query: &QueryDescriptor) -> QueryDescriptor {
        let mut resolved = BTreeMap::new();
        for (name, token) in &query.domain_params {
            match resolve_placeholder(token, &self.tree) {
                Some(value) => {
                    resolved.insert(name.clone(), value);
                }
                None => tracing::warn!(
                    source = %SourceId::Entsoe,
                    report = %query.name,
                    param = %name,
                    placeholder = %token,
                    "could not resolve placeholder, omitting parameter"
                ),
            }
        }
        query.with_domain_params(resolved)
    }

    fn endpoint(query: &QueryDescriptor) -> Endpoint<'_> {
        Endpoint {
            descriptor: &query.name,
            code: query.document_type.as_deref().unwrap_or_default(),
            version: "",
        }
    }
}

impl Connector for EntsoeConnector {
    fn source(&self) -> SourceId {
        SourceId::Entsoe
    }

    fn plan(&self, window: &QueryWindow) -> Vec<PlannedRequest> {
        self.queries
            .iter()
            .flat_map(|query| {
                let resolved = self.resolve_query(query);
                plan_emissions(
                    &self.client,
                    &Self::endpoint(query),
                    self.builder.build(&resolved, window),
                )
            })
            .collect()
    }

    fn extract(&self, window: &QueryWindow) -> Vec<RawPayload> {
        tracing::info!(
            source = %SourceId::Entsoe,
            queries = self.queries.len(),
            "starting extraction"
        );

        let mut payloads = Vec::new();
        for query in &self.queries {
            let resolved = self.resolve_query(query);
            fetch_emissions(
                &self.client,
                SourceId::Entsoe,
                &Self::endpoint(query),
                self.builder.build(&resolved, window),
                &mut payloads,
            );
        }

        tracing::info!(
            source = %SourceId::Entsoe,
            payloads = payloads.len(),
            "extraction complete"
        );
        payloads
    }
}
