use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

use crate::config::SourceConfig;
use crate::connectors::{Connector, ElexonConnector, EntsoeConnector};
use crate::http_client::HttpClient;
use crate::{ConfigError, SourceId};

/// Builds a connector from its source block and a transport.
pub type ConnectorFactory =
    fn(&SourceConfig, Arc<dyn HttpClient>) -> Result<Box<dyn Connector>, ConfigError>;

/// Explicit source-to-connector table, looked up by exact source id.
#[derive(Clone)]
pub struct ConnectorRegistry {
    factories: BTreeMap<SourceId, ConnectorFactory>,
}

impl ConnectorRegistry {
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, source: SourceId, factory: ConnectorFactory) -> &mut Self {
        self.factories.insert(source, factory);
        self
    }

    pub fn sources(&self) -> impl Iterator<Item = SourceId> + '_ {
        self.factories.keys().copied()
    }

    /// Builds the connector registered for `source_name`.
    pub fn build(
        &self,
        source_name: &str,
        config: &SourceConfig,
        http_client: Arc<dyn HttpClient>,
    ) -> Result<Box<dyn Connector>, ConfigError> {
        let factory = SourceId::from_str(source_name)
            .ok()
            .and_then(|source| self.factories.get(&source))
            .ok_or_else(|| ConfigError::UnknownSource(source_name.to_owned()))?;

        let connector = factory(config, http_client)?;
        tracing::info!(source = %connector.source(), "loaded connector");
        Ok(connector)
    }
}

impl Default for ConnectorRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .register(SourceId::Entsoe, build_entsoe)
            .register(SourceId::Elexon, build_elexon);
        registry
    }
}

fn build_entsoe(
    config: &SourceConfig,
    http_client: Arc<dyn HttpClient>,
) -> Result<Box<dyn Connector>, ConfigError> {
    Ok(Box::new(EntsoeConnector::new(config, http_client)?))
}

fn build_elexon(
    config: &SourceConfig,
    http_client: Arc<dyn HttpClient>,
) -> Result<Box<dyn Connector>, ConfigError> {
    Ok(Box::new(ElexonConnector::new(config, http_client)?))
}
