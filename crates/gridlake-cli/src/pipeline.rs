//! Orchestrator: config, connector, bronze and silver wired together.

use std::collections::BTreeMap;
use std::env;
use std::sync::Arc;

use gridlake_core::domain::format_iso_date;
use gridlake_core::placeholder::resolve_env_reference;
use gridlake_core::{
    AppConfig, Connector, ConnectorRegistry, DocumentFamily, HttpClient, PlannedRequest,
    QueryWindow, SourceConfig,
};
use gridlake_store::{BronzeFile, BronzeStore, BronzeWriteReport, SilverStore, SilverTableReport};
use serde::Serialize;

use crate::error::CliError;

/// Looks up one environment variable.
pub type EnvLookup = fn(&str) -> Option<String>;

#[derive(Debug, Clone, Serialize)]
pub struct ExtractSummary {
    pub source: String,
    pub start: String,
    pub end: String,
    /// Payloads kept per report or query.
    pub payloads: BTreeMap<String, usize>,
    pub bronze: BronzeWriteReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub extract: ExtractSummary,
    pub silver: Vec<SilverTableReport>,
}

pub struct Orchestrator<'a> {
    config: &'a AppConfig,
    registry: ConnectorRegistry,
    http_client: Arc<dyn HttpClient>,
    env_lookup: EnvLookup,
    bronze: BronzeStore,
    silver: SilverStore,
}

impl<'a> Orchestrator<'a> {
    pub fn new(config: &'a AppConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            config,
            registry: ConnectorRegistry::default(),
            http_client,
            env_lookup: process_env,
            bronze: BronzeStore::new(&config.storage.bronze_path),
            silver: SilverStore::new(&config.storage.silver_path),
        }
    }

    pub fn with_env_lookup(mut self, env_lookup: EnvLookup) -> Self {
        self.env_lookup = env_lookup;
        self
    }

    /// Source block narrowed to `query` (when given) with its `${VAR}`
    /// credential expanded.
    fn source_config(&self, source: &str, query: Option<&str>) -> Result<SourceConfig, CliError> {
        let configured = self.config.source(source)?;
        let mut resolved = match query {
            Some(name) => configured.retain_descriptor(source, name)?,
            None => configured.clone(),
        };

        let lookup = self.env_lookup;
        resolved.api_key = resolved
            .api_key
            .as_deref()
            .and_then(|value| resolve_env_reference(value, lookup));
        if configured.api_key.is_some() && resolved.api_key.is_none() {
            tracing::warn!(source, "credential reference did not resolve");
        }
        Ok(resolved)
    }

    fn connector(&self, source: &str, query: Option<&str>) -> Result<Box<dyn Connector>, CliError> {
        let config = self.source_config(source, query)?;
        Ok(self
            .registry
            .build(source, &config, Arc::clone(&self.http_client))?)
    }

    pub fn plan(
        &self,
        source: &str,
        window: &QueryWindow,
        query: Option<&str>,
    ) -> Result<Vec<PlannedRequest>, CliError> {
        Ok(self.connector(source, query)?.plan(window))
    }

    /// Fetches every request of `window` and persists the payloads to bronze.
    pub fn extract(
        &self,
        source: &str,
        window: &QueryWindow,
        query: Option<&str>,
    ) -> Result<ExtractSummary, CliError> {
        let connector = self.connector(source, query)?;
        let payloads = connector.extract(window);

        let mut counts = BTreeMap::new();
        for payload in &payloads {
            let descriptor = payload
                .logical_path
                .split('/')
                .next()
                .unwrap_or_default()
                .to_owned();
            *counts.entry(descriptor).or_insert(0) += 1;
        }

        let bronze = self.bronze.write_all(&payloads)?;
        Ok(ExtractSummary {
            source: source.to_owned(),
            start: format_iso_date(window.start()),
            end: format_iso_date(window.end()),
            payloads: counts,
            bronze,
        })
    }

    /// Parses every bronze file of `source` and writes one silver table per
    /// report or query. Descriptors without a known document family are
    /// skipped.
    pub fn transform(
        &self,
        source: &str,
        query: Option<&str>,
    ) -> Result<Vec<SilverTableReport>, CliError> {
        let mut grouped: BTreeMap<String, Vec<BronzeFile>> = BTreeMap::new();
        for file in self.bronze.list(source)? {
            if query.is_some_and(|name| name != file.descriptor) {
                continue;
            }
            grouped.entry(file.descriptor.clone()).or_default().push(file);
        }

        let mut reports = Vec::new();
        for (descriptor, files) in grouped {
            let Some(family) = DocumentFamily::for_descriptor(&descriptor) else {
                tracing::warn!(source, report = %descriptor, "no parser for report, skipping");
                continue;
            };

            let mut table = family.empty_table();
            for file in &files {
                let raw = match self.bronze.read(file) {
                    Ok(raw) => raw,
                    Err(error) => {
                        tracing::error!(
                            source,
                            report = %descriptor,
                            path = %file.path.display(),
                            error = %error,
                            "skipping unreadable bronze file"
                        );
                        continue;
                    }
                };
                table.append(family.parse(&raw));
            }
            reports.push(
                self.silver
                    .write_table(source, &descriptor, family.table_name(), table)?,
            );
        }
        Ok(reports)
    }

    pub fn run(
        &self,
        source: &str,
        window: &QueryWindow,
        query: Option<&str>,
    ) -> Result<RunSummary, CliError> {
        let extract = self.extract(source, window, query)?;
        let silver = self.transform(source, query)?;
        Ok(RunSummary { extract, silver })
    }
}

fn process_env(name: &str) -> Option<String> {
    env::var(name).ok()
}
