//! Configuration model.
//!
//! The whole file is deserialized once into [`AppConfig`] and handed to the
//! components that need it by reference.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;

use crate::{ConfigError, SettlementPeriodRange};

/// How a report's dates are expressed in its request parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateParamType {
    /// Static parameters only, a single request per run.
    #[default]
    None,
    /// One request per calendar day.
    FromToDate,
    /// Settlement date plus settlement period(s).
    SettlementDatePeriod,
}

/// A report on a BMRS-style source (Elexon).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDescriptor {
    pub name: String,
    pub code: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub date_param_type: DateParamType,
    #[serde(default, deserialize_with = "scalar_map")]
    pub params: BTreeMap<String, String>,
}

/// A query on a document-type source (ENTSO-E).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryDescriptor {
    pub name: String,
    #[serde(rename = "documentType", default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    #[serde(default, deserialize_with = "scalar_map")]
    pub params: BTreeMap<String, String>,
    /// Parameter name to `${dotted.path}` placeholder, or a literal value.
    #[serde(default, deserialize_with = "scalar_map")]
    pub domain_params: BTreeMap<String, String>,
}

impl QueryDescriptor {
    /// Copy of this query whose domain params are already resolved literals.
    pub fn with_domain_params(&self, domain_params: BTreeMap<String, String>) -> Self {
        Self {
            domain_params,
            ..self.clone()
        }
    }
}

/// One `sources.<name>` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reports: Vec<ReportDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub queries: Vec<QueryDescriptor>,
    /// Default `settlementPeriodFrom`/`To` for public-dialect requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settlement_periods: Option<SettlementPeriodRange>,
    /// Deployment-specific keys such as `primary_bidding_zone`, kept verbatim
    /// for placeholder resolution.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl SourceConfig {
    pub fn base_url(&self, source_name: &str) -> Result<&str, ConfigError> {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ConfigError::MissingBaseUrl {
                source_name: source_name.to_owned(),
            })
    }

    /// Credential with blank values treated as absent.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// This block as a YAML tree, the lookup space for `${a.b.c}` placeholders.
    pub fn tree(&self) -> Value {
        serde_yaml::to_value(self).unwrap_or_default()
    }

    /// Names of every configured report and query, in declaration order.
    pub fn descriptor_names(&self) -> Vec<&str> {
        self.reports
            .iter()
            .map(|report| report.name.as_str())
            .chain(self.queries.iter().map(|query| query.name.as_str()))
            .collect()
    }

    /// Copy of this block narrowed to the single report or query `name`.
    pub fn retain_descriptor(&self, source_name: &str, name: &str) -> Result<Self, ConfigError> {
        let mut narrowed = self.clone();
        narrowed.reports.retain(|report| report.name == name);
        narrowed.queries.retain(|query| query.name == name);

        if narrowed.reports.is_empty() && narrowed.queries.is_empty() {
            return Err(ConfigError::UnknownReport {
                source_name: source_name.to_owned(),
                report: name.to_owned(),
            });
        }
        Ok(narrowed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_bronze_path")]
    pub bronze_path: String,
    #[serde(default = "default_silver_path")]
    pub silver_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bronze_path: default_bronze_path(),
            silver_path: default_silver_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Root of `config.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub sources: BTreeMap<String, SourceConfig>,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn from_yaml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(input)?;
        if config.sources.is_empty() {
            return Err(ConfigError::NoSources);
        }
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn source(&self, name: &str) -> Result<&SourceConfig, ConfigError> {
        self.sources
            .get(name)
            .ok_or_else(|| ConfigError::MissingSource(name.to_owned()))
    }
}

fn default_version() -> String {
    String::from("v1")
}

fn default_bronze_path() -> String {
    String::from("data/bronze")
}

fn default_silver_path() -> String {
    String::from("data/silver")
}

fn default_log_level() -> String {
    String::from("info")
}

/// Accepts string, number and boolean values, so `settlementPeriodTo: 36`
/// and `settlementPeriodTo: "36"` mean the same thing. Nulls are dropped.
fn scalar_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    let mut out = BTreeMap::new();
    for (key, value) in raw {
        let text = match value {
            Value::Null => continue,
            Value::String(text) => text,
            Value::Number(number) => number.to_string(),
            Value::Bool(flag) => flag.to_string(),
            _ => {
                return Err(D::Error::custom(format!(
                    "parameter '{key}' must be a scalar value"
                )))
            }
        };
        out.insert(key, text);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
sources:
  entsoe:
    base_url: https://web-api.tp.entsoe.eu/api
    api_key: ${ENTSOE_API_KEY}
    primary_bidding_zone: 10YGB----------A
    interconnectors:
      FR: 10YFR-RTE------C
    queries:
      - name: generation_per_type
        documentType: A75
        params:
          processType: A16
        domain_params:
          in_Domain: ${primary_bidding_zone}
  elexon:
    base_url: https://data.elexon.co.uk/bmrs/api/v1
    settlement_periods:
      from: 1
      to: 36
    reports:
      - name: total_load
        code: B1610
        date_param_type: settlement_date_period
        params:
          settlementPeriodTo: 40
storage:
  bronze_path: /tmp/bronze
"#;

    #[test]
    fn parses_sources_and_defaults() {
        let config = AppConfig::from_yaml_str(SAMPLE).expect("config parses");
        assert_eq!(config.storage.bronze_path, "/tmp/bronze");
        assert_eq!(config.storage.silver_path, "data/silver");
        assert_eq!(config.logging.level, "info");

        let elexon = config.source("elexon").expect("elexon configured");
        let report = &elexon.reports[0];
        assert_eq!(report.version, "v1");
        assert_eq!(report.date_param_type, DateParamType::SettlementDatePeriod);
        assert_eq!(report.params.get("settlementPeriodTo").map(String::as_str), Some("40"));
        assert_eq!(
            elexon.settlement_periods,
            Some(SettlementPeriodRange::new(1, 36).expect("valid range"))
        );
    }

    #[test]
    fn keeps_extra_keys_in_tree() {
        let config = AppConfig::from_yaml_str(SAMPLE).expect("config parses");
        let entsoe = config.source("entsoe").expect("entsoe configured");
        assert!(entsoe.extra.contains_key("primary_bidding_zone"));

        let tree = entsoe.tree();
        assert_eq!(
            tree["interconnectors"]["FR"].as_str(),
            Some("10YFR-RTE------C")
        );
        assert_eq!(entsoe.queries[0].document_type.as_deref(), Some("A75"));
    }

    #[test]
    fn rejects_empty_sources() {
        let err = AppConfig::from_yaml_str("sources: {}").expect_err("must fail");
        assert!(matches!(err, ConfigError::NoSources));
    }

    #[test]
    fn missing_source_is_reported() {
        let config = AppConfig::from_yaml_str(SAMPLE).expect("config parses");
        let err = config.source("nordpool").expect_err("must fail");
        assert!(matches!(err, ConfigError::MissingSource(name) if name == "nordpool"));
    }

    #[test]
    fn retain_descriptor_filters_and_rejects_unknown_names() {
        let config = AppConfig::from_yaml_str(SAMPLE).expect("config parses");
        let entsoe = config.source("entsoe").expect("entsoe configured");

        let narrowed = entsoe
            .retain_descriptor("entsoe", "generation_per_type")
            .expect("known query");
        assert_eq!(narrowed.descriptor_names(), vec!["generation_per_type"]);

        let err = entsoe
            .retain_descriptor("entsoe", "total_load")
            .expect_err("must fail");
        assert!(matches!(err, ConfigError::UnknownReport { .. }));
    }

    #[test]
    fn blank_credential_is_absent() {
        let source = SourceConfig {
            api_key: Some(String::from("  ")),
            ..SourceConfig::default()
        };
        assert_eq!(source.credential(), None);
    }
}
