use std::collections::BTreeMap;
use std::sync::Arc;

use crate::api_client::{fetch_text, merge_params, ApiClient};
use crate::dialect::{EndpointDialect, LEGACY_CREDENTIAL_PARAM};
use crate::http_client::{HttpClient, HttpRequest};
use crate::{ConfigError, SourceId};

/// BMRS client for both the legacy and the public endpoint dialects.
#[derive(Clone)]
pub struct ElexonApiClient {
    base_url: String,
    api_key: Option<String>,
    dialect: EndpointDialect,
    http_client: Arc<dyn HttpClient>,
}

impl ElexonApiClient {
    /// Resolves the dialect from `base_url`. The legacy dialect refuses to
    /// construct without a credential.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        http_client: Arc<dyn HttpClient>,
    ) -> Result<Self, ConfigError> {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        let dialect = EndpointDialect::resolve(&base_url);
        let api_key = api_key.filter(|key| !key.trim().is_empty());

        if dialect.requires_credential() && api_key.is_none() {
            return Err(ConfigError::MissingCredential {
                source_name: SourceId::Elexon.to_string(),
            });
        }

        tracing::info!(
            source = %SourceId::Elexon,
            base_url = %base_url,
            dialect = %dialect,
            has_api_key = api_key.is_some(),
            "initialized api client"
        );

        Ok(Self {
            base_url,
            api_key,
            dialect,
            http_client,
        })
    }

    pub const fn dialect(&self) -> EndpointDialect {
        self.dialect
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, code: &str, version: &str, params: &BTreeMap<String, String>) -> HttpRequest {
        let mandated = self.dialect.mandated_params(self.api_key.as_deref());
        HttpRequest::get(self.dialect.url(&self.base_url, code, version))
            .with_query(merge_params(params, mandated))
            .with_header("Accept", self.dialect.media_type())
    }
}

impl ApiClient for ElexonApiClient {
    fn send(&self, code: &str, version: &str, params: &BTreeMap<String, String>) -> Option<String> {
        fetch_text(
            self.http_client.as_ref(),
            self.request(code, version, params),
            SourceId::Elexon.as_str(),
            &[LEGACY_CREDENTIAL_PARAM],
        )
    }

    fn request_url(&self, code: &str, version: &str, params: &BTreeMap<String, String>) -> String {
        self.request(code, version, params)
            .redacted_url(&[LEGACY_CREDENTIAL_PARAM])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::NoopHttpClient;

    #[test]
    fn legacy_dialect_requires_credential() {
        let err = ElexonApiClient::new(
            "https://api.bmreports.com/BMRS",
            Some(String::from("  ")),
            Arc::new(NoopHttpClient),
        )
        .err()
        .expect("must fail");
        assert!(matches!(err, ConfigError::MissingCredential { .. }));
    }

    #[test]
    fn public_dialect_is_keyless() {
        let client = ElexonApiClient::new(
            "https://data.elexon.co.uk/bmrs/api/v1/",
            None,
            Arc::new(NoopHttpClient),
        )
        .expect("public client builds without a key");

        assert_eq!(client.dialect(), EndpointDialect::Public);
        assert_eq!(
            client.request_url("B1610", "v1", &BTreeMap::new()),
            "https://data.elexon.co.uk/bmrs/api/v1/demand/actual/total?format=json"
        );
    }

    #[test]
    fn legacy_request_url_masks_api_key() {
        let client = ElexonApiClient::new(
            "https://api.bmreports.com/BMRS",
            Some(String::from("secret-key")),
            Arc::new(NoopHttpClient),
        )
        .expect("client builds");

        let url = client.request_url("B1610", "v2", &BTreeMap::new());
        assert!(url.starts_with("https://api.bmreports.com/BMRS/B1610/v2?"));
        assert!(url.contains("ServiceType=xml"));
        assert!(!url.contains("secret-key"));
    }
}
