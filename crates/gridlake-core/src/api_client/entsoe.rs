use std::collections::BTreeMap;
use std::sync::Arc;

use crate::api_client::{fetch_text, merge_params, ApiClient};
use crate::http_client::{HttpClient, HttpRequest};
use crate::{ConfigError, SourceId};

/// Security token parameter of the ENTSO-E transparency API.
pub const SECURITY_TOKEN_PARAM: &str = "securityToken";

/// ENTSO-E transparency platform client. Every query is a GET on the base
/// URL itself; `code` and `version` are ignored.
#[derive(Clone)]
pub struct EntsoeApiClient {
    base_url: String,
    security_token: String,
    http_client: Arc<dyn HttpClient>,
}

impl EntsoeApiClient {
    pub fn new(
        base_url: impl Into<String>,
        security_token: Option<String>,
        http_client: Arc<dyn HttpClient>,
    ) -> Result<Self, ConfigError> {
        let security_token = security_token
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingCredential {
                source_name: SourceId::Entsoe.to_string(),
            })?;
        let base_url = base_url.into();

        tracing::info!(source = %SourceId::Entsoe, base_url = %base_url, "initialized api client");

        Ok(Self {
            base_url,
            security_token,
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, params: &BTreeMap<String, String>) -> HttpRequest {
        let mandated = BTreeMap::from([(
            SECURITY_TOKEN_PARAM.to_owned(),
            self.security_token.clone(),
        )]);
        HttpRequest::get(&self.base_url)
            .with_query(merge_params(params, mandated))
            .with_header("Accept", "application/xml")
    }
}

impl ApiClient for EntsoeApiClient {
    fn send(&self, _code: &str, _version: &str, params: &BTreeMap<String, String>) -> Option<String> {
        fetch_text(
            self.http_client.as_ref(),
            self.request(params),
            SourceId::Entsoe.as_str(),
            &[SECURITY_TOKEN_PARAM],
        )
    }

    fn request_url(&self, _code: &str, _version: &str, params: &BTreeMap<String, String>) -> String {
        self.request(params).redacted_url(&[SECURITY_TOKEN_PARAM])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::NoopHttpClient;

    #[test]
    fn missing_token_fails_fast() {
        let err = EntsoeApiClient::new(
            "https://web-api.tp.entsoe.eu/api",
            None,
            Arc::new(NoopHttpClient),
        )
        .err()
        .expect("must fail");
        assert!(matches!(
            err,
            ConfigError::MissingCredential { source_name } if source_name == "entsoe"
        ));
    }

    #[test]
    fn caller_cannot_override_security_token() {
        let client = EntsoeApiClient::new(
            "https://web-api.tp.entsoe.eu/api",
            Some(String::from("token")),
            Arc::new(NoopHttpClient),
        )
        .expect("client builds");
        let params = BTreeMap::from([
            (String::from("securityToken"), String::from("forged")),
            (String::from("documentType"), String::from("A65")),
        ]);

        let request = client.request(&params);
        assert_eq!(
            request.query.get(SECURITY_TOKEN_PARAM).map(String::as_str),
            Some("token")
        );
        assert_eq!(
            client.request_url("", "", &params),
            "https://web-api.tp.entsoe.eu/api?documentType=A65&securityToken=%2A%2A%2A"
        );
    }
}
