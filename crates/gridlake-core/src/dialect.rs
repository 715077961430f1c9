//! Endpoint dialects of the BMRS-style API.
//!
//! The legacy BMRS endpoints want an `APIKey` plus `ServiceType=xml` on every
//! call and address reports as `{code}/{version}`. The public Insights
//! endpoints on `data.elexon.co.uk` are keyless, answer in JSON when asked
//! with `format=json`, and move some reports to descriptive paths.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Host marker that identifies the public, keyless API.
pub const PUBLIC_HOST_MARKER: &str = "data.elexon.co.uk";

/// Credential parameter of the legacy dialect.
pub const LEGACY_CREDENTIAL_PARAM: &str = "APIKey";

/// Report codes the public API serves under a descriptive path.
const PUBLIC_PATHS: [(&str, &str); 2] = [
    ("B1620", "generation/actual/per-type"),
    ("B1610", "demand/actual/total"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointDialect {
    Legacy,
    Public,
}

impl EndpointDialect {
    pub fn resolve(base_url: &str) -> Self {
        if base_url.contains(PUBLIC_HOST_MARKER) {
            Self::Public
        } else {
            Self::Legacy
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Public => "public",
        }
    }

    pub const fn requires_credential(self) -> bool {
        matches!(self, Self::Legacy)
    }

    /// Relative request path for a report. Table entries win over the
    /// generic `{code}/{version}` form.
    pub fn path(self, code: &str, version: &str) -> String {
        if self == Self::Public {
            if let Some((_, path)) = PUBLIC_PATHS.iter().find(|(known, _)| *known == code) {
                return (*path).to_owned();
            }
        }
        format!("{code}/{version}")
    }

    /// Full request URL for a report under `base_url`.
    pub fn url(self, base_url: &str, code: &str, version: &str) -> String {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            self.path(code, version)
        )
    }

    /// Serialization parameters every request in this dialect carries.
    pub fn content_params(self) -> BTreeMap<String, String> {
        let (key, value) = match self {
            Self::Legacy => ("ServiceType", "xml"),
            Self::Public => ("format", "json"),
        };
        BTreeMap::from([(key.to_owned(), value.to_owned())])
    }

    /// Every parameter the dialect imposes, credential included.
    pub fn mandated_params(self, credential: Option<&str>) -> BTreeMap<String, String> {
        let mut params = self.content_params();
        if let (Self::Legacy, Some(key)) = (self, credential) {
            params.insert(LEGACY_CREDENTIAL_PARAM.to_owned(), key.to_owned());
        }
        params
    }

    pub const fn file_extension(self) -> &'static str {
        match self {
            Self::Legacy => "xml",
            Self::Public => "json",
        }
    }

    pub const fn media_type(self) -> &'static str {
        match self {
            Self::Legacy => "application/xml",
            Self::Public => "application/json",
        }
    }
}

impl Display for EndpointDialect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_dialect_from_host() {
        assert_eq!(
            EndpointDialect::resolve("https://data.elexon.co.uk/bmrs/api/v1"),
            EndpointDialect::Public
        );
        assert_eq!(
            EndpointDialect::resolve("https://api.bmreports.com/BMRS"),
            EndpointDialect::Legacy
        );
    }

    #[test]
    fn public_path_table_wins_over_generic_path() {
        assert_eq!(
            EndpointDialect::Public.path("B1620", "v1"),
            "generation/actual/per-type"
        );
        assert_eq!(EndpointDialect::Public.path("B1430", "v1"), "B1430/v1");
        assert_eq!(EndpointDialect::Legacy.path("B1620", "v1"), "B1620/v1");
    }

    #[test]
    fn url_joins_without_double_slash() {
        assert_eq!(
            EndpointDialect::Legacy.url("https://api.bmreports.com/BMRS/", "B1610", "v2"),
            "https://api.bmreports.com/BMRS/B1610/v2"
        );
    }

    #[test]
    fn mandated_params_follow_dialect() {
        let legacy = EndpointDialect::Legacy.mandated_params(Some("k"));
        assert_eq!(legacy.get("APIKey").map(String::as_str), Some("k"));
        assert_eq!(legacy.get("ServiceType").map(String::as_str), Some("xml"));

        let public = EndpointDialect::Public.mandated_params(Some("ignored"));
        assert_eq!(public.len(), 1);
        assert_eq!(public.get("format").map(String::as_str), Some("json"));
    }
}
