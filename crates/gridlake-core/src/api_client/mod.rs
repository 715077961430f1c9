//! Per-source HTTP clients.
//!
//! A client issues one blocking GET per call. Transport failures and
//! non-success statuses are logged and reported as `None`; nothing here
//! returns an error once the client has been constructed.

mod elexon;
mod entsoe;

use std::collections::BTreeMap;

pub use elexon::ElexonApiClient;
pub use entsoe::EntsoeApiClient;

use crate::http_client::{HttpClient, HttpRequest};

pub trait ApiClient {
    /// Fetches one report/query page. `code` and `version` select the
    /// endpoint path where the source addresses reports by path.
    fn send(&self, code: &str, version: &str, params: &BTreeMap<String, String>)
        -> Option<String>;

    /// The encoded URL `send` would request, with credentials masked.
    fn request_url(&self, code: &str, version: &str, params: &BTreeMap<String, String>) -> String;
}

/// Caller params overlaid with the mandated ones; mandated keys win.
pub(crate) fn merge_params(
    params: &BTreeMap<String, String>,
    mandated: BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut merged = params.clone();
    merged.extend(mandated);
    merged
}

/// Executes `request` and returns the body of a 2xx response.
pub(crate) fn fetch_text(
    http: &dyn HttpClient,
    request: HttpRequest,
    source: &str,
    secret_keys: &[&str],
) -> Option<String> {
    let url = request.redacted_url(secret_keys);
    tracing::debug!(source, url = %url, "sending request");

    match http.execute(request) {
        Ok(response) if response.is_success() => {
            tracing::debug!(
                source,
                url = %url,
                status = response.status,
                bytes = response.body.len(),
                "request succeeded"
            );
            Some(response.body)
        }
        Ok(response) => {
            tracing::error!(
                source,
                url = %url,
                status = response.status,
                "upstream returned non-success status"
            );
            None
        }
        Err(error) => {
            tracing::error!(source, url = %url, error = %error, "request failed");
            None
        }
    }
}
