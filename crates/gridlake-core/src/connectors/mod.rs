//! Source connectors.
//!
//! A connector composes a parameter builder with an API client and turns a
//! [`QueryWindow`] into the raw payloads of every configured report or query.
//! Failed or empty emissions are skipped; extraction never aborts halfway.

mod elexon;
mod entsoe;
mod registry;

pub use elexon::ElexonConnector;
pub use entsoe::EntsoeConnector;
pub use registry::{ConnectorFactory, ConnectorRegistry};

use serde::Serialize;

use crate::api_client::ApiClient;
use crate::params::Emission;
use crate::{QueryWindow, RawPayload, SourceId};

/// Body the BMRS API sends with a `200` when the key is rejected.
pub const INVALID_CREDENTIAL_MARKER: &str = "The API key is invalid";

/// A request the connector would issue, for dry runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedRequest {
    pub descriptor: String,
    pub logical_path: String,
    pub url: String,
}

pub trait Connector {
    fn source(&self) -> SourceId;

    /// Every request `extract` would issue for `window`, in order, without
    /// touching the network.
    fn plan(&self, window: &QueryWindow) -> Vec<PlannedRequest>;

    fn extract(&self, window: &QueryWindow) -> Vec<RawPayload>;
}

/// Endpoint selector handed to [`ApiClient::send`].
pub(crate) struct Endpoint<'a> {
    pub descriptor: &'a str,
    pub code: &'a str,
    pub version: &'a str,
}

pub(crate) fn plan_emissions<C: ApiClient>(
    client: &C,
    endpoint: &Endpoint<'_>,
    emissions: Vec<Emission>,
) -> Vec<PlannedRequest> {
    emissions
        .into_iter()
        .map(|emission| PlannedRequest {
            descriptor: endpoint.descriptor.to_owned(),
            url: client.request_url(endpoint.code, endpoint.version, &emission.params),
            logical_path: emission.logical_path,
        })
        .collect()
}

/// Sends every emission in order and keeps the usable payloads.
pub(crate) fn fetch_emissions<C: ApiClient>(
    client: &C,
    source: SourceId,
    endpoint: &Endpoint<'_>,
    emissions: Vec<Emission>,
    out: &mut Vec<RawPayload>,
) {
    tracing::info!(
        source = %source,
        report = endpoint.descriptor,
        requests = emissions.len(),
        "processing report"
    );

    for emission in emissions {
        let Some(body) = client.send(endpoint.code, endpoint.version, &emission.params) else {
            tracing::warn!(
                source = %source,
                path = %emission.logical_path,
                "no payload returned, skipping"
            );
            continue;
        };
        if body.contains(INVALID_CREDENTIAL_MARKER) {
            tracing::warn!(
                source = %source,
                path = %emission.logical_path,
                "credential rejected by upstream, skipping"
            );
            continue;
        }
        match RawPayload::new(body, source.as_str(), emission.logical_path.clone()) {
            Some(payload) => out.push(payload),
            None => {
                tracing::warn!(
                    source = %source,
                    path = %emission.logical_path,
                    "empty payload, skipping"
                );
            }
        }
    }
}
