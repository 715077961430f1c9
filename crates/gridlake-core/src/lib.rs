//! # Gridlake Core
//!
//! Request planning, transport and document parsing for electricity-market
//! data published by ENTSO-E and Elexon BMRS.
//!
//! ## Overview
//!
//! - **Endpoint dialects** pick between the legacy keyed BMRS API and the
//!   public keyless Insights API from the configured base URL
//! - **Parameter builders** expand a report or query descriptor and a
//!   [`QueryWindow`] into one request per day or per settlement period
//! - **API clients** merge mandated parameters and fetch raw bodies
//! - **Connectors** compose the two and collect [`RawPayload`]s
//! - **Parsers** rebuild absolute timestamps and emit normalized records
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api_client`] | Per-source request URL construction and fetching |
//! | [`config`] | YAML configuration: sources, descriptors, storage, logging |
//! | [`connectors`] | Extraction per source and the connector registry |
//! | [`dialect`] | Legacy / public BMRS endpoint dialects |
//! | [`domain`] | Windows, resolutions, periods and record types |
//! | [`error`] | Validation and configuration errors |
//! | [`http_client`] | Blocking HTTP client abstraction |
//! | [`params`] | Parameter builders |
//! | [`parsers`] | JSON/XML document parsers and tabular output |
//! | [`placeholder`] | `${path}` and `${ENV}` reference resolution |
//! | [`source`] | Source identifiers |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Connector       │────▶│ ParameterBuilder │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ ApiClient       │────▶│ HttpClient       │
//! │ (per source)    │     │ (reqwest/noop)   │
//! └─────────────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ RawPayload      │────▶│ DocumentFamily   │
//! │ (bronze)        │     │ parser (silver)  │
//! └─────────────────┘     └──────────────────┘
//! ```
//!
//! ## Security
//!
//! - Credentials are redacted from every logged URL
//! - Legacy BMRS requests fail at construction without a key

pub mod api_client;
pub mod config;
pub mod connectors;
pub mod dialect;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod params;
pub mod parsers;
pub mod placeholder;
pub mod source;

// API clients
pub use api_client::{ApiClient, ElexonApiClient, EntsoeApiClient};

// Configuration
pub use config::{
    AppConfig, DateParamType, LoggingConfig, QueryDescriptor, ReportDescriptor, SourceConfig,
    StorageConfig,
};

// Connectors
pub use connectors::{
    Connector, ConnectorFactory, ConnectorRegistry, ElexonConnector, EntsoeConnector,
    PlannedRequest,
};

pub use dialect::EndpointDialect;

// Domain models
pub use domain::{
    BidOfferRecord, FlowRecord, GenerationRecord, LoadRecord, OutageRecord, Period,
    PhysicalNotificationRecord, PriceRecord, QueryWindow, RawPayload, RegisteredCapacityRecord,
    Resolution, SettlementPeriod, SettlementPeriodRange, TimeSeriesPoint, UtcDateTime,
};

// Error types
pub use error::{ConfigError, ValidationError};

// HTTP client types
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient,
};

pub use params::{
    ElexonParameterBuilder, Emission, EntsoeParameterBuilder, ParameterBuilder,
};

// Parsers
pub use parsers::{Document, DocumentError, DocumentFamily, Table, Tabular};

pub use source::SourceId;
