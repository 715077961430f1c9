//! Shared fixtures for the gridlake behavior tests.

use std::sync::{Mutex, PoisonError};

pub use gridlake_core::{
    AppConfig, HttpClient, HttpError, HttpRequest, HttpResponse, QueryWindow, SourceConfig,
};
pub use std::sync::Arc;

type Responder = dyn Fn(&HttpRequest) -> Result<HttpResponse, HttpError> + Send + Sync;

/// In-process transport that records every request it is handed.
pub struct RecordingHttpClient {
    requests: Mutex<Vec<HttpRequest>>,
    responder: Box<Responder>,
}

impl RecordingHttpClient {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&HttpRequest) -> Result<HttpResponse, HttpError> + Send + Sync + 'static,
    {
        Self {
            requests: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        }
    }

    /// Answers every request with `200` and `body`.
    pub fn always(body: &str) -> Self {
        let body = body.to_owned();
        Self::new(move |_| Ok(HttpResponse::ok(body.clone())))
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl HttpClient for RecordingHttpClient {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let response = (self.responder)(&request);
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
        response
    }
}

pub fn window(start: &str, end: &str) -> QueryWindow {
    QueryWindow::parse(start, end).expect("valid window")
}

pub fn source_config(yaml: &str) -> SourceConfig {
    serde_yaml::from_str(yaml).expect("valid source config")
}

pub mod fixtures {
    /// ENTSO-E A75 document: solar (B16) and onshore wind (B19), one PT30M
    /// period of four points each.
    pub const GENERATION_TWO_SERIES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<GL_MarketDocument xmlns="urn:iec62325.351:tc57wg16:451-6:generationloaddocument:3:0">
  <mRID>abc</mRID>
  <TimeSeries>
    <mRID>1</mRID>
    <MktPSRType><psrType>B16</psrType></MktPSRType>
    <Period>
      <timeInterval><start>2024-01-15T00:00Z</start><end>2024-01-15T02:00Z</end></timeInterval>
      <resolution>PT30M</resolution>
      <Point><position>1</position><quantity>0</quantity></Point>
      <Point><position>2</position><quantity>1.5</quantity></Point>
      <Point><position>3</position><quantity>3</quantity></Point>
      <Point><position>4</position><quantity>4.5</quantity></Point>
    </Period>
  </TimeSeries>
  <TimeSeries>
    <mRID>2</mRID>
    <MktPSRType><psrType>B19</psrType></MktPSRType>
    <Period>
      <timeInterval><start>2024-01-15T00:00Z</start><end>2024-01-15T02:00Z</end></timeInterval>
      <resolution>PT30M</resolution>
      <Point><position>1</position><quantity>8123</quantity></Point>
      <Point><position>2</position><quantity>8200</quantity></Point>
      <Point><position>3</position><quantity>8350</quantity></Point>
      <Point><position>4</position><quantity>8411</quantity></Point>
    </Period>
  </TimeSeries>
</GL_MarketDocument>"#;

    /// ENTSO-E A44 day-ahead prices, hourly.
    pub const PRICES_XML: &str = r#"<Publication_MarketDocument xmlns="urn:iec62325.351:tc57wg16:451-3:publicationdocument:7:3">
  <TimeSeries>
    <currency_Unit.name>EUR</currency_Unit.name>
    <Period>
      <timeInterval><start>2024-01-14T23:00Z</start><end>2024-01-15T02:00Z</end></timeInterval>
      <resolution>PT60M</resolution>
      <Point><position>1</position><price.amount>85.12</price.amount></Point>
      <Point><position>2</position><price.amount>80.01</price.amount></Point>
      <Point><position>3</position><price.amount>-3.5</price.amount></Point>
    </Period>
  </TimeSeries>
</Publication_MarketDocument>"#;

    /// ENTSO-E acknowledgement returned when a query has no data.
    pub const ACKNOWLEDGEMENT_XML: &str = r#"<Acknowledgement_MarketDocument xmlns="urn:iec62325.351:tc57wg16:451-1:acknowledgementdocument:7:0">
  <Reason><code>999</code><text>No matching data found</text></Reason>
</Acknowledgement_MarketDocument>"#;

    /// Public BMRS `generation/actual/per-type` response.
    pub const PUBLIC_GENERATION_JSON: &str = r#"{
  "data": [
    {"publishTime":"2024-01-15T00:35:00Z","startTime":"2024-01-15T00:00:00Z","settlementDate":"2024-01-15","settlementPeriod":1,"psrType":"Wind Onshore","quantity":5021.4},
    {"publishTime":"2024-01-15T00:35:00Z","startTime":"2024-01-15T00:00:00Z","settlementDate":"2024-01-15","settlementPeriod":1,"psrType":"Solar","quantity":0},
    {"publishTime":"2024-01-15T01:05:00Z","startTime":"2024-01-15T00:30:00Z","settlementDate":"2024-01-15","settlementPeriod":2,"psrType":"Wind Onshore","quantity":5102}
  ]
}"#;

    /// Public BMRS `demand/actual/total` response without `startTime`.
    pub const PUBLIC_LOAD_JSON: &str = r#"{"data":[
  {"settlementDate":"2023-07-18","settlementPeriod":1,"quantity":22100},
  {"settlementDate":"2023-07-18","settlementPeriod":48,"quantity":21050}
]}"#;

    /// Legacy BMRS B1510 planned unavailability.
    pub const OUTAGES_XML: &str = r#"<response>
  <responseMetadata><httpCode>200</httpCode></responseMetadata>
  <responseBody>
    <responseList>
      <item>
        <bMUnitID>T_HEYM27</bMUnitID>
        <startDateTimeUTC>2024-01-20 06:00:00</startDateTimeUTC>
        <endDateTimeUTC>2024-02-03 18:00:00</endDateTimeUTC>
        <capacityUnavailable>660</capacityUnavailable>
        <outageType>Planned</outageType>
      </item>
      <item>
        <bMUnitID>T_DRAXX-2</bMUnitID>
        <startDateTimeUTC>2024-01-16 00:00:00</startDateTimeUTC>
        <capacityUnavailable>not known</capacityUnavailable>
      </item>
    </responseList>
  </responseBody>
</response>"#;

    /// Legacy BMRS physical notification levels for one unit.
    pub const PHYSICAL_NOTIFICATIONS_XML: &str = r#"<response>
  <responseBody>
    <responseList>
      <TimeSeries>
        <bMUnitID>T_WBURB-1</bMUnitID>
        <Period>
          <timeInterval><start>2024-01-15T00:00Z</start></timeInterval>
          <Point><position>1</position><quantity>400</quantity></Point>
          <Point><position>2</position><quantity>420</quantity></Point>
        </Period>
      </TimeSeries>
    </responseList>
  </responseBody>
</response>"#;

    /// Public BMRS bid-offer levels, flat records.
    pub const BID_OFFER_JSON: &str = r#"{"data":[
  {"settlementDate":"2024-01-15","settlementPeriod":2,"bmUnitID":"T_ABC-1","bidPrice":-20.5,"offerPrice":85,"bidVolume":-50,"offerVolume":50},
  {"settlementDate":"2024-01-15","settlementPeriod":1,"bmUnitID":"T_ZZZ-9","bidPrice":-10,"offerPrice":99.9,"bidVolume":-5,"offerVolume":5}
]}"#;
}
