use reqwest::Url;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::{
    error::{MetarError, Result},
    http::{HttpClient, HttpRequest, ReqwestClient},
    model::{Observation, ResponseEnvelope},
};

/// Public ADDS data server.
pub const DEFAULT_ENDPOINT: &str = "https://aviationweather.gov/api/data/dataserver";

/// Only reports from the last two hours are considered current.
const HOURS_BEFORE_NOW: &str = "2";

/// Fetches the current METAR for a station through an injected [`HttpClient`].
///
/// Cheap to clone; clones share the client.
#[derive(Debug, Clone)]
pub struct MetarFetcher {
    client: Arc<dyn HttpClient>,
    endpoint: Url,
}

impl Default for MetarFetcher {
    fn default() -> Self {
        Self::new(Arc::new(ReqwestClient::new()))
    }
}

impl MetarFetcher {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self { client, endpoint: default_endpoint() }
    }

    /// Point the fetcher at another data server (mirror, test server).
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The request asking for the most recent METAR of `station`.
    ///
    /// The station code is sent as given; the data server decides whether it is valid.
    pub fn request_for(&self, station: &str) -> HttpRequest {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("requestType", "retrieve")
            .append_pair("dataSource", "metars")
            .append_pair("stationString", station)
            .append_pair("hoursBeforeNow", HOURS_BEFORE_NOW)
            .append_pair("mostRecent", "true")
            .append_pair("format", "xml");

        HttpRequest::get(url.as_str())
    }

    /// Fetch the last report of `station` if it was issued during the last 2 hours.
    pub async fn fetch_current_station_weather(&self, station: &str) -> Result<Observation> {
        let request = self.request_for(station);
        debug!(url = %request.url, "requesting METAR");

        let response = self.client.execute(request).await?;
        if !response.is_success() {
            warn!(status = response.status, station, "data server answered with non-success status");
        }

        decode_response(&response.body, station)
    }
}

/// Decode a data server response body and pick its single observation.
///
/// `station` is only used to describe a `NoData` error.
pub fn decode_response(body: &str, station: &str) -> Result<Observation> {
    let envelope: ResponseEnvelope = quick_xml::de::from_str(body)?;
    let data = envelope.data;
    debug!(declared = data.num_results, decoded = data.observations.len(), "decoded METAR response");

    if data.num_results != data.observations.len() {
        return Err(MetarError::InconsistentCount {
            declared: data.num_results,
            actual: data.observations.len(),
        });
    }

    data.observations
        .into_iter()
        .next()
        .ok_or_else(|| MetarError::NoData { station: station.to_string() })
}

/// Fetch with the default `reqwest` transport and endpoint.
pub async fn fetch_current_station_weather(station: &str) -> Result<Observation> {
    MetarFetcher::default().fetch_current_station_weather(station).await
}

fn default_endpoint() -> Url {
    Url::parse(DEFAULT_ENDPOINT).expect("DEFAULT_ENDPOINT is a valid URL")
}
