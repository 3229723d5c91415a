use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{
    WeatherError, WeatherSnapshot,
    model::normalize_location,
    snapshot::{has_nearest_area, is_valid_snapshot},
};

use super::WeatherProvider;

/// Current conditions from wttr.in in its structured JSON format.
#[derive(Debug, Clone)]
pub struct WttrProvider {
    base_url: String,
    http: Client,
}

impl WttrProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WeatherError::network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { base_url: base_url.trim_end_matches('/').to_string(), http })
    }

    /// `{base}/{location}?format=j1`; no location leaves the path empty.
    pub fn request_url(&self, location: Option<&str>) -> String {
        let segment = normalize_location(location).map(urlencoding::encode).unwrap_or_default();
        format!("{}/{}?format=j1", self.base_url, segment)
    }
}

#[async_trait]
impl WeatherProvider for WttrProvider {
    #[instrument(skip(self))]
    async fn fetch(&self, location: Option<&str>) -> Result<WeatherSnapshot, WeatherError> {
        let location = normalize_location(location);
        let url = self.request_url(location);
        debug!(%url, "requesting weather");

        let res = self.http.get(&url).send().await.map_err(classify_transport)?;

        let status = res.status();
        if !status.is_success() {
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(WeatherError::location_not_found(location));
            }
            return Err(WeatherError::http_status(status.as_u16()));
        }

        let body = res.bytes().await.map_err(classify_transport)?;

        let payload: Value = serde_json::from_slice(&body)
            .map_err(|_| WeatherError::invalid_payload("response is not JSON"))?;

        if !has_nearest_area(&payload) {
            return Err(WeatherError::location_not_found(location));
        }

        if !is_valid_snapshot(&payload) {
            return Err(WeatherError::invalid_payload("required fields are missing"));
        }

        Ok(WeatherSnapshot(payload))
    }
}

fn classify_transport(err: reqwest::Error) -> WeatherError {
    if err.is_timeout() {
        WeatherError::network("request timed out")
    } else if err.is_connect() {
        WeatherError::network("could not connect to server")
    } else {
        WeatherError::network(format!("request failed: {err}"))
    }
}
