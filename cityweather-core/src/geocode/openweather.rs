use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::{
    Config,
    config::is_placeholder_key,
    error::{GeocodeError, SearchError},
    http::truncate_body,
    model::Location,
};

use super::GeocodeClient;

/// OpenWeather "direct" geocoding endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherGeocoder {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherGeocoder {
    pub fn new(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    /// A missing key is kept as empty so the failure surfaces when a search starts.
    pub fn from_config(config: &Config) -> Self {
        let api_key = config.api_key().map(str::to_owned).unwrap_or_default();
        Self::new(api_key, config.geocoding_url())
    }
}

#[derive(Debug, Deserialize)]
struct OwGeoEntry {
    name: String,
    lat: f64,
    lon: f64,
    country: String,
    state: Option<String>,
}

impl From<OwGeoEntry> for Location {
    fn from(entry: OwGeoEntry) -> Self {
        Location::new(entry.name, entry.lat, entry.lon, entry.country, entry.state)
    }
}

/// Only a plain 200 with a JSON array of places counts as success.
fn parse_response(status: StatusCode, body: &str) -> Result<Vec<Location>, GeocodeError> {
    if status != StatusCode::OK {
        return Err(GeocodeError::Status {
            status: status.as_u16(),
            body: truncate_body(body),
        });
    }

    let entries: Vec<OwGeoEntry> = serde_json::from_str(body)?;
    Ok(entries.into_iter().map(Location::from).collect())
}

#[async_trait]
impl GeocodeClient for OpenWeatherGeocoder {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<Location>, GeocodeError> {
        debug!(query, limit, "geocoding request");
        let limit = limit.to_string();

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("q", query),
                ("limit", limit.as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        parse_response(status, &body)
    }

    fn check_credentials(&self) -> Result<(), SearchError> {
        if is_placeholder_key(&self.api_key) {
            Err(SearchError::CredentialMissing)
        } else {
            Ok(())
        }
    }
}
