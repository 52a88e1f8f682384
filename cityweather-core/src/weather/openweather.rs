use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::{
    Config,
    http::truncate_body,
    model::{WeatherRequest, WeatherResponse},
};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    /// Fails with `CredentialMissing` when no usable key is configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.api_key()?;
        Ok(Self::new(api_key.to_owned(), config.weather_url()))
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    #[serde(default)]
    deg: u16,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    timezone: i32,
    #[serde(default)]
    visibility: u32,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    sys: OwSys,
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn into_response(parsed: OwCurrentResponse) -> WeatherResponse {
    let observation_time = unix_to_utc(parsed.dt).unwrap_or_else(Utc::now);
    let sunrise = unix_to_utc(parsed.sys.sunrise).unwrap_or(observation_time);
    let sunset = unix_to_utc(parsed.sys.sunset).unwrap_or(observation_time);

    let (condition, description, icon) = parsed
        .weather
        .into_iter()
        .next()
        .map(|w| (w.main, w.description, w.icon))
        .unwrap_or_else(|| ("Unknown".to_string(), "unknown".to_string(), String::new()));

    WeatherResponse {
        provider: "openweather".to_string(),
        location_name: parsed.name,
        country_code: parsed.sys.country,
        temperature_c: parsed.main.temp,
        feels_like_c: parsed.main.feels_like,
        temp_min_c: parsed.main.temp_min,
        temp_max_c: parsed.main.temp_max,
        condition,
        description,
        icon,
        humidity_pct: parsed.main.humidity,
        pressure_hpa: parsed.main.pressure,
        visibility_m: parsed.visibility,
        wind_speed_mps: parsed.wind.speed,
        wind_deg: parsed.wind.deg,
        observation_time,
        sunrise,
        sunset,
        timezone_offset_s: parsed.timezone,
    }
}

/// Any 2xx with a current-weather document is a success.
fn parse_current(status: StatusCode, body: &str) -> Result<WeatherResponse> {
    if !status.is_success() {
        return Err(anyhow!(
            "Weather lookup rejected by OpenWeather ({}): {}",
            status,
            truncate_body(body),
        ));
    }

    let parsed: OwCurrentResponse = serde_json::from_str(body)
        .context("Weather lookup returned a document cityweather cannot read")?;

    Ok(into_response(parsed))
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn get_weather(&self, request: &WeatherRequest) -> Result<WeatherResponse> {
        debug!(lat = request.latitude, lon = request.longitude, "current weather request");

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("lat", request.latitude.to_string()),
                ("lon", request.longitude.to_string()),
                ("units", "metric".to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await
            .with_context(|| {
                format!(
                    "Weather lookup for ({}, {}) could not reach OpenWeather",
                    request.latitude, request.longitude
                )
            })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Weather lookup response was cut off")?;

        parse_current(status, &body)
    }
}
