use async_trait::async_trait;
use std::fmt::Debug;

use crate::model::{WeatherRequest, WeatherResponse};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Current conditions at a coordinate.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_weather(&self, request: &WeatherRequest) -> anyhow::Result<WeatherResponse>;
}
