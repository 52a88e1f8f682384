//! Core library for the `cityweather` client.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The city search engine (multi-strategy geocoding, dedup, ranking, backfill)
//! - Abstraction over the current-weather provider
//! - Shared domain models (locations, weather requests and responses)
//!
//! It is used by `cityweather-cli`, but can also be embedded in other front ends.

pub mod config;
pub mod error;
pub mod geocode;
mod http;
pub mod model;
pub mod search;
pub mod weather;

pub use config::Config;
pub use error::{GeocodeError, SearchError};
pub use geocode::{GeocodeClient, MockGeocoder, OpenWeatherGeocoder};
pub use model::{Location, SearchQuery, WeatherRequest, WeatherResponse};
pub use search::{CitySearch, SearchSession, SearchUpdate};
pub use weather::{OpenWeatherProvider, WeatherProvider};
