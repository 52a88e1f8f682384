use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::{GeocodeError, SearchError},
    model::Location,
};

pub mod mock;
pub mod openweather;

pub use mock::MockGeocoder;
pub use openweather::OpenWeatherGeocoder;

/// A single query against a forward-geocoding service.
#[async_trait]
pub trait GeocodeClient: Send + Sync + Debug {
    /// Up to `limit` places matching free-text `query`.
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<Location>, GeocodeError>;

    /// Checked once per search, before any call to [`GeocodeClient::search`].
    fn check_credentials(&self) -> Result<(), SearchError> {
        Ok(())
    }
}
