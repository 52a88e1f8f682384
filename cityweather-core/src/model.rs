use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A place returned by the geocoding service.
///
/// Two locations are considered the same place when their [`Location::identity`]
/// tuples are equal. Values are never mutated; a backfilled location is a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country_code: String,
    pub state: Option<String>,
}

impl Location {
    pub fn new(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        country_code: impl Into<String>,
        state: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            country_code: country_code.into(),
            state,
        }
    }

    /// A location known only by name, waiting for its coordinates.
    pub fn unresolved(name: impl Into<String>, country_code: impl Into<String>) -> Self {
        Self::new(name, 0.0, 0.0, country_code, None)
    }

    /// `(name, country_code)` exactly as received, no case folding.
    pub fn identity(&self) -> (&str, &str) {
        (self.name.as_str(), self.country_code.as_str())
    }

    /// False only when both coordinates are exactly zero.
    pub fn has_coordinates(&self) -> bool {
        !(self.latitude == 0.0 && self.longitude == 0.0)
    }

    /// Same place with both coordinates replaced.
    pub fn with_coordinates(&self, latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            ..self.clone()
        }
    }

    /// "Name, State, CC" with the state omitted when absent or blank.
    pub fn display_name(&self) -> String {
        match self.state.as_deref() {
            Some(state) if !state.trim().is_empty() => {
                format!("{}, {}, {}", self.name, state, self.country_code)
            }
            _ => format!("{}, {}", self.name, self.country_code),
        }
    }
}

/// Trimmed, non-empty user input for a city search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Returns `None` for empty or whitespace-only input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    /// First `n` characters of the query.
    pub fn prefix(&self, n: usize) -> String {
        self.0.chars().take(n).collect()
    }

    pub fn to_lowercase(&self) -> String {
        self.0.to_lowercase()
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherRequest {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&Location> for WeatherRequest {
    fn from(location: &Location) -> Self {
        Self {
            latitude: location.latitude,
            longitude: location.longitude,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub provider: String,
    pub location_name: String,
    pub country_code: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    /// Short group such as "Clear" or "Rain".
    pub condition: String,
    pub description: String,
    pub icon: String,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub visibility_m: u32,
    pub wind_speed_mps: f64,
    pub wind_deg: u16,
    pub observation_time: DateTime<Utc>,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    /// Shift from UTC in seconds for the observed location.
    pub timezone_offset_s: i32,
}

impl WeatherResponse {
    /// Sixteen-point compass direction the wind blows from.
    pub fn wind_direction(&self) -> &'static str {
        const DIRECTIONS: [&str; 16] = [
            "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW",
            "NW", "NNW",
        ];
        let index = (f64::from(self.wind_deg) / 22.5).round() as usize % DIRECTIONS.len();
        DIRECTIONS[index]
    }
}
