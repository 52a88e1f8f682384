use thiserror::Error;

/// Why a single geocoding call produced no data.
///
/// The search pipeline only cares that a call failed; the variants exist for logging.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("request to geocoding service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("geocoding service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode geocoding response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors that abort a whole search attempt.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(
        "No OpenWeather API key configured.\n\
         Hint: run `cityweather configure` or set the OPENWEATHER_API_KEY environment variable."
    )]
    CredentialMissing,
}
