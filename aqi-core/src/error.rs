use thiserror::Error;

/// Errors from talking to the geocoding, AQI, and routing providers.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("HTTP request failed: {0}")]
    Http(Box<dyn std::error::Error + Send + Sync>),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("AQI provider token not configured")]
    MissingToken,

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("No AQI reading available at lat={0}, lon={1}")]
    NoReading(f64, f64),

    #[error("Request timed out")]
    Timeout,
}
