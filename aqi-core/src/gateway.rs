//! HTTP client for the geocoding, AQI, and routing providers.
//!
//! Every call returns a `Result`. Callers that want the viewer's
//! "notify and carry on" behaviour wrap the result with [`or_fallback`],
//! which logs a warning and substitutes an empty or neutral value.

use crate::error::GatewayError;
use crate::geo::{BoundingBox, Coordinate};
use crate::place::{parse_geocode_response, Place};
use crate::reading::{parse_bounds_response, parse_feed_response, AqiReading};
use crate::route::{parse_route_response, Route};
use log::{debug, warn};
use reqwest::{Client, Request, StatusCode};
use std::future::Future;
use std::time::Duration;

pub const DEFAULT_GEOCODE_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_AQI_URL: &str = "https://api.waqi.info";
pub const DEFAULT_ROUTE_URL: &str = "https://router.project-osrm.org";

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        GatewayError::Http(Box::new(e))
    }
}

/// Everything the gateway needs, supplied by the caller at construction.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Credential for the AQI provider. Station and point queries fail
    /// with [`GatewayError::MissingToken`] without it.
    pub token: Option<String>,
    pub timeout: Duration,
    pub geocode_url: String,
    pub aqi_url: String,
    pub route_url: String,
    /// The public geocoder rejects requests without an identifying agent.
    pub user_agent: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            token: None,
            timeout: Duration::from_secs(30),
            geocode_url: DEFAULT_GEOCODE_URL.to_string(),
            aqi_url: DEFAULT_AQI_URL.to_string(),
            route_url: DEFAULT_ROUTE_URL.to_string(),
            user_agent: concat!("aqi-map/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Point AQI lookups, the one capability the route sampler needs.
pub trait AirQualitySource {
    fn fetch_point_aqi(
        &self,
        point: Coordinate,
    ) -> impl Future<Output = Result<f64, GatewayError>> + Send;
}

/// Data fetch gateway backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    config: GatewayConfig,
}

impl HttpGateway {
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(HttpGateway { client, config })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    fn token(&self) -> Result<&str, GatewayError> {
        match self.config.token.as_deref() {
            Some(t) if !t.trim().is_empty() => Ok(t),
            _ => Err(GatewayError::MissingToken),
        }
    }

    fn trimmed(base: &str) -> &str {
        base.trim_end_matches('/')
    }

    pub fn geocode_request(&self, query: &str) -> Result<Request, GatewayError> {
        let url = format!("{}/search", Self::trimmed(&self.config.geocode_url));
        Ok(self
            .client
            .get(url)
            .query(&[("format", "json"), ("q", query)])
            .build()?)
    }

    pub fn bounds_request(&self, bounds: &BoundingBox) -> Result<Request, GatewayError> {
        let token = self.token()?;
        let url = format!("{}/v2/map/bounds", Self::trimmed(&self.config.aqi_url));
        Ok(self
            .client
            .get(url)
            .query(&[("latlng", bounds.latlng_param().as_str()), ("token", token)])
            .build()?)
    }

    pub fn feed_request(&self, point: Coordinate) -> Result<Request, GatewayError> {
        let token = self.token()?;
        let url = format!(
            "{}/feed/geo:{};{}/",
            Self::trimmed(&self.config.aqi_url),
            point.lat,
            point.lon
        );
        Ok(self.client.get(url).query(&[("token", token)]).build()?)
    }

    pub fn route_request(&self, start: Coordinate, end: Coordinate) -> Result<Request, GatewayError> {
        let url = format!(
            "{}/route/v1/driving/{},{};{},{}",
            Self::trimmed(&self.config.route_url),
            start.lon,
            start.lat,
            end.lon,
            end.lat
        );
        Ok(self
            .client
            .get(url)
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .build()?)
    }

    /// Execute a request and return its body. The routing provider answers
    /// "no route" with a 400 and a JSON body, so client errors still hand
    /// the body back for parsing.
    async fn execute(&self, request: Request) -> Result<String, GatewayError> {
        // path only; the query string carries the token
        debug!("GET {}{}", request.url().host_str().unwrap_or(""), request.url().path());
        let response = self.client.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;
        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            return Err(GatewayError::Provider(format!("status {}", status)));
        }
        Ok(body)
    }

    /// Search for places by name. An empty query returns no places without
    /// touching the network.
    pub async fn geocode(&self, query: &str) -> Result<Vec<Place>, GatewayError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let request = self.geocode_request(query)?;
        let body = self.execute(request).await?;
        parse_geocode_response(&body)
    }

    pub async fn fetch_stations_in_bounds(
        &self,
        bounds: &BoundingBox,
    ) -> Result<Vec<AqiReading>, GatewayError> {
        let request = self.bounds_request(bounds)?;
        let body = self.execute(request).await?;
        parse_bounds_response(&body)
    }

    pub async fn fetch_route(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<Option<Route>, GatewayError> {
        let request = self.route_request(start, end)?;
        let body = self.execute(request).await?;
        parse_route_response(&body)
    }
}

impl AirQualitySource for HttpGateway {
    async fn fetch_point_aqi(&self, point: Coordinate) -> Result<f64, GatewayError> {
        let request = self.feed_request(point)?;
        let body = self.execute(request).await?;
        parse_feed_response(&body, point)
    }
}

/// Log a failed call and substitute `fallback`.
pub fn or_fallback<T>(result: Result<T, GatewayError>, fallback: T, what: &str) -> T {
    match result {
        Ok(value) => value,
        Err(GatewayError::MissingToken) => {
            warn!("{}: no AQI provider token configured, set one with `token set`", what);
            fallback
        }
        Err(e) => {
            warn!("{} failed: {}", what, e);
            fallback
        }
    }
}
