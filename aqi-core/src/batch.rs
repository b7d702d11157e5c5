//! Best-effort AQI sampling along a route.
//!
//! All point lookups run concurrently, each under its own timeout. A lookup
//! that errors or times out is replaced by [`DEFAULT_SAMPLE_AQI`]; the batch
//! itself never fails.

use crate::error::GatewayError;
use crate::gateway::AirQualitySource;
use crate::geo::Coordinate;
use futures::future::join_all;
use log::{info, warn};
use std::time::Duration;

/// Substitute for a failed point lookup: the upper edge of "Good".
pub const DEFAULT_SAMPLE_AQI: f64 = 50.0;

/// Per-point timeout used when the caller has no preference.
pub const DEFAULT_SAMPLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Look up the AQI at every point. The output has one value per input
/// point, in input order.
pub async fn sample_route_aqi<S: AirQualitySource + Sync>(
    source: &S,
    points: &[Coordinate],
    per_item_timeout: Duration,
) -> Vec<f64> {
    let lookups = points.iter().map(|point| async move {
        let result = match tokio::time::timeout(per_item_timeout, source.fetch_point_aqi(*point)).await {
            Ok(result) => result,
            Err(_) => Err(GatewayError::Timeout),
        };
        match result {
            Ok(aqi) => aqi,
            Err(e) => {
                warn!(
                    "AQI lookup at {:.4},{:.4} failed ({}), using {}",
                    point.lat, point.lon, e, DEFAULT_SAMPLE_AQI
                );
                DEFAULT_SAMPLE_AQI
            }
        }
    });
    let samples = join_all(lookups).await;
    info!("Sampled AQI at {} route points", samples.len());
    samples
}
