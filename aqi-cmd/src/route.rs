//! Route analysis: geocode both ends, fetch the driving route, sample AQI
//! along it, and color the segments.

use crate::geojson;
use crate::search::first_place;
use aqi_core::batch::sample_route_aqi;
use aqi_core::category::Scale;
use aqi_core::gateway::{or_fallback, HttpGateway};
use aqi_data::report::RouteReport;
use aqi_data::sampling::sample_points;
use log::info;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub from: String,
    pub to: String,
    pub samples: usize,
    pub sample_timeout: Duration,
    pub geojson: Option<PathBuf>,
    pub coarse: bool,
}

pub fn format_distance(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{:.1} km", meters / 1000.0)
    } else {
        format!("{:.0} m", meters)
    }
}

pub fn format_duration(seconds: f64) -> String {
    let minutes = (seconds / 60.0).round() as u64;
    if minutes >= 60 {
        format!("{} h {} min", minutes / 60, minutes % 60)
    } else {
        format!("{} min", minutes)
    }
}

pub async fn run_route(gateway: &HttpGateway, request: &RouteRequest) -> anyhow::Result<()> {
    let start = first_place(gateway, &request.from).await?;
    let end = first_place(gateway, &request.to).await?;
    info!("Routing {} -> {}", start.short_name(), end.short_name());

    let route = match or_fallback(
        gateway.fetch_route(start.position(), end.position()).await,
        None,
        "Fetching route",
    ) {
        Some(route) => route,
        None => {
            println!("No route found between {} and {}.", start.short_name(), end.short_name());
            return Ok(());
        }
    };

    let points = sample_points(&route.coordinates, request.samples);
    info!(
        "Route has {} coordinates, sampling {} points",
        route.coordinates.len(),
        points.len()
    );
    let samples = sample_route_aqi(gateway, &points, request.sample_timeout).await;

    let scale = if request.coarse { Scale::Coarse } else { Scale::Full };
    let report = match RouteReport::build_with(&route.coordinates, &samples, scale) {
        Some(report) => report,
        None => {
            println!("Route is too short to color.");
            return Ok(());
        }
    };

    println!(
        "{} -> {}: {}, {}",
        start.short_name(),
        end.short_name(),
        format_distance(route.distance),
        format_duration(route.duration)
    );
    println!(
        "AQI along route: min {:.0}, mean {:.0}, max {:.0} (worst: {})",
        report.min_aqi,
        report.mean_aqi,
        report.max_aqi,
        report.worst.label()
    );
    for (color, count) in report.color_runs() {
        println!("  {} {} segments", color, count);
    }
    let b = &report.bounds;
    println!(
        "Bounds: lat {:.4}..{:.4}, lon {:.4}..{:.4}",
        b.min_lat, b.max_lat, b.min_lon, b.max_lon
    );

    if let Some(path) = &request.geojson {
        geojson::write(path, &geojson::route_collection(&report, &start, &end))?;
        info!("Wrote {} route segments to {}", report.segments.len(), path.display());
    }
    Ok(())
}
