//! Station readings for an area.

use crate::geojson;
use crate::search::first_place;
use aqi_core::category::Scale;
use aqi_core::gateway::{or_fallback, HttpGateway};
use aqi_core::geo::{BoundingBox, Coordinate};
use aqi_core::reading::AqiReading;
use aqi_data::overlay::CategoryCounts;
use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// What region to query.
#[derive(Debug, Clone)]
pub enum Area {
    Place(String),
    Point(Coordinate),
    ContiguousUs,
}

/// Optional files to write alongside the console listing.
#[derive(Debug, Default)]
pub struct Output {
    pub csv: Option<PathBuf>,
    pub geojson: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct StationRow<'a> {
    station: &'a str,
    lat: f64,
    lon: f64,
    aqi: f64,
    category: &'static str,
    color: &'static str,
    observed_at: Option<String>,
}

/// Write readings as CSV with a header row.
pub fn write_csv(path: &Path, readings: &[AqiReading]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for r in readings {
        let classification = r.classify();
        writer.serialize(StationRow {
            station: r.station_label(),
            lat: r.lat,
            lon: r.lon,
            aqi: r.aqi,
            category: classification.label(),
            color: classification.color,
            observed_at: r.observed_at.map(|t| t.to_rfc3339()),
        })?;
    }
    writer.flush()?;
    Ok(())
}

async fn resolve_bounds(
    gateway: &HttpGateway,
    area: Area,
    offset: f64,
) -> anyhow::Result<BoundingBox> {
    let bounds = match area {
        Area::Place(query) => {
            let place = first_place(gateway, &query).await?;
            info!("Using {}", place.display_name);
            BoundingBox::around(place.position(), offset)
        }
        Area::Point(point) => BoundingBox::around(point, offset),
        Area::ContiguousUs => BoundingBox::CONTIGUOUS_US,
    };
    Ok(bounds)
}

pub async fn run_stations(
    gateway: &HttpGateway,
    area: Area,
    offset: f64,
    output: &Output,
    coarse: bool,
) -> anyhow::Result<()> {
    let bounds = resolve_bounds(gateway, area, offset).await?;
    info!("Querying stations in {}", bounds.latlng_param());

    let readings = or_fallback(
        gateway.fetch_stations_in_bounds(&bounds).await,
        Vec::new(),
        "Loading air quality data",
    );
    let scale = if coarse { Scale::Coarse } else { Scale::Full };

    if readings.is_empty() {
        println!("No air quality data available for this area.");
    }
    for r in &readings {
        let when = r
            .observed_at
            .map(|t| format!(" @ {}", t.format("%Y-%m-%d %H:%M")))
            .unwrap_or_default();
        println!(
            "{:>5} {:<30} {} ({:.4}, {:.4}){}",
            r.aqi,
            scale.label(r.aqi),
            r.station_label(),
            r.lat,
            r.lon,
            when
        );
    }

    let counts = CategoryCounts::tally(&readings);
    println!();
    println!("Air Quality Index");
    for (label, range, _, count) in counts.rows() {
        println!("  {:<9} ({:>6}) {} stations", label, range, count);
    }

    if let Some(path) = &output.csv {
        write_csv(path, &readings)?;
        info!("Wrote {} readings to {}", readings.len(), path.display());
    }
    if let Some(path) = &output.geojson {
        geojson::write(path, &geojson::stations_collection(&readings, &bounds, scale))?;
        info!("Wrote station markers to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_csv() {
        let dir = std::env::temp_dir().join(format!("aqi-cmd-csv-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("stations.csv");
        let readings = vec![
            AqiReading {
                aqi: 42.0,
                lat: 40.0,
                lon: -74.0,
                station_name: Some("Harbor, NY".to_string()),
                observed_at: None,
            },
            AqiReading {
                aqi: 305.0,
                lat: 41.0,
                lon: -73.0,
                station_name: None,
                observed_at: None,
            },
        ];
        write_csv(&path, &readings).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "station,lat,lon,aqi,category,color,observed_at");
        assert_eq!(lines[1], "\"Harbor, NY\",40.0,-74.0,42.0,Good,#4ade80,");
        assert_eq!(lines[2], "Unknown Station,41.0,-73.0,305.0,Hazardous,#881337,");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_fixed_areas_need_no_lookup() {
        let gateway = HttpGateway::new(Default::default()).unwrap();
        let bounds = resolve_bounds(&gateway, Area::ContiguousUs, 0.18).await.unwrap();
        assert_eq!(bounds, BoundingBox::CONTIGUOUS_US);
        let bounds = resolve_bounds(&gateway, Area::Point(Coordinate::new(-74.5, 40.0)), 1.0)
            .await
            .unwrap();
        assert_eq!(bounds.north(), 41.0);
        assert_eq!(bounds.west(), -75.5);
    }
}
