//! GeoJSON output for map renderers.
//!
//! Markers and segments carry `marker-color` / `stroke` properties so that
//! simplestyle-aware viewers color them without extra configuration.

use aqi_core::category::Scale;
use aqi_core::geo::BoundingBox;
use aqi_core::place::Place;
use aqi_core::reading::AqiReading;
use aqi_data::report::RouteReport;
use serde_json::{json, Value};
use std::path::Path;

/// GeoJSON `bbox` order: west, south, east, north.
fn bbox(bounds: &BoundingBox) -> Value {
    json!([bounds.west(), bounds.south(), bounds.east(), bounds.north()])
}

/// One Point feature per station.
pub fn stations_collection(
    readings: &[AqiReading],
    bounds: &BoundingBox,
    scale: Scale,
) -> Value {
    let features: Vec<Value> = readings
        .iter()
        .map(|r| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": r.position().to_lon_lat(),
                },
                "properties": {
                    "aqi": r.aqi,
                    "label": scale.label(r.aqi),
                    "marker-color": scale.color(r.aqi),
                    "station": r.station_label(),
                    "observed_at": r.observed_at.map(|t| t.to_rfc3339()),
                },
            })
        })
        .collect();
    json!({
        "type": "FeatureCollection",
        "bbox": bbox(bounds),
        "features": features,
    })
}

/// One LineString feature per colored segment, plus the two endpoints.
pub fn route_collection(report: &RouteReport, start: &Place, end: &Place) -> Value {
    let mut features: Vec<Value> = report
        .segments
        .iter()
        .map(|s| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "LineString",
                    "coordinates": [s.from.to_lon_lat(), s.to.to_lon_lat()],
                },
                "properties": {
                    "aqi": s.aqi,
                    "stroke": s.color,
                    "stroke-width": 4,
                },
            })
        })
        .collect();
    for (role, place) in [("start", start), ("end", end)] {
        features.push(json!({
            "type": "Feature",
            "geometry": {
                "type": "Point",
                "coordinates": place.position().to_lon_lat(),
            },
            "properties": {
                "role": role,
                "name": place.display_name,
            },
        }));
    }
    json!({
        "type": "FeatureCollection",
        "bbox": bbox(&report.bounds),
        "features": features,
    })
}

pub fn write(path: &Path, collection: &Value) -> anyhow::Result<()> {
    std::fs::write(path, serde_json::to_string_pretty(collection)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aqi_core::geo::Coordinate;

    #[test]
    fn test_stations_collection() {
        let readings = vec![AqiReading {
            aqi: 130.0,
            lat: 40.0,
            lon: -74.5,
            station_name: Some("Newark".to_string()),
            observed_at: None,
        }];
        let bounds = BoundingBox::around(Coordinate::new(-74.5, 40.0), 0.5);
        let fc = stations_collection(&readings, &bounds, Scale::Full);
        assert_eq!(fc["bbox"], json!([-75.0, 39.5, -74.0, 40.5]));
        let feature = &fc["features"][0];
        assert_eq!(feature["geometry"]["coordinates"], json!([-74.5, 40.0]));
        assert_eq!(feature["properties"]["marker-color"], "#fb923c");
        assert_eq!(feature["properties"]["station"], "Newark");
        assert!(feature["properties"]["observed_at"].is_null());

        let coarse = stations_collection(&readings, &bounds, Scale::Coarse);
        assert_eq!(coarse["features"][0]["properties"]["label"], "Poor");
    }

    #[test]
    fn test_route_collection() {
        let coords: Vec<Coordinate> = (0..4).map(|i| Coordinate::new(i as f64, i as f64)).collect();
        let report = RouteReport::build(&coords, &[40.0, 160.0]).unwrap();
        let start = Place {
            display_name: "A".to_string(),
            lat: 0.0,
            lon: 0.0,
        };
        let end = Place {
            display_name: "B".to_string(),
            lat: 3.0,
            lon: 3.0,
        };
        let fc = route_collection(&report, &start, &end);
        let features = fc["features"].as_array().unwrap();
        assert_eq!(features.len(), 5);
        assert_eq!(features[0]["properties"]["stroke"], "#4ade80");
        assert_eq!(features[2]["properties"]["stroke"], "#ef4444");
        assert_eq!(
            features[2]["geometry"]["coordinates"],
            json!([[2.0, 2.0], [3.0, 3.0]])
        );
        assert_eq!(features[4]["properties"]["role"], "end");
        assert_eq!(fc["bbox"], json!([0.0, 0.0, 3.0, 3.0]));
    }
}
