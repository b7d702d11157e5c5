//! Route coloring: maps a route polyline and a shorter list of AQI samples
//! onto one colored segment per consecutive coordinate pair.

use crate::category::Scale;
use crate::error::GatewayError;
use crate::geo::{BoundingBox, Coordinate};
use serde::{Deserialize, Serialize};

/// One edge of the route polyline with the AQI sample it was assigned.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct RouteSegment {
    pub from: Coordinate,
    pub to: Coordinate,
    pub aqi: f64,
    pub color: &'static str,
}

/// Sample index for segment `segment`: `floor(segment * samples / coords)`,
/// clamped into `[0, samples - 1]`.
///
/// `samples_len` must be non-zero.
pub fn sample_index(segment: usize, samples_len: usize, coords_len: usize) -> usize {
    if coords_len == 0 {
        return 0;
    }
    (segment * samples_len / coords_len).min(samples_len - 1)
}

/// Color each consecutive coordinate pair on the full six-bucket scale.
///
/// Returns an empty vector when there are fewer than two coordinates or no
/// samples. An empty result means "nothing to draw".
pub fn map_route_segments(coordinates: &[Coordinate], samples: &[f64]) -> Vec<RouteSegment> {
    map_route_segments_with(coordinates, samples, Scale::Full)
}

/// Same as [`map_route_segments`] with an explicit bucket table.
pub fn map_route_segments_with(
    coordinates: &[Coordinate],
    samples: &[f64],
    scale: Scale,
) -> Vec<RouteSegment> {
    if coordinates.len() < 2 || samples.is_empty() {
        return Vec::new();
    }
    coordinates
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let aqi = samples[sample_index(i, samples.len(), coordinates.len())];
            RouteSegment {
                from: pair[0],
                to: pair[1],
                aqi,
                color: scale.color(aqi),
            }
        })
        .collect()
}

/// Extent of all coordinates, or `None` for an empty slice.
pub fn bounding_box(coordinates: &[Coordinate]) -> Option<BoundingBox> {
    let first = coordinates.first()?;
    let init = BoundingBox {
        min_lat: first.lat,
        max_lat: first.lat,
        min_lon: first.lon,
        max_lon: first.lon,
    };
    Some(coordinates.iter().skip(1).fold(init, |acc, c| BoundingBox {
        min_lat: acc.min_lat.min(c.lat),
        max_lat: acc.max_lat.max(c.lat),
        min_lon: acc.min_lon.min(c.lon),
        max_lon: acc.max_lon.max(c.lon),
    }))
}

/// A driving route as returned by the routing provider.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Route {
    pub coordinates: Vec<Coordinate>,
    /// Meters.
    pub distance: f64,
    /// Seconds.
    pub duration: f64,
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    code: String,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<RawRoute>,
}

#[derive(Debug, Deserialize)]
struct RawRoute {
    geometry: RawGeometry,
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    coordinates: Vec<[f64; 2]>,
}

/// Parse a routing reply. `Ok(None)` when the provider found no route.
pub fn parse_route_response(body: &str) -> Result<Option<Route>, GatewayError> {
    let response: RouteResponse = serde_json::from_str(body)?;
    match response.code.as_str() {
        "Ok" => {}
        "NoRoute" | "NoSegment" => return Ok(None),
        other => {
            return Err(GatewayError::Provider(
                response.message.unwrap_or_else(|| other.to_string()),
            ))
        }
    }
    Ok(response.routes.into_iter().next().map(|raw| Route {
        coordinates: raw
            .geometry
            .coordinates
            .into_iter()
            .map(Coordinate::from)
            .collect(),
        distance: raw.distance,
        duration: raw.duration,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{classify, AqiCategory};

    fn line(n: usize) -> Vec<Coordinate> {
        (0..n).map(|i| Coordinate::new(i as f64, i as f64)).collect()
    }

    #[test]
    fn test_four_points_two_samples() {
        let coords = line(4);
        let segments = map_route_segments(&coords, &[40.0, 160.0]);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].aqi, 40.0);
        assert_eq!(segments[1].aqi, 40.0);
        assert_eq!(segments[2].aqi, 160.0);
        assert_eq!(segments[0].color, AqiCategory::Good.color());
        assert_eq!(segments[1].color, AqiCategory::Good.color());
        assert_eq!(segments[2].color, AqiCategory::Unhealthy.color());
        assert_eq!(segments[2].from, Coordinate::new(2.0, 2.0));
        assert_eq!(segments[2].to, Coordinate::new(3.0, 3.0));
    }

    #[test]
    fn test_segment_count() {
        for n in 2..40 {
            let segments = map_route_segments(&line(n), &[10.0, 60.0, 120.0]);
            assert_eq!(segments.len(), n - 1);
        }
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(map_route_segments(&[], &[1.0]).is_empty());
        assert!(map_route_segments(&line(1), &[1.0]).is_empty());
        assert!(map_route_segments(&line(2), &[]).is_empty());
    }

    #[test]
    fn test_sample_index_monotonic_and_clamped() {
        for coords_len in 2..30 {
            for samples_len in 1..=coords_len {
                let mut last = 0;
                for i in 0..coords_len - 1 {
                    let idx = sample_index(i, samples_len, coords_len);
                    assert!(idx >= last);
                    assert!(idx < samples_len);
                    last = idx;
                }
            }
        }
        // more samples than coordinates still stays in range
        assert_eq!(sample_index(1, 10, 2), 5);
        assert_eq!(sample_index(0, 3, 0), 0);
    }

    #[test]
    fn test_single_sample_colors_whole_route() {
        let segments = map_route_segments(&line(6), &[250.0]);
        assert!(segments
            .iter()
            .all(|s| s.color == classify(250.0).color && s.aqi == 250.0));
    }

    #[test]
    fn test_coarse_scale() {
        let segments = map_route_segments_with(&line(3), &[160.0], Scale::Coarse);
        assert_eq!(segments[0].color, "#ef4444");
        assert_eq!(segments[1].color, "#ef4444");
    }

    #[test]
    fn test_bounding_box() {
        let coords = vec![
            Coordinate::new(10.0, 5.0),
            Coordinate::new(-2.0, 8.0),
            Coordinate::new(3.0, -1.0),
        ];
        let b = bounding_box(&coords).unwrap();
        assert_eq!(b.min_lat, -1.0);
        assert_eq!(b.max_lat, 8.0);
        assert_eq!(b.min_lon, -2.0);
        assert_eq!(b.max_lon, 10.0);
        assert!(bounding_box(&[]).is_none());
    }

    // https://router.project-osrm.org/route/v1/driving/-105.0,39.7;-104.8,39.8?overview=full&geometries=geojson
    const ROUTE_RESULT: &str = r#"{"code":"Ok","routes":[{"geometry":{"coordinates":[[-105.0,39.7],[-104.95,39.72],[-104.8,39.8]],"type":"LineString"},"legs":[],"weight_name":"routability","weight":1201.3,"duration":1190.4,"distance":21504.2}],"waypoints":[]}"#;

    #[test]
    fn test_parse_route_response() {
        let route = parse_route_response(ROUTE_RESULT).unwrap().unwrap();
        assert_eq!(route.coordinates.len(), 3);
        assert_eq!(route.coordinates[0], Coordinate::new(-105.0, 39.7));
        assert_eq!(route.coordinates[2].lat, 39.8);
        assert_eq!(route.distance, 21504.2);
        assert_eq!(route.duration, 1190.4);
    }

    #[test]
    fn test_parse_route_no_route() {
        let body = r#"{"code":"NoRoute","message":"Impossible route between points","routes":[]}"#;
        assert!(parse_route_response(body).unwrap().is_none());

        let body = r#"{"code":"InvalidQuery","message":"Query string malformed"}"#;
        assert!(matches!(
            parse_route_response(body),
            Err(GatewayError::Provider(m)) if m == "Query string malformed"
        ));
    }
}
