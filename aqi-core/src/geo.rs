use serde::{Deserialize, Serialize};

/// Offset in decimal degrees used for "stations near a place" queries.
/// Roughly 20 km in each direction.
pub const NEARBY_OFFSET_DEG: f64 = 0.18;

/// A geographic point in decimal degrees.
///
/// Route geometries arrive in GeoJSON order, `[lon, lat]`, so the
/// array conversions use that order too.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Self {
        Coordinate { lon, lat }
    }

    /// `[lon, lat]`, the order GeoJSON and the routing provider use.
    pub fn to_lon_lat(self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from(value: [f64; 2]) -> Self {
        Coordinate {
            lon: value[0],
            lat: value[1],
        }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from(value: (f64, f64)) -> Self {
        Coordinate {
            lon: value.0,
            lat: value.1,
        }
    }
}

/// Axis-aligned lat/lon rectangle.
///
/// Serves both as the viewport a renderer fits to and as the
/// south/west/north/east region a station query covers.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Initial-load region of the viewer: the contiguous United States.
    pub const CONTIGUOUS_US: BoundingBox = BoundingBox {
        min_lat: 24.396308,
        max_lat: 49.384358,
        min_lon: -125.0,
        max_lon: -66.934570,
    };

    pub fn from_corners(south: f64, west: f64, north: f64, east: f64) -> Self {
        BoundingBox {
            min_lat: south,
            max_lat: north,
            min_lon: west,
            max_lon: east,
        }
    }

    /// Square box of `offset` degrees on each side of `point`.
    pub fn around(point: Coordinate, offset: f64) -> Self {
        BoundingBox {
            min_lat: point.lat - offset,
            max_lat: point.lat + offset,
            min_lon: point.lon - offset,
            max_lon: point.lon + offset,
        }
    }

    pub fn south(&self) -> f64 {
        self.min_lat
    }

    pub fn west(&self) -> f64 {
        self.min_lon
    }

    pub fn north(&self) -> f64 {
        self.max_lat
    }

    pub fn east(&self) -> f64 {
        self.max_lon
    }

    pub fn center(&self) -> Coordinate {
        Coordinate {
            lon: (self.min_lon + self.max_lon) / 2.0,
            lat: (self.min_lat + self.max_lat) / 2.0,
        }
    }

    pub fn contains(&self, point: Coordinate) -> bool {
        point.lat >= self.min_lat
            && point.lat <= self.max_lat
            && point.lon >= self.min_lon
            && point.lon <= self.max_lon
    }

    /// `south,west,north,east`, the `latlng` parameter of the bounds query.
    pub fn latlng_param(&self) -> String {
        format!(
            "{},{},{},{}",
            self.south(),
            self.west(),
            self.north(),
            self.east()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_order() {
        let c: Coordinate = [-74.0, 40.7].into();
        assert_eq!(c.lon, -74.0);
        assert_eq!(c.lat, 40.7);
        assert_eq!(c.to_lon_lat(), [-74.0, 40.7]);
    }

    #[test]
    fn test_around() {
        let b = BoundingBox::around(Coordinate::new(10.0, 20.0), 0.5);
        assert_eq!(b.south(), 19.5);
        assert_eq!(b.north(), 20.5);
        assert_eq!(b.west(), 9.5);
        assert_eq!(b.east(), 10.5);
        assert_eq!(b.center(), Coordinate::new(10.0, 20.0));
        assert!(b.contains(Coordinate::new(10.2, 19.9)));
        assert!(!b.contains(Coordinate::new(11.0, 20.0)));
    }

    #[test]
    fn test_latlng_param() {
        let b = BoundingBox::from_corners(39.5, 116.0, 40.25, 116.75);
        assert_eq!(b.latlng_param(), "39.5,116,40.25,116.75");
    }
}
