use crate::error::GatewayError;
use crate::geo::Coordinate;
use log::debug;
use serde::{Deserialize, Serialize};

/// Maximum number of geocoding results kept from a search.
pub const MAX_PLACES: usize = 5;

/// A geocoding hit.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Place {
    pub display_name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Place {
    pub fn position(&self) -> Coordinate {
        Coordinate::new(self.lon, self.lat)
    }

    /// First comma-separated part of the display name, e.g. "Denver".
    pub fn short_name(&self) -> &str {
        self.display_name
            .split(',')
            .next()
            .unwrap_or(&self.display_name)
            .trim()
    }
}

/// The geocoder sends coordinates as strings.
#[derive(Debug, Deserialize)]
struct RawPlace {
    display_name: String,
    lat: String,
    lon: String,
}

/// Parse a geocoder search reply, keeping at most [`MAX_PLACES`] results.
pub fn parse_geocode_response(body: &str) -> Result<Vec<Place>, GatewayError> {
    let raw: Vec<RawPlace> = serde_json::from_str(body)?;
    let places = raw
        .into_iter()
        .filter_map(|p| {
            match (p.lat.trim().parse::<f64>(), p.lon.trim().parse::<f64>()) {
                (Ok(lat), Ok(lon)) => Some(Place {
                    display_name: p.display_name,
                    lat,
                    lon,
                }),
                _ => {
                    debug!("Dropping place with bad coordinates: {}", p.display_name);
                    None
                }
            }
        })
        .take(MAX_PLACES)
        .collect();
    Ok(places)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_RESULT: &str = r#"[
{"place_id":1,"lat":"39.7392364","lon":"-104.984862","display_name":"Denver, Colorado, United States","class":"boundary"},
{"place_id":2,"lat":"40.7127281","lon":"-74.0060152","display_name":"New York, United States"},
{"place_id":3,"lat":"bogus","lon":"0","display_name":"Nowhere"},
{"place_id":4,"lat":"1","lon":"1","display_name":"Four"},
{"place_id":5,"lat":"2","lon":"2","display_name":"Five"},
{"place_id":6,"lat":"3","lon":"3","display_name":"Six"},
{"place_id":7,"lat":"4","lon":"4","display_name":"Seven"}
]"#;

    #[test]
    fn test_parse_geocode_response() {
        let places = parse_geocode_response(SEARCH_RESULT).unwrap();
        assert_eq!(places.len(), MAX_PLACES);
        assert_eq!(places[0].short_name(), "Denver");
        assert!((places[0].lat - 39.7392364).abs() < f64::EPSILON);
        assert_eq!(places[0].position().lon, -104.984862);
        // the unparsable entry is skipped, not counted
        assert_eq!(places[2].display_name, "Four");
        assert_eq!(places[4].display_name, "Six");
    }

    #[test]
    fn test_parse_geocode_empty() {
        assert!(parse_geocode_response("[]").unwrap().is_empty());
        assert!(parse_geocode_response("{}").is_err());
    }
}
