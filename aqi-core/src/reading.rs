use crate::category::{classify, Classification};
use crate::error::GatewayError;
use crate::geo::Coordinate;
use chrono::{DateTime, FixedOffset};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single station reading from the AQI provider.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct AqiReading {
    pub aqi: f64,
    pub lat: f64,
    pub lon: f64,
    pub station_name: Option<String>,
    /// Local observation time reported by the station, if it parsed.
    pub observed_at: Option<DateTime<FixedOffset>>,
}

impl AqiReading {
    pub fn classify(&self) -> Classification {
        classify(self.aqi)
    }

    pub fn position(&self) -> Coordinate {
        Coordinate::new(self.lon, self.lat)
    }

    /// Popup text shown for a station marker.
    pub fn station_label(&self) -> &str {
        self.station_name.as_deref().unwrap_or("Unknown Station")
    }
}

/// `{"status": "...", "data": ...}`, the envelope every provider reply uses.
#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    #[serde(default)]
    data: Value,
}

#[derive(Debug, Deserialize)]
struct BoundsEntry {
    lat: f64,
    lon: f64,
    #[serde(default)]
    aqi: Value,
    station: Option<StationInfo>,
}

#[derive(Debug, Deserialize)]
struct StationInfo {
    name: Option<String>,
    time: Option<String>,
}

/// The provider sends AQI either as a number or as a numeric string, and
/// uses `"-"` for stations with no current reading.
pub fn aqi_value(value: &Value) -> Option<f64> {
    let aqi = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    aqi.filter(|v| v.is_finite())
}

fn envelope_data(body: &str) -> Result<Value, GatewayError> {
    let envelope: Envelope = serde_json::from_str(body)?;
    if envelope.status != "ok" {
        let message = match envelope.data {
            Value::String(s) => s,
            Value::Null => envelope.status,
            other => other.to_string(),
        };
        return Err(GatewayError::Provider(message));
    }
    Ok(envelope.data)
}

/// Parse a map-bounds reply into readings, skipping stations without a
/// numeric AQI.
pub fn parse_bounds_response(body: &str) -> Result<Vec<AqiReading>, GatewayError> {
    let data = envelope_data(body)?;
    let entries: Vec<BoundsEntry> = match data {
        Value::Null => Vec::new(),
        other => serde_json::from_value(other)?,
    };
    let readings = entries
        .into_iter()
        .filter_map(|entry| {
            let aqi = match aqi_value(&entry.aqi) {
                Some(aqi) => aqi,
                None => {
                    debug!("Skipping station at {},{} with no AQI", entry.lat, entry.lon);
                    return None;
                }
            };
            let (station_name, observed_at) = match entry.station {
                Some(station) => (
                    station.name,
                    station
                        .time
                        .and_then(|t| DateTime::parse_from_rfc3339(&t).ok()),
                ),
                None => (None, None),
            };
            Some(AqiReading {
                aqi,
                lat: entry.lat,
                lon: entry.lon,
                station_name,
                observed_at,
            })
        })
        .collect();
    Ok(readings)
}

/// Parse a geo-feed reply (nearest station to a point) into its AQI.
pub fn parse_feed_response(body: &str, point: Coordinate) -> Result<f64, GatewayError> {
    let data = envelope_data(body)?;
    data.get("aqi")
        .and_then(aqi_value)
        .ok_or(GatewayError::NoReading(point.lat, point.lon))
}
