//! Core types for the air-quality map.
//!
//! - `category`: the AQI threshold table and classifier
//! - `route`: route segment coloring and bounding boxes
//! - `geo`, `reading`, `place`: coordinates and provider payloads
//! - `gateway`, `batch` (feature `api`): provider client and best-effort
//!   route sampling

pub mod category;
pub mod error;
pub mod geo;
pub mod place;
pub mod reading;
pub mod route;

#[cfg(feature = "api")]
pub mod batch;
#[cfg(feature = "api")]
pub mod gateway;

pub use category::{classify, AqiCategory, Classification, CoarseCategory, Scale};
pub use error::GatewayError;
pub use geo::{BoundingBox, Coordinate};
pub use route::{bounding_box, map_route_segments, RouteSegment};
