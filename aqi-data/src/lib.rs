//! Derived views over classified AQI data.
//!
//! This crate turns raw readings and route geometries into the summaries
//! a map renderer shows: legend counts, sampling positions, and route
//! reports.

/// Station counts for the map legend.
pub mod overlay {
    use aqi_core::category::CoarseCategory;
    use aqi_core::reading::AqiReading;
    use serde::Serialize;

    /// Number of stations in each coarse bucket.
    #[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Serialize)]
    pub struct CategoryCounts {
        pub good: usize,
        pub moderate: usize,
        pub poor: usize,
    }

    impl CategoryCounts {
        pub fn tally(readings: &[AqiReading]) -> Self {
            readings.iter().fold(CategoryCounts::default(), |mut acc, r| {
                match CoarseCategory::from_aqi(r.aqi) {
                    CoarseCategory::Good => acc.good += 1,
                    CoarseCategory::Moderate => acc.moderate += 1,
                    CoarseCategory::Poor => acc.poor += 1,
                }
                acc
            })
        }

        pub fn total(&self) -> usize {
            self.good + self.moderate + self.poor
        }

        /// Legend rows: (label, range, color, count).
        pub fn rows(&self) -> [(&'static str, &'static str, &'static str, usize); 3] {
            [
                (
                    CoarseCategory::Good.label(),
                    "0-50",
                    CoarseCategory::Good.color(),
                    self.good,
                ),
                (
                    CoarseCategory::Moderate.label(),
                    "51-100",
                    CoarseCategory::Moderate.color(),
                    self.moderate,
                ),
                (
                    CoarseCategory::Poor.label(),
                    ">100",
                    CoarseCategory::Poor.color(),
                    self.poor,
                ),
            ]
        }
    }

}

/// Where along a route to look up AQI.
pub mod sampling {
    use aqi_core::geo::Coordinate;

    /// Number of route points sampled when the caller doesn't say.
    pub const DEFAULT_SAMPLE_COUNT: usize = 10;

    /// Indices of `count` proportionally spaced positions in a geometry of
    /// `len` coordinates. The first and last coordinates are always included
    /// when `count >= 2`; `count` is clamped to `len`.
    pub fn sample_indices(len: usize, count: usize) -> Vec<usize> {
        let count = count.min(len);
        match count {
            0 => Vec::new(),
            1 => vec![0],
            _ => (0..count).map(|k| k * (len - 1) / (count - 1)).collect(),
        }
    }

    /// The coordinates at [`sample_indices`].
    pub fn sample_points(coordinates: &[Coordinate], count: usize) -> Vec<Coordinate> {
        sample_indices(coordinates.len(), count)
            .into_iter()
            .map(|i| coordinates[i])
            .collect()
    }

}

/// Everything a renderer needs to draw an analysed route.
pub mod report {
    use aqi_core::category::{AqiCategory, Scale};
    use aqi_core::geo::{BoundingBox, Coordinate};
    use aqi_core::route::{bounding_box, map_route_segments_with, RouteSegment};
    use serde::Serialize;

    #[derive(Debug, Clone, Serialize)]
    pub struct RouteReport {
        pub segments: Vec<RouteSegment>,
        pub bounds: BoundingBox,
        pub min_aqi: f64,
        pub max_aqi: f64,
        pub mean_aqi: f64,
        pub worst: AqiCategory,
    }

    impl RouteReport {
        pub fn build(coordinates: &[Coordinate], samples: &[f64]) -> Option<RouteReport> {
            Self::build_with(coordinates, samples, Scale::Full)
        }

        /// `None` when there is nothing to draw: fewer than two coordinates
        /// or no samples.
        pub fn build_with(
            coordinates: &[Coordinate],
            samples: &[f64],
            scale: Scale,
        ) -> Option<RouteReport> {
            let segments = map_route_segments_with(coordinates, samples, scale);
            if segments.is_empty() {
                return None;
            }
            let bounds = bounding_box(coordinates)?;
            let min_aqi = samples.iter().copied().fold(f64::INFINITY, f64::min);
            let max_aqi = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let mean_aqi = samples.iter().sum::<f64>() / samples.len() as f64;
            Some(RouteReport {
                segments,
                bounds,
                min_aqi,
                max_aqi,
                mean_aqi,
                worst: AqiCategory::from_aqi(max_aqi),
            })
        }

        /// Number of segments per color, in first-seen order.
        pub fn color_runs(&self) -> Vec<(&'static str, usize)> {
            let mut runs: Vec<(&'static str, usize)> = Vec::new();
            for segment in &self.segments {
                match runs.iter_mut().find(|(color, _)| *color == segment.color) {
                    Some((_, n)) => *n += 1,
                    None => runs.push((segment.color, 1)),
                }
            }
            runs
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn line(n: usize) -> Vec<Coordinate> {
            (0..n).map(|i| Coordinate::new(i as f64, -(i as f64))).collect()
        }

        #[test]
        fn test_build() {
            let report = RouteReport::build(&line(4), &[40.0, 160.0]).unwrap();
            assert_eq!(report.segments.len(), 3);
            assert_eq!(report.min_aqi, 40.0);
            assert_eq!(report.max_aqi, 160.0);
            assert_eq!(report.mean_aqi, 100.0);
            assert_eq!(report.worst, AqiCategory::Unhealthy);
            assert_eq!(report.bounds.min_lat, -3.0);
            assert_eq!(report.bounds.max_lon, 3.0);
            assert_eq!(
                report.color_runs(),
                vec![
                    (AqiCategory::Good.color(), 2),
                    (AqiCategory::Unhealthy.color(), 1)
                ]
            );
        }

        #[test]
        fn test_build_nothing_to_draw() {
            assert!(RouteReport::build(&line(1), &[40.0]).is_none());
            assert!(RouteReport::build(&line(5), &[]).is_none());
        }
    }
}
