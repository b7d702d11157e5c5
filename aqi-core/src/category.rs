//! AQI category table and classification.
//!
//! There is exactly one threshold table, [`CATEGORY_TABLE`]. The three-bucket
//! legend view ([`CoarseCategory`]) is derived from it rather than kept as a
//! second copy of the thresholds.

use serde::{Deserialize, Serialize};

/// US EPA style AQI categories, ordered from least to most severe.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthySensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

/// Inclusive upper bound for each category, in ascending order.
///
/// Anything above the last bound is [`AqiCategory::Hazardous`].
pub const CATEGORY_TABLE: [(f64, AqiCategory); 5] = [
    (50.0, AqiCategory::Good),
    (100.0, AqiCategory::Moderate),
    (150.0, AqiCategory::UnhealthySensitive),
    (200.0, AqiCategory::Unhealthy),
    (300.0, AqiCategory::VeryUnhealthy),
];

impl AqiCategory {
    pub const ALL: [AqiCategory; 6] = [
        AqiCategory::Good,
        AqiCategory::Moderate,
        AqiCategory::UnhealthySensitive,
        AqiCategory::Unhealthy,
        AqiCategory::VeryUnhealthy,
        AqiCategory::Hazardous,
    ];

    /// Map a reading to its category.
    ///
    /// Negative values fall into `Good`. `NaN` fails every comparison and
    /// ends up in `Hazardous`.
    pub fn from_aqi(aqi: f64) -> AqiCategory {
        CATEGORY_TABLE
            .iter()
            .find(|(upper, _)| aqi <= *upper)
            .map(|(_, category)| *category)
            .unwrap_or(AqiCategory::Hazardous)
    }

    pub fn label(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::UnhealthySensitive => "Unhealthy for Sensitive Groups",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
            AqiCategory::Hazardous => "Hazardous",
        }
    }

    /// Marker/segment fill color as a hex string.
    pub fn color(&self) -> &'static str {
        match self {
            AqiCategory::Good => "#4ade80",
            AqiCategory::Moderate => "#facc15",
            AqiCategory::UnhealthySensitive => "#fb923c",
            AqiCategory::Unhealthy => "#ef4444",
            AqiCategory::VeryUnhealthy => "#9333ea",
            AqiCategory::Hazardous => "#881337",
        }
    }

    /// Inclusive upper bound of this category. `Hazardous` is unbounded.
    pub fn upper_bound(&self) -> f64 {
        CATEGORY_TABLE
            .iter()
            .find(|(_, category)| category == self)
            .map(|(upper, _)| *upper)
            .unwrap_or(f64::INFINITY)
    }

    /// Collapse into the three-bucket legend view.
    pub fn coarse(&self) -> CoarseCategory {
        match self {
            AqiCategory::Good => CoarseCategory::Good,
            AqiCategory::Moderate => CoarseCategory::Moderate,
            _ => CoarseCategory::Poor,
        }
    }
}

/// Three-bucket view used by the station legend: Good (0-50),
/// Moderate (51-100), Poor (>100).
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum CoarseCategory {
    Good,
    Moderate,
    Poor,
}

impl CoarseCategory {
    pub fn from_aqi(aqi: f64) -> CoarseCategory {
        AqiCategory::from_aqi(aqi).coarse()
    }

    pub fn label(&self) -> &'static str {
        match self {
            CoarseCategory::Good => "Good",
            CoarseCategory::Moderate => "Moderate",
            CoarseCategory::Poor => "Poor",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            CoarseCategory::Good => "#22c55e",
            CoarseCategory::Moderate => "#eab308",
            CoarseCategory::Poor => "#ef4444",
        }
    }
}

/// Result of [`classify`]: the category plus its display color.
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct Classification {
    pub category: AqiCategory,
    pub color: &'static str,
}

impl Classification {
    pub fn label(&self) -> &'static str {
        self.category.label()
    }
}

/// Classify a numeric AQI on the full six-bucket table.
pub fn classify(aqi: f64) -> Classification {
    let category = AqiCategory::from_aqi(aqi);
    Classification {
        category,
        color: category.color(),
    }
}

/// Which bucket table a call site renders with.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
pub enum Scale {
    #[default]
    Full,
    Coarse,
}

impl Scale {
    pub fn label(&self, aqi: f64) -> &'static str {
        match self {
            Scale::Full => AqiCategory::from_aqi(aqi).label(),
            Scale::Coarse => CoarseCategory::from_aqi(aqi).label(),
        }
    }

    pub fn color(&self, aqi: f64) -> &'static str {
        match self {
            Scale::Full => AqiCategory::from_aqi(aqi).color(),
            Scale::Coarse => CoarseCategory::from_aqi(aqi).color(),
        }
    }
}
