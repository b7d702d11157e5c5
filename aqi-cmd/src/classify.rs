use aqi_core::category::{AqiCategory, Scale};

fn scale(coarse: bool) -> Scale {
    if coarse {
        Scale::Coarse
    } else {
        Scale::Full
    }
}

/// One-line description of a reading on the chosen scale.
pub fn describe(aqi: f64, coarse: bool) -> String {
    let scale = scale(coarse);
    format!("AQI {}: {} ({})", aqi, scale.label(aqi), scale.color(aqi))
}

/// Print the category of `aqi`, followed by the full category table.
pub fn run_classify(aqi: f64, coarse: bool) {
    println!("{}", describe(aqi, coarse));
    if !coarse {
        let current = AqiCategory::from_aqi(aqi);
        let mut lower = 0.0;
        for category in AqiCategory::ALL {
            let upper = category.upper_bound();
            let range = if upper.is_finite() {
                format!("{:>3}-{:<3}", lower, upper)
            } else {
                format!("{:>3}+    ", lower)
            };
            let marker = if category == current { "*" } else { " " };
            println!("{} {} {} {}", marker, range, category.color(), category.label());
            lower = upper + 1.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        assert_eq!(describe(42.0, false), "AQI 42: Good (#4ade80)");
        assert_eq!(describe(175.0, false), "AQI 175: Unhealthy (#ef4444)");
        assert_eq!(describe(175.0, true), "AQI 175: Poor (#ef4444)");
    }
}
