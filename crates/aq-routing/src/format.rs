//! Display helpers for times, distances and AQI readings.
//!
//! AQI categories use the absolute EPA scale, independent of the dynamic
//! maximum the cost function normalises by.

/// `"25 min"` under an hour, `"1 hr 5 min"` otherwise.
pub fn format_time(minutes: f64) -> String {
    let total = minutes.max(0.0).round() as u64;
    if total < 60 {
        format!("{total} min")
    } else {
        format!("{} hr {} min", total / 60, total % 60)
    }
}

/// `"850 m"` under a kilometre, `"3.4 km"` otherwise.
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{} m", (km * 1000.0).round() as i64)
    } else {
        format!("{km:.1} km")
    }
}

pub fn format_aqi(aqi: f64) -> String {
    format!("{}", aqi.round() as i64)
}

/// EPA air-quality category.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    pub const ALL: [AqiCategory; 6] = [
        AqiCategory::Good,
        AqiCategory::Moderate,
        AqiCategory::UnhealthyForSensitiveGroups,
        AqiCategory::Unhealthy,
        AqiCategory::VeryUnhealthy,
        AqiCategory::Hazardous,
    ];

    /// Category of an AQI reading.  Upper bounds are inclusive.
    pub fn of(aqi: f64) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| aqi <= c.upper_bound())
            .unwrap_or(AqiCategory::Hazardous)
    }

    /// Inclusive upper AQI bound of the band.
    pub fn upper_bound(self) -> f64 {
        match self {
            AqiCategory::Good                        => 50.0,
            AqiCategory::Moderate                    => 100.0,
            AqiCategory::UnhealthyForSensitiveGroups => 150.0,
            AqiCategory::Unhealthy                   => 200.0,
            AqiCategory::VeryUnhealthy               => 300.0,
            AqiCategory::Hazardous                   => 500.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AqiCategory::Good                        => "Good",
            AqiCategory::Moderate                    => "Moderate",
            AqiCategory::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            AqiCategory::Unhealthy                   => "Unhealthy",
            AqiCategory::VeryUnhealthy               => "Very Unhealthy",
            AqiCategory::Hazardous                   => "Hazardous",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            AqiCategory::Good                        => "#22c55e",
            AqiCategory::Moderate                    => "#84cc16",
            AqiCategory::UnhealthyForSensitiveGroups => "#f59e0b",
            AqiCategory::Unhealthy                   => "#ef4444",
            AqiCategory::VeryUnhealthy               => "#7c2d12",
            AqiCategory::Hazardous                   => "#4a044e",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AqiCategory::Good                        => "Air quality is satisfactory",
            AqiCategory::Moderate                    => "Acceptable air quality",
            AqiCategory::UnhealthyForSensitiveGroups => "Sensitive groups may experience effects",
            AqiCategory::Unhealthy                   => "Everyone may begin to experience effects",
            AqiCategory::VeryUnhealthy               => "Health alert: everyone may experience effects",
            AqiCategory::Hazardous                   => "Health emergency conditions",
        }
    }
}

impl std::fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
