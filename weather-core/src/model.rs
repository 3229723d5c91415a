use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw provider payload, kept verbatim so it can be cached as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherSnapshot(pub Value);

impl WeatherSnapshot {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for WeatherSnapshot {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Normalized current conditions, derived from a snapshot on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub city: String,
    /// Empty when the provider did not report a country.
    pub country: String,
    pub temperature_c: i32,
    pub feels_like_c: i32,
    pub description: String,
    pub humidity_pct: i32,
    pub wind_kmph: i32,
    pub pressure_mbar: i32,
}

/// Result of a single orchestrator call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherReport {
    pub record: WeatherRecord,
    pub from_cache: bool,
}

/// Trims a requested location; blank input means "detect by network origin".
pub fn normalize_location(location: Option<&str>) -> Option<&str> {
    location.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_location_means_auto_detect() {
        assert_eq!(normalize_location(None), None);
        assert_eq!(normalize_location(Some("   ")), None);
        assert_eq!(normalize_location(Some(" Kyiv ")), Some("Kyiv"));
    }
}
