use serde::{Deserialize, Serialize};

/// One snapshot of current conditions for a city, as returned by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub location_name: String,
    pub description: String,
    /// Icon identifier, e.g. "01d".
    pub icon: String,
    pub temperature_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub humidity_pct: f64,
    pub pressure_hpa: f64,
    pub sea_level_hpa: Option<f64>,
    pub ground_level_hpa: Option<f64>,
    pub wind_speed_mps: f64,
    pub wind_direction_deg: f64,
}

/// Temperatures recorded by successful lookups, oldest first.
///
/// Append-only: values are never reordered or pruned for the life of the session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemperatureHistory {
    values: Vec<f64>,
}

impl TemperatureHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, temperature_c: f64) {
        self.values.push(temperature_c);
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
