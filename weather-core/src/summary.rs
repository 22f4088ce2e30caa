use crate::model::WeatherReading;

/// Value to interpolate into user-facing text: negative zero prints as `0`.
pub fn display_number(v: f64) -> f64 {
    v + 0.0
}

/// Build the plain-English paragraph shown under a reading.
pub fn generate_summary(reading: &WeatherReading) -> String {
    format!(
        "The current weather is {} with a temperature of {}°C. \
         The humidity is {}% and the wind speed is {} m/s.",
        reading.description,
        display_number(reading.temperature_c),
        display_number(reading.humidity_pct),
        display_number(reading.wind_speed_mps),
    )
}
