use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::model::WeatherReading;

use super::WeatherProvider;

/// Provider backed by a `GET {base_url}?city=...` endpoint returning
/// OpenWeather-shaped current-conditions JSON.
#[derive(Debug, Clone)]
pub struct HttpWeatherProvider {
    base_url: String,
    http: Client,
}

impl HttpWeatherProvider {
    pub fn new(base_url: String) -> Self {
        Self { base_url, http: Client::new() }
    }
}

#[derive(Debug, Deserialize)]
struct ApiMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: f64,
    pressure: f64,
    sea_level: Option<f64>,
    grnd_level: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ApiCondition {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct ApiWind {
    speed: f64,
    deg: f64,
}

#[derive(Debug, Deserialize)]
struct ApiCurrentResponse {
    name: String,
    main: ApiMain,
    weather: Vec<ApiCondition>,
    wind: ApiWind,
}

impl TryFrom<ApiCurrentResponse> for WeatherReading {
    type Error = anyhow::Error;

    fn try_from(parsed: ApiCurrentResponse) -> Result<Self> {
        let condition = parsed
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Weather response contained no condition entry"))?;

        Ok(WeatherReading {
            location_name: parsed.name,
            description: condition.description,
            icon: condition.icon,
            temperature_c: parsed.main.temp,
            temp_min_c: parsed.main.temp_min,
            temp_max_c: parsed.main.temp_max,
            humidity_pct: parsed.main.humidity,
            pressure_hpa: parsed.main.pressure,
            sea_level_hpa: parsed.main.sea_level,
            ground_level_hpa: parsed.main.grnd_level,
            wind_speed_mps: parsed.wind.speed,
            wind_direction_deg: parsed.wind.deg,
        })
    }
}

#[async_trait]
impl WeatherProvider for HttpWeatherProvider {
    async fn current_weather(&self, city: &str) -> Result<WeatherReading> {
        debug!(url = %self.base_url, city, "requesting current weather");

        let res = self
            .http
            .get(&self.base_url)
            .query(&[("city", city)])
            .send()
            .await
            .context("Failed to send request to weather provider")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read weather provider response body")?;

        debug!(%status, bytes = body.len(), "weather provider responded");

        if !status.is_success() {
            return Err(anyhow!(
                "Weather request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: ApiCurrentResponse =
            serde_json::from_str(&body).context("Failed to parse weather provider JSON")?;

        WeatherReading::try_from(parsed)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
