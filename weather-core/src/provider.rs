use crate::{Config, WeatherReading, provider::http::HttpWeatherProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod http;

/// Source of current-conditions readings for a city.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, city: &str) -> anyhow::Result<WeatherReading>;
}

/// Construct the HTTP provider described by the config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let base_url = config.provider.base_url.trim();
    if base_url.is_empty() {
        return Err(anyhow::anyhow!(
            "No provider base URL configured.\n\
             Hint: run `weather configure` or pass `--base-url <URL>`."
        ));
    }

    Ok(Box::new(HttpWeatherProvider::new(base_url.to_owned())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_default_config_works() {
        let cfg = Config::default();
        assert!(provider_from_config(&cfg).is_ok());
    }

    #[test]
    fn provider_from_config_errors_on_blank_url() {
        let cfg = Config::default().with_base_url(Some("   ".into()));
        let err = provider_from_config(&cfg).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No provider base URL configured"));
        assert!(msg.contains("Hint: run `weather configure`"));
    }
}
