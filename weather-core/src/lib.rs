//! Core library for the `weather` dashboard.
//!
//! This crate defines:
//! - Configuration handling
//! - Abstraction over the weather data provider, plus the HTTP implementation
//! - The dashboard state ([`WeatherView`]) and its lookup transitions
//! - Pure text rendering of that state, including the temperature chart
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod chart;
pub mod config;
pub mod model;
pub mod provider;
pub mod render;
pub mod summary;
pub mod view;

pub use config::{ChartConfig, Config, ProviderConfig};
pub use model::{TemperatureHistory, WeatherReading};
pub use provider::{WeatherProvider, http::HttpWeatherProvider, provider_from_config};
pub use render::{RenderOptions, render};
pub use summary::generate_summary;
pub use view::{Completion, LookupError, LookupTicket, PendingLookup, WeatherView};
