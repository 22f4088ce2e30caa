use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use weather_core::{Config, provider_from_config};

use crate::dashboard::Dashboard;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Terminal weather dashboard")]
pub struct Cli {
    /// Override the configured provider URL for this run.
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive dashboard: enter cities one after another.
    Dashboard,

    /// Look up one city and print the dashboard.
    Show {
        /// City name.
        city: String,
    },

    /// Refresh one city on a fixed interval, charting each update.
    Watch {
        /// City name.
        city: String,

        /// Seconds between updates.
        #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
        interval: u64,

        /// Stop after this many updates; runs until Ctrl-C if absent.
        #[arg(long)]
        updates: Option<u64>,
    },

    /// Configure provider and chart settings.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Dashboard => open_dashboard(self.base_url)?.interactive().await,
            Command::Show { city } => open_dashboard(self.base_url)?.show(&city).await,
            Command::Watch { city, interval, updates } => {
                open_dashboard(self.base_url)?.watch(&city, interval, updates).await
            }
        }
    }
}

fn open_dashboard(base_url: Option<String>) -> anyhow::Result<Dashboard> {
    let config = Config::load()?.with_base_url(base_url);
    let provider = provider_from_config(&config)?;
    Ok(Dashboard::new(provider, config.render_options()))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    config.provider.base_url = Text::new("Provider URL:")
        .with_default(&config.provider.base_url)
        .with_help_message("Endpoint queried as GET <URL>?city=<name>")
        .prompt()
        .context("Failed to read provider URL")?;

    config.provider.icon_base_url = Text::new("Icon base URL:")
        .with_default(&config.provider.icon_base_url)
        .prompt()
        .context("Failed to read icon base URL")?;

    config.chart.width = CustomType::<usize>::new("Chart width (columns):")
        .with_default(config.chart.width)
        .with_error_message("Please enter a whole number")
        .prompt()
        .context("Failed to read chart width")?;

    config.chart.height = CustomType::<usize>::new("Chart height (rows):")
        .with_default(config.chart.height)
        .with_error_message("Please enter a whole number")
        .prompt()
        .context("Failed to read chart height")?;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}
