use std::time::Duration;

use anyhow::Context;
use inquire::{InquireError, Text};
use tracing::{debug, info, warn};
use weather_core::{RenderOptions, WeatherProvider, WeatherView, render};

/// One dashboard session: the view state plus what it needs to fetch and draw.
#[derive(Debug)]
pub struct Dashboard {
    view: WeatherView,
    provider: Box<dyn WeatherProvider>,
    options: RenderOptions,
}

impl Dashboard {
    pub fn new(provider: Box<dyn WeatherProvider>, options: RenderOptions) -> Self {
        Self { view: WeatherView::new(), provider, options }
    }

    /// Treat `input` as a trigger and return the re-rendered dashboard.
    ///
    /// Failures are part of the rendered output, so this never errors.
    pub async fn submit(&mut self, input: &str) -> String {
        if let Err(err) = self.view.lookup_city(self.provider.as_ref(), input).await {
            debug!(%err, "lookup did not produce a reading");
        }
        render(&self.view, &self.options)
    }

    pub async fn interactive(&mut self) -> anyhow::Result<()> {
        println!("{}", render(&self.view, &self.options));

        loop {
            let input = Text::new("City:")
                .with_placeholder("Enter city")
                .with_help_message("Enter to get weather, Esc to quit")
                .prompt();

            let city = match input {
                Ok(city) => city,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
                Err(err) => return Err(err).context("Failed to read city"),
            };

            println!("{}", self.submit(&city).await);
        }

        Ok(())
    }

    pub async fn show(&mut self, city: &str) -> anyhow::Result<()> {
        self.view.lookup_city(self.provider.as_ref(), city).await?;
        print!("{}", render(&self.view, &self.options));
        Ok(())
    }

    /// Refresh `city` every `interval_secs` until `updates` are done or Ctrl-C.
    pub async fn watch(
        &mut self,
        city: &str,
        interval_secs: u64,
        updates: Option<u64>,
    ) -> anyhow::Result<()> {
        let ctrl_c = async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!(%err, "cannot listen for Ctrl-C; watch runs until its update limit");
                std::future::pending::<()>().await;
            }
        };
        self.watch_until(city, interval_secs, updates, ctrl_c).await
    }

    /// Like [`Dashboard::watch`], stopping as soon as `shutdown` resolves,
    /// including while a lookup is still in flight.
    async fn watch_until<F>(
        &mut self,
        city: &str,
        interval_secs: u64,
        updates: Option<u64>,
        shutdown: F,
    ) -> anyhow::Result<()>
    where
        F: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
        let mut done = 0u64;
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = &mut shutdown => {
                    info!(updates = done, "watch interrupted");
                    break;
                }
            }

            let screen = tokio::select! {
                screen = self.submit(city) => screen,
                _ = &mut shutdown => {
                    info!(updates = done, "watch interrupted during lookup");
                    break;
                }
            };

            println!("{screen}");
            done += 1;

            if updates.is_some_and(|limit| done >= limit) {
                break;
            }
        }

        Ok(())
    }

    #[cfg(test)]
    fn view(&self) -> &WeatherView {
        &self.view
    }
}
