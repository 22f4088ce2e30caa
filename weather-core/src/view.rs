//! State owned by the weather dashboard and the transitions that mutate it.
//!
//! A lookup goes through three steps:
//! 1. [`WeatherView::begin_lookup`] validates the query and hands out a [`LookupTicket`].
//! 2. The caller asks a [`WeatherProvider`] for the city.
//! 3. [`WeatherView::complete_success`] or [`WeatherView::complete_failure`] settles the ticket.
//!
//! Only the most recently issued ticket can settle. A completion for an older
//! ticket is reported as [`Completion::Stale`] and leaves the state untouched,
//! so when lookups overlap the one started last wins.
//!
//! [`WeatherView::lookup`] runs all three steps against a provider.

use chrono::{DateTime, Local};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    model::{TemperatureHistory, WeatherReading},
    provider::WeatherProvider,
    summary::generate_summary,
};

/// User-facing lookup failures. The display text is what the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Please enter a city name.")]
    EmptyCity,

    /// Network, status or parse failure. The cause is logged, not shown.
    #[error("Could not fetch weather data. Try a valid city name.")]
    Fetch,
}

/// Identifies one lookup attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LookupTicket(u64);

/// A validated lookup waiting for the provider's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLookup {
    pub ticket: LookupTicket,
    pub city: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer lookup was started (or this one already settled); nothing changed.
    Stale,
}

#[derive(Debug, Default)]
pub struct WeatherView {
    query: String,
    reading: Option<WeatherReading>,
    summary: Option<String>,
    error: Option<LookupError>,
    history: TemperatureHistory,
    last_updated: Option<DateTime<Local>>,
    issued: u64,
    in_flight: Option<LookupTicket>,
}

impl WeatherView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_query(&mut self, city: impl Into<String>) {
        self.query = city.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn reading(&self) -> Option<&WeatherReading> {
        self.reading.as_ref()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn error(&self) -> Option<LookupError> {
        self.error
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.map(|e| e.to_string())
    }

    pub fn history(&self) -> &TemperatureHistory {
        &self.history
    }

    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    /// Start a lookup for the current query.
    ///
    /// Any lookup still in flight becomes stale. A blank query fails with
    /// [`LookupError::EmptyCity`] and no ticket is handed out.
    pub fn begin_lookup(&mut self) -> Result<PendingLookup, LookupError> {
        self.issued += 1;
        let ticket = LookupTicket(self.issued);

        let city = self.query.trim();
        if city.is_empty() {
            self.in_flight = None;
            self.fail(LookupError::EmptyCity);
            return Err(LookupError::EmptyCity);
        }

        let city = city.to_owned();
        self.error = None;
        self.in_flight = Some(ticket);

        debug!(?ticket, %city, "lookup started");
        Ok(PendingLookup { ticket, city })
    }

    pub fn complete_success(
        &mut self,
        ticket: LookupTicket,
        reading: WeatherReading,
        now: DateTime<Local>,
    ) -> Completion {
        if !self.settle(ticket) {
            return Completion::Stale;
        }

        self.history.push(reading.temperature_c);
        self.summary = Some(generate_summary(&reading));
        self.reading = Some(reading);
        self.last_updated = Some(now);
        self.error = None;

        Completion::Applied
    }

    pub fn complete_failure(&mut self, ticket: LookupTicket, cause: &anyhow::Error) -> Completion {
        if !self.settle(ticket) {
            return Completion::Stale;
        }

        warn!(?ticket, "weather lookup failed: {cause:#}");
        self.fail(LookupError::Fetch);

        Completion::Applied
    }

    /// Run one full lookup for the current query against `provider`.
    pub async fn lookup<P>(&mut self, provider: &P) -> Result<(), LookupError>
    where
        P: WeatherProvider + ?Sized,
    {
        let pending = self.begin_lookup()?;

        match provider.current_weather(&pending.city).await {
            Ok(reading) => {
                self.complete_success(pending.ticket, reading, Local::now());
                Ok(())
            }
            Err(cause) => {
                self.complete_failure(pending.ticket, &cause);
                Err(LookupError::Fetch)
            }
        }
    }

    /// Lookup for `city`, replacing the query first.
    pub async fn lookup_city<P>(&mut self, provider: &P, city: &str) -> Result<(), LookupError>
    where
        P: WeatherProvider + ?Sized,
    {
        self.set_query(city);
        self.lookup(provider).await
    }

    fn settle(&mut self, ticket: LookupTicket) -> bool {
        if self.in_flight != Some(ticket) {
            debug!(?ticket, latest = self.issued, "dropping stale lookup result");
            return false;
        }
        self.in_flight = None;
        true
    }

    fn fail(&mut self, error: LookupError) {
        self.reading = None;
        self.summary = None;
        self.error = Some(error);
    }
}
