use std::fmt;

use crate::{
    chart::render_line_chart,
    config::{DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH, DEFAULT_ICON_BASE_URL},
    model::WeatherReading,
    summary::display_number,
    view::WeatherView,
};

pub const TITLE: &str = "Weather Dashboard";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub icon_base_url: String,
    pub chart_width: usize,
    pub chart_height: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            icon_base_url: DEFAULT_ICON_BASE_URL.to_string(),
            chart_width: DEFAULT_CHART_WIDTH,
            chart_height: DEFAULT_CHART_HEIGHT,
        }
    }
}

impl RenderOptions {
    pub fn icon_url(&self, icon: &str) -> String {
        format!("{}/{}@2x.png", self.icon_base_url.trim_end_matches('/'), icon)
    }
}

/// Render the whole dashboard. Output depends only on `view` and `options`.
pub fn render(view: &WeatherView, options: &RenderOptions) -> String {
    DashboardText { view, options }.to_string()
}

struct DashboardText<'a> {
    view: &'a WeatherView,
    options: &'a RenderOptions,
}

impl fmt::Display for DashboardText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{TITLE}")?;

        if let Some(message) = self.view.error_message() {
            writeln!(f)?;
            writeln!(f, "{message}")?;
        }

        if let Some(reading) = self.view.reading() {
            writeln!(f)?;
            self.write_reading(f, reading)?;
        }

        let history = self.view.history();
        if !history.is_empty() {
            writeln!(f)?;
            let chart = render_line_chart(
                history.values(),
                self.options.chart_width,
                self.options.chart_height,
            );
            f.write_str(&chart)?;
        }

        Ok(())
    }
}

impl DashboardText<'_> {
    fn write_reading(&self, f: &mut fmt::Formatter<'_>, r: &WeatherReading) -> fmt::Result {
        let n = display_number;

        writeln!(f, "{}", r.location_name)?;
        writeln!(f, "Icon: {}", self.options.icon_url(&r.icon))?;
        writeln!(f, "Condition: {}", r.description)?;
        writeln!(f, "Temperature: {}°C", n(r.temperature_c))?;
        writeln!(f, "Min Temp: {}°C", n(r.temp_min_c))?;
        writeln!(f, "Max Temp: {}°C", n(r.temp_max_c))?;
        writeln!(f, "Humidity: {}%", n(r.humidity_pct))?;
        writeln!(f, "Pressure: {} hPa", n(r.pressure_hpa))?;
        writeln!(f, "Sea Level: {}", hpa_or_na(r.sea_level_hpa))?;
        writeln!(f, "Ground Level: {}", hpa_or_na(r.ground_level_hpa))?;
        writeln!(f, "Wind Speed: {} m/s", n(r.wind_speed_mps))?;
        writeln!(f, "Wind Direction: {}°", n(r.wind_direction_deg))?;

        if let Some(ts) = self.view.last_updated() {
            writeln!(f)?;
            writeln!(f, "Last Updated: {}", ts.format(TIMESTAMP_FORMAT))?;
        }
        if let Some(summary) = self.view.summary() {
            writeln!(f, "{summary}")?;
        }

        Ok(())
    }
}

fn hpa_or_na(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{} hPa", display_number(v)),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn london() -> WeatherReading {
        WeatherReading {
            location_name: "London".to_string(),
            description: "clear sky".to_string(),
            icon: "01d".to_string(),
            temperature_c: 15.0,
            temp_min_c: 13.5,
            temp_max_c: 16.8,
            humidity_pct: 70.0,
            pressure_hpa: 1012.0,
            sea_level_hpa: Some(1012.0),
            ground_level_hpa: None,
            wind_speed_mps: 3.0,
            wind_direction_deg: 180.0,
        }
    }

    fn view_with_london() -> WeatherView {
        let mut view = WeatherView::new();
        view.set_query("London");
        let pending = view.begin_lookup().unwrap();
        let at = Local.with_ymd_and_hms(2026, 10, 19, 9, 30, 5).unwrap();
        view.complete_success(pending.ticket, london(), at);
        view
    }

    #[test]
    fn fresh_view_shows_only_title() {
        let out = render(&WeatherView::new(), &RenderOptions::default());
        assert_eq!(out, "Weather Dashboard\n");
    }

    #[test]
    fn reading_block_lists_every_detail() {
        let out = render(&view_with_london(), &RenderOptions::default());

        for line in [
            "London",
            "Icon: http://openweathermap.org/img/wn/01d@2x.png",
            "Condition: clear sky",
            "Temperature: 15°C",
            "Min Temp: 13.5°C",
            "Max Temp: 16.8°C",
            "Humidity: 70%",
            "Pressure: 1012 hPa",
            "Sea Level: 1012 hPa",
            "Ground Level: N/A",
            "Wind Speed: 3 m/s",
            "Wind Direction: 180°",
            "Last Updated: 2026-10-19 09:30:05",
            "The current weather is clear sky with a temperature of 15°C. \
             The humidity is 70% and the wind speed is 3 m/s.",
        ] {
            assert!(out.lines().any(|l| l == line), "missing line {line:?} in:\n{out}");
        }
        assert!(out.contains("Temperature History (°C)"));
        assert!(out.contains("Update 1"));
    }

    #[test]
    fn error_hides_reading_but_keeps_chart() {
        let mut view = view_with_london();
        view.set_query("Atlantis");
        let pending = view.begin_lookup().unwrap();
        view.complete_failure(pending.ticket, &anyhow::anyhow!("404"));

        let out = render(&view, &RenderOptions::default());
        assert!(out.contains("Could not fetch weather data. Try a valid city name."));
        assert!(!out.contains("Condition:"));
        assert!(out.contains("Temperature History (°C)"));
    }

    #[test]
    fn chart_omitted_without_history() {
        let mut view = WeatherView::new();
        let _ = view.begin_lookup();

        let out = render(&view, &RenderOptions::default());
        assert!(out.contains("Please enter a city name."));
        assert!(!out.contains("Temperature History"));
    }

    #[test]
    fn rendering_is_idempotent() {
        let view = view_with_london();
        let options = RenderOptions { chart_height: 4, ..RenderOptions::default() };

        assert_eq!(render(&view, &options), render(&view, &options));
    }

    #[test]
    fn negative_zero_details_print_as_zero() {
        let mut view = WeatherView::new();
        view.set_query("Reykjavik");
        let pending = view.begin_lookup().unwrap();
        let reading = WeatherReading { temperature_c: -0.0, temp_max_c: -0.0, ..london() };
        view.complete_success(pending.ticket, reading, Local::now());

        let out = render(&view, &RenderOptions::default());
        assert!(out.lines().any(|l| l == "Temperature: 0°C"));
        assert!(out.lines().any(|l| l == "Max Temp: 0°C"));
    }

    #[test]
    fn icon_url_tolerates_trailing_slash() {
        let options = RenderOptions {
            icon_base_url: "https://icons.example/wn/".into(),
            ..RenderOptions::default()
        };
        assert_eq!(options.icon_url("10n"), "https://icons.example/wn/10n@2x.png");
    }
}
