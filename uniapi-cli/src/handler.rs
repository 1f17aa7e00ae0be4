use tracing::debug;
use uniapi_core::{
    ApiClient, Config, ExchangeQuery, ExchangeResult, MovieQuery, MovieResult, Outcome, ProviderId,
    ProviderKey, WeatherQuery, WeatherResult,
};

use crate::console::{Accent, Console, ConsoleError};

pub const CONTINUE_PROMPT: &str = "Press Enter to continue...";
pub const RETURN_PROMPT: &str = "Press Enter to return to menu...";

/// A fetch result projected into a titled list of (label, value) rows.
pub trait Report {
    fn title(&self) -> String;
    fn rows(&self) -> Vec<(String, String)>;
}

impl Report for ExchangeResult {
    fn title(&self) -> String {
        "Exchange Rate".to_string()
    }

    fn rows(&self) -> Vec<(String, String)> {
        vec![
            ("Source".to_string(), self.source.clone()),
            ("Target".to_string(), self.target.clone()),
            ("Rate".to_string(), format_number(self.rate)),
        ]
    }
}

impl Report for MovieResult {
    fn title(&self) -> String {
        format!("🎬 {}", self.title)
    }

    fn rows(&self) -> Vec<(String, String)> {
        vec![
            ("Title".to_string(), self.title.clone()),
            ("Year".to_string(), self.year.clone()),
            ("Plot".to_string(), self.plot.clone()),
        ]
    }
}

impl Report for WeatherResult {
    fn title(&self) -> String {
        "Weather Report".to_string()
    }

    fn rows(&self) -> Vec<(String, String)> {
        vec![
            ("City".to_string(), self.city.clone()),
            ("Temperature".to_string(), format!("{}°C", format_number(self.temperature_c))),
            ("Condition".to_string(), self.condition.clone()),
        ]
    }
}

/// Whole numbers keep one decimal place: `22.0`, not `22`.
fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

pub async fn exchange_rate<C: Console + ?Sized>(
    console: &mut C,
    client: &ApiClient,
    config: &Config,
) -> Result<(), ConsoleError> {
    let Some(key) = require_key(console, config, ProviderId::Exchange) else {
        return Ok(());
    };

    console.show_info("--- Currency Converter ---");
    let source = console.prompt("From Currency (e.g. USD):").await?;
    let target = console.prompt("To Currency (e.g. EUR):").await?;
    let query = ExchangeQuery::new(&source, &target);

    console.begin_work("Fetching rates...");
    let outcome = client.fetch_exchange_rate(&query, key).await;
    console.end_work();

    present(console, outcome, Accent::Cyan, "Failed to fetch exchange rate.").await
}

pub async fn movie<C: Console + ?Sized>(
    console: &mut C,
    client: &ApiClient,
    config: &Config,
) -> Result<(), ConsoleError> {
    let Some(key) = require_key(console, config, ProviderId::Movie) else {
        return Ok(());
    };

    let title = console.prompt("Enter movie title:").await?;
    let query = MovieQuery { title: title.trim().to_string() };

    console.begin_work("Searching OMDb...");
    let outcome = client.fetch_movie_details(&query, key).await;
    console.end_work();

    present(console, outcome, Accent::Magenta, "Movie not found.").await
}

pub async fn weather<C: Console + ?Sized>(
    console: &mut C,
    client: &ApiClient,
    config: &Config,
) -> Result<(), ConsoleError> {
    let Some(key) = require_key(console, config, ProviderId::Weather) else {
        return Ok(());
    };

    let city = console.prompt("Enter city name:").await?;
    let query = WeatherQuery { city: city.trim().to_string() };

    console.begin_work("Checking skies...");
    let outcome = client.fetch_weather(&query, key).await;
    console.end_work();

    present(console, outcome, Accent::Blue, "Could not fetch weather data.").await
}

/// Looks up the key before any prompt so the user never types into a request that cannot run.
///
/// A missing key is reported and the handler returns straight away, without reading input.
fn require_key<'a, C: Console + ?Sized>(
    console: &mut C,
    config: &'a Config,
    id: ProviderId,
) -> Option<&'a ProviderKey> {
    let key = config.provider_api_key(id);
    if key.is_none() {
        debug!(provider = %id, var = id.env_var(), "handler skipped: no API key");
        console.show_error(&format!(
            "Error: Missing {} API Key (set {})",
            id.display_name(),
            id.env_var()
        ));
    }
    key
}

async fn present<C: Console + ?Sized, R: Report>(
    console: &mut C,
    outcome: Outcome<R>,
    accent: Accent,
    failure: &str,
) -> Result<(), ConsoleError> {
    match outcome {
        Some(report) => {
            console.show_table(&report.title(), &report.rows(), accent);
            console.pause(RETURN_PROMPT).await
        }
        None => {
            console.show_error(failure);
            console.pause(CONTINUE_PROMPT).await
        }
    }
}
