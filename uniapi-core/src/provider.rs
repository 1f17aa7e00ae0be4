use crate::{error::FetchError, model::ProviderKey, transport::HttpRequest};
use std::fmt::Debug;

pub mod exchange;
pub mod movie;
pub mod weather;

pub use exchange::ExchangeProvider;
pub use movie::MovieProvider;
pub use weather::WeatherProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Exchange,
    Movie,
    Weather,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Exchange => "fastforex",
            ProviderId::Movie => "omdb",
            ProviderId::Weather => "weatherapi",
        }
    }

    /// Human-facing name used in prompts and error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderId::Exchange => "Exchange Rate",
            ProviderId::Movie => "Movie",
            ProviderId::Weather => "Weather",
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn env_var(&self) -> &'static str {
        match self {
            ProviderId::Exchange => "EXCHANGE_RATE_API_KEY",
            ProviderId::Movie => "MOVIE_API_KEY",
            ProviderId::Weather => "WEATHER_API_KEY",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::Exchange, ProviderId::Movie, ProviderId::Weather]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One third-party API: how to ask it something and how to read the answer.
///
/// `decode` is both the success predicate and the field extractor; the client
/// has already rejected transport failures and non-2xx statuses by the time it runs.
pub trait Provider: Send + Sync + Debug {
    type Query: Sync;
    type Output;

    fn id(&self) -> ProviderId;

    fn request(&self, query: &Self::Query, key: &ProviderKey) -> HttpRequest;

    fn decode(&self, query: &Self::Query, body: &str) -> Result<Self::Output, FetchError>;
}

/// Base URLs of the three providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub exchange: String,
    pub movie: String,
    pub weather: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            exchange: "https://api.fastforex.io/fetch-one".to_string(),
            movie: "http://www.omdbapi.com/".to_string(),
            weather: "http://api.weatherapi.com/v1/current.json".to_string(),
        }
    }
}
