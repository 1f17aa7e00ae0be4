use std::sync::Arc;
use tracing::debug;

use crate::{
    error::FetchError,
    model::{
        ExchangeQuery, ExchangeResult, MovieQuery, MovieResult, Outcome, ProviderKey,
        WeatherQuery, WeatherResult,
    },
    provider::{Endpoints, ExchangeProvider, MovieProvider, Provider, WeatherProvider},
    transport::{Transport, truncate_body},
};

/// Entry point for all three providers.
///
/// Each fetch makes exactly one transport call and keeps no state between calls.
#[derive(Debug, Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    exchange: ExchangeProvider,
    movie: MovieProvider,
    weather: WeatherProvider,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_endpoints(transport, Endpoints::default())
    }

    pub fn with_endpoints(transport: Arc<dyn Transport>, endpoints: Endpoints) -> Self {
        Self {
            transport,
            exchange: ExchangeProvider::new(endpoints.exchange),
            movie: MovieProvider::new(endpoints.movie),
            weather: WeatherProvider::new(endpoints.weather),
        }
    }

    pub async fn fetch_exchange_rate(
        &self,
        query: &ExchangeQuery,
        key: &ProviderKey,
    ) -> Outcome<ExchangeResult> {
        self.fetch(&self.exchange, query, key).await
    }

    pub async fn fetch_movie_details(
        &self,
        query: &MovieQuery,
        key: &ProviderKey,
    ) -> Outcome<MovieResult> {
        self.fetch(&self.movie, query, key).await
    }

    pub async fn fetch_weather(
        &self,
        query: &WeatherQuery,
        key: &ProviderKey,
    ) -> Outcome<WeatherResult> {
        self.fetch(&self.weather, query, key).await
    }

    /// Runs one provider round trip and drops the failure cause after logging it.
    pub async fn fetch<P: Provider>(
        &self,
        provider: &P,
        query: &P::Query,
        key: &ProviderKey,
    ) -> Outcome<P::Output> {
        match self.try_fetch(provider, query, key).await {
            Ok(output) => {
                debug!(provider = %provider.id(), "fetch succeeded");
                Some(output)
            }
            Err(err) => {
                debug!(provider = %provider.id(), error = %err, "fetch failed");
                None
            }
        }
    }

    async fn try_fetch<P: Provider>(
        &self,
        provider: &P,
        query: &P::Query,
        key: &ProviderKey,
    ) -> Result<P::Output, FetchError> {
        let request = provider.request(query, key);
        debug!(provider = %provider.id(), url = %request.url, "sending request");

        let response = self.transport.get(&request).await?;

        if !response.is_success() {
            return Err(FetchError::HttpStatus {
                status: response.status,
                body: truncate_body(&response.body),
            });
        }

        provider.decode(query, &response.body)
    }
}
