use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::{
    error::FetchError,
    model::{ExchangeQuery, ExchangeResult, ProviderKey},
    transport::HttpRequest,
};

use super::{Provider, ProviderId};

/// FastForex `fetch-one`: a single rate from `source` to `target`.
#[derive(Debug, Clone)]
pub struct ExchangeProvider {
    base_url: String,
}

impl ExchangeProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }
}

/// `{ "base": "USD", "result": { "EUR": 0.85 }, ... }`
#[derive(Debug, Deserialize)]
struct FfResponse {
    result: HashMap<String, Value>,
}

impl Provider for ExchangeProvider {
    type Query = ExchangeQuery;
    type Output = ExchangeResult;

    fn id(&self) -> ProviderId {
        ProviderId::Exchange
    }

    fn request(&self, query: &ExchangeQuery, key: &ProviderKey) -> HttpRequest {
        HttpRequest::get(self.base_url.as_str())
            .with_query("from", query.source.as_str())
            .with_query("to", query.target.as_str())
            .with_query("api_key", key.expose())
            .with_header("accept", "application/json")
    }

    fn decode(&self, query: &ExchangeQuery, body: &str) -> Result<ExchangeResult, FetchError> {
        let parsed: FfResponse = serde_json::from_str(body).map_err(FetchError::malformed)?;

        let value = parsed.result.get(&query.target).ok_or_else(|| {
            FetchError::Malformed(format!("missing result.{}", query.target))
        })?;

        let rate = value.as_f64().ok_or_else(|| {
            FetchError::Malformed(format!("result.{} is not a number: {value}", query.target))
        })?;

        Ok(ExchangeResult { source: query.source.clone(), target: query.target.clone(), rate })
    }
}
