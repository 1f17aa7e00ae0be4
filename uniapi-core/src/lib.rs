//! Core library for the `uniapi` CLI.
//!
//! This crate defines:
//! - Credential and runtime configuration handling
//! - The HTTP transport seam and its `reqwest` implementation
//! - One provider strategy per third-party API (exchange rate, movie, weather)
//! - The API client that collapses every fetch failure into an absent outcome
//!
//! It is used by `uniapi-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod transport;

pub use client::ApiClient;
pub use config::{Config, EnvFile};
pub use error::FetchError;
pub use model::{
    ExchangeQuery, ExchangeResult, MovieQuery, MovieResult, Outcome, ProviderKey, WeatherQuery,
    WeatherResult,
};
pub use provider::{Endpoints, Provider, ProviderId};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError};
