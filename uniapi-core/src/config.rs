use anyhow::{Context, Result, anyhow};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::{debug, warn};

use crate::{model::ProviderKey, provider::ProviderId};

/// Environment variable overriding the per-request timeout, in whole seconds.
pub const TIMEOUT_ENV: &str = "UNIAPI_TIMEOUT_SECS";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// What happened when looking for an env file.
///
/// Loading runs before logging is set up, so the caller logs this afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvFile {
    Loaded(PathBuf),
    NotFound,
    /// Present but not parseable; variables read before the bad line are kept.
    Unreadable(String),
}

impl EnvFile {
    pub fn log(&self) {
        match self {
            EnvFile::Loaded(path) => debug!(path = %path.display(), "loaded env file"),
            EnvFile::NotFound => debug!("no .env file found"),
            EnvFile::Unreadable(err) => warn!(error = %err, "ignoring unreadable .env file"),
        }
    }

    fn classify(res: std::result::Result<PathBuf, dotenvy::Error>) -> Self {
        match res {
            Ok(path) => EnvFile::Loaded(path),
            Err(err) if err.not_found() => EnvFile::NotFound,
            Err(err) => EnvFile::Unreadable(err.to_string()),
        }
    }
}

/// Runtime configuration, built once at startup and passed to the handlers.
#[derive(Debug, Clone)]
pub struct Config {
    providers: HashMap<ProviderId, ProviderKey>,

    /// Upper bound on a single provider request.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self { providers: HashMap::new(), timeout: DEFAULT_TIMEOUT }
    }
}

impl Config {
    /// Seed the process environment from a `.env` file.
    ///
    /// With an explicit path the file must exist and parse; otherwise a missing or
    /// broken `.env` is reported in the returned [`EnvFile`] and startup goes on.
    pub fn load_dotenv(path: Option<&Path>) -> Result<EnvFile> {
        match path {
            Some(path) => {
                dotenvy::from_path(path)
                    .with_context(|| format!("Failed to load env file: {}", path.display()))?;
                Ok(EnvFile::Loaded(path.to_path_buf()))
            }
            None => Ok(EnvFile::classify(dotenvy::dotenv())),
        }
    }

    /// Build configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from any name -> value lookup.
    ///
    /// Missing or blank keys are not an error; handlers report them when used.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Config::default();

        for id in ProviderId::all() {
            match lookup(id.env_var()) {
                Some(value) => {
                    if !cfg.upsert_provider_api_key(*id, value) {
                        warn!(provider = %id, var = id.env_var(), "API key is blank");
                    }
                }
                None => debug!(provider = %id, var = id.env_var(), "API key not set"),
            }
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            cfg.timeout = parse_timeout(&raw)
                .with_context(|| format!("Invalid {TIMEOUT_ENV} value '{raw}'"))?;
        }

        Ok(cfg)
    }

    /// Set or replace a provider API key. Returns `false` (and stores nothing) for a blank key.
    pub fn upsert_provider_api_key(&mut self, provider_id: ProviderId, api_key: String) -> bool {
        match ProviderKey::new(api_key) {
            Some(key) => {
                self.providers.insert(provider_id, key);
                true
            }
            None => false,
        }
    }

    /// Returns API key for a provider, if present.
    pub fn provider_api_key(&self, provider_id: ProviderId) -> Option<&ProviderKey> {
        self.providers.get(&provider_id)
    }

    pub fn is_provider_configured(&self, provider_id: ProviderId) -> bool {
        self.provider_api_key(provider_id).is_some()
    }
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    let secs: u64 = raw.trim().parse().context("expected a whole number of seconds")?;
    if secs == 0 {
        return Err(anyhow!("timeout must be greater than zero"));
    }
    Ok(Duration::from_secs(secs))
}
