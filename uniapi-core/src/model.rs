use std::fmt;

/// Result of a fetch: `Some` on success, `None` for every failure cause.
///
/// Callers never learn why a fetch came back empty; the client logs the cause.
pub type Outcome<T> = Option<T>;

/// API key for a single provider. Never empty, never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderKey(String);

impl ProviderKey {
    /// Returns `None` for empty or whitespace-only input. Anything else is kept as given.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() { None } else { Some(Self(value)) }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ProviderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProviderKey(<redacted>)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeQuery {
    pub source: String,
    pub target: String,
}

impl ExchangeQuery {
    /// Currency codes are trimmed and uppercased; they are not checked against any registry.
    pub fn new(source: &str, target: &str) -> Self {
        Self { source: source.trim().to_uppercase(), target: target.trim().to_uppercase() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeResult {
    pub source: String,
    pub target: String,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieQuery {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieResult {
    pub title: String,
    pub year: String,
    pub plot: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    pub city: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherResult {
    /// Echoed from the query; the provider's own location name is ignored.
    pub city: String,
    pub temperature_c: f64,
    pub condition: String,
}
