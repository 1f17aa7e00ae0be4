use serde::Deserialize;

use crate::{
    error::FetchError,
    model::{ProviderKey, WeatherQuery, WeatherResult},
    transport::HttpRequest,
};

use super::{Provider, ProviderId};

/// WeatherAPI.com current conditions.
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    base_url: String,
}

impl WeatherProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    current: WaCurrent,
}

impl Provider for WeatherProvider {
    type Query = WeatherQuery;
    type Output = WeatherResult;

    fn id(&self) -> ProviderId {
        ProviderId::Weather
    }

    fn request(&self, query: &WeatherQuery, key: &ProviderKey) -> HttpRequest {
        HttpRequest::get(self.base_url.as_str())
            .with_query("key", key.expose())
            .with_query("q", query.city.as_str())
    }

    fn decode(&self, query: &WeatherQuery, body: &str) -> Result<WeatherResult, FetchError> {
        let parsed: WaResponse = serde_json::from_str(body).map_err(FetchError::malformed)?;

        Ok(WeatherResult {
            city: query.city.clone(),
            temperature_c: parsed.current.temp_c,
            condition: parsed.current.condition.text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> WeatherProvider {
        WeatherProvider::new("http://weather.test/v1/current.json")
    }

    fn london() -> WeatherQuery {
        WeatherQuery { city: "London".to_string() }
    }

    #[test]
    fn request_carries_key_and_city() {
        let key = ProviderKey::new("KEY").unwrap();
        let req = provider().request(&london(), &key);

        assert_eq!(req.query_param("key"), Some("KEY"));
        assert_eq!(req.query_param("q"), Some("London"));
    }

    #[test]
    fn decodes_current_conditions() {
        let body = r#"{
            "location": {"name": "London", "country": "United Kingdom"},
            "current": {"temp_c": 22.0, "condition": {"text": "Sunny", "code": 1000}}
        }"#;
        let res = provider().decode(&london(), body).unwrap();

        assert_eq!(res.city, "London");
        assert_eq!(res.temperature_c, 22.0);
        assert_eq!(res.condition, "Sunny");
    }

    #[test]
    fn city_comes_from_query_not_payload() {
        let query = WeatherQuery { city: "londres".to_string() };
        let body = concat!(
            r#"{"location":{"name":"London"},"#,
            r#""current":{"temp_c":9.5,"condition":{"text":"Rain"}}}"#
        );

        let res = provider().decode(&query, body).unwrap();
        assert_eq!(res.city, "londres");
    }

    #[test]
    fn missing_condition_is_malformed() {
        let body = r#"{"current":{"temp_c":22.0}}"#;
        let err = provider().decode(&london(), body).unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[test]
    fn missing_current_is_malformed() {
        let body = r#"{"error":{"code":1006,"message":"No matching location found."}}"#;
        assert!(provider().decode(&london(), body).is_err());
    }
}
