use serde::Deserialize;

use crate::{
    error::FetchError,
    model::{MovieQuery, MovieResult, ProviderKey},
    transport::HttpRequest,
};

use super::{Provider, ProviderId};

/// OMDb title lookup.
#[derive(Debug, Clone)]
pub struct MovieProvider {
    base_url: String,
}

impl MovieProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }
}

/// OMDb answers 200 even for unknown titles; `Response` is the real status.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OmdbResponse {
    response: String,
    title: Option<String>,
    year: Option<String>,
    plot: Option<String>,
    error: Option<String>,
}

impl Provider for MovieProvider {
    type Query = MovieQuery;
    type Output = MovieResult;

    fn id(&self) -> ProviderId {
        ProviderId::Movie
    }

    fn request(&self, query: &MovieQuery, key: &ProviderKey) -> HttpRequest {
        HttpRequest::get(self.base_url.as_str())
            .with_query("t", query.title.as_str())
            .with_query("apikey", key.expose())
    }

    fn decode(&self, _query: &MovieQuery, body: &str) -> Result<MovieResult, FetchError> {
        let parsed: OmdbResponse = serde_json::from_str(body).map_err(FetchError::malformed)?;

        if parsed.response != "True" {
            return Err(FetchError::ProviderReported(
                parsed.error.unwrap_or_else(|| format!("Response was {:?}", parsed.response)),
            ));
        }

        match (parsed.title, parsed.year, parsed.plot) {
            (Some(title), Some(year), Some(plot)) => Ok(MovieResult { title, year, plot }),
            _ => Err(FetchError::Malformed("missing Title, Year or Plot".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> MovieProvider {
        MovieProvider::new("http://omdb.test/")
    }

    fn query() -> MovieQuery {
        MovieQuery { title: "Inception".to_string() }
    }

    #[test]
    fn request_carries_title_and_key() {
        let key = ProviderKey::new("KEY").unwrap();
        let req = provider().request(&query(), &key);

        assert_eq!(req.query_param("t"), Some("Inception"));
        assert_eq!(req.query_param("apikey"), Some("KEY"));
        assert!(req.headers.is_empty());
    }

    #[test]
    fn decodes_found_movie_verbatim() {
        let body = concat!(
            r#"{"Response":"True","Title":"Inception","#,
            r#""Year":"2010","Plot":"Dreams.","Rated":"PG-13"}"#
        );
        let res = provider().decode(&query(), body).unwrap();

        assert_eq!(
            res,
            MovieResult {
                title: "Inception".to_string(),
                year: "2010".to_string(),
                plot: "Dreams.".to_string(),
            }
        );
    }

    #[test]
    fn fields_are_not_trimmed() {
        let body = r#"{"Response":"True","Title":" Inception ","Year":"2010–","Plot":""}"#;
        let res = provider().decode(&query(), body).unwrap();

        assert_eq!(res.title, " Inception ");
        assert_eq!(res.year, "2010–");
        assert_eq!(res.plot, "");
    }

    #[test]
    fn response_false_wins_over_other_fields() {
        let body = concat!(
            r#"{"Response":"False","Title":"Inception","Year":"2010","#,
            r#""Plot":"Dreams.","Error":"Movie not found!"}"#
        );
        let err = provider().decode(&query(), body).unwrap_err();

        match err {
            FetchError::ProviderReported(msg) => assert_eq!(msg, "Movie not found!"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn response_flag_is_case_sensitive() {
        let body = r#"{"Response":"true","Title":"Inception","Year":"2010","Plot":"Dreams."}"#;
        assert!(provider().decode(&query(), body).is_err());
    }

    #[test]
    fn missing_response_flag_is_malformed() {
        let body = r#"{"Title":"Inception","Year":"2010","Plot":"Dreams."}"#;
        let err = provider().decode(&query(), body).unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }
}
