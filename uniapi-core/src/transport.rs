use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::{fmt, time::Duration};
use thiserror::Error;

/// A single outbound GET.
///
/// Query values are kept apart from the URL so they are encoded by the transport
/// and so the API key never ends up in a log line.
#[derive(Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self { url: url.into(), query: Vec::new(), headers: Vec::new() }
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into().to_ascii_lowercase(), value.into()));
        self
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers.iter().find(|(n, _)| *n == name).map(|(_, v)| v.as_str())
    }
}

// Parameter values may hold credentials, so only their names are printed.
impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<&str> = self.query.iter().map(|(n, _)| n.as_str()).collect();
        f.debug_struct("HttpRequest")
            .field("url", &self.url)
            .field("query", &params)
            .field("headers", &self.headers)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn ok_json(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("request failed: {0}")]
    Request(String),

    #[error("failed to read response body: {0}")]
    Body(String),
}

/// The HTTP GET capability the API client depends on.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Production transport backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("uniapi/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.http.get(&request.url).query(&request.query);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let res = builder.send().await.map_err(request_error)?;

        let status = res.status().as_u16();
        let body = res.text().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout
            } else {
                TransportError::Body(e.without_url().to_string())
            }
        })?;

        Ok(HttpResponse { status, body })
    }
}

// reqwest puts the full URL, query string included, into its error messages.
fn request_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Request(err.without_url().to_string())
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_hides_query_values() {
        let req = HttpRequest::get("http://example.test/").with_query("apikey", "SECRET");
        let printed = format!("{req:?}");

        assert!(printed.contains("apikey"));
        assert!(!printed.contains("SECRET"));
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let req =
            HttpRequest::get("http://example.test/").with_header("Accept", "application/json");
        assert_eq!(req.header("ACCEPT"), Some("application/json"));
        assert_eq!(req.header("content-type"), None);
    }

    #[test]
    fn success_range() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(301, "").is_success());
        assert!(!HttpResponse::new(404, "").is_success());
    }

    #[test]
    fn truncate_keeps_short_bodies() {
        assert_eq!(truncate_body("short"), "short");

        let long = "é".repeat(300);
        let cut = truncate_body(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
    }
}
