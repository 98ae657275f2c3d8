use log::{debug, trace};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;

use super::config::ClientConfig;
use super::urls::qualify_url;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("{status}")]
    Status { status: StatusCode, body: String },
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Invalid response body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl FetchError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network(e) => e.status(),
            Self::Decode(_) => None,
        }
    }
}

/// JSON-over-HTTP client for the platform's REST API. Every request carries
/// the `X-Requested-By` header and, when configured, the API token.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: Client,
    base_url: String,
    api_token: Option<String>,
    requested_by: String,
}

impl RestClient {
    pub fn new(config: &ClientConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.server_url.clone(),
            api_token: config.api_token.clone(),
            requested_by: config.requested_by.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn qualify_url(&self, path: &str) -> String {
        qualify_url(&self.base_url, path)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        self.fetch(Method::GET, path, query, None).await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, FetchError> {
        self.fetch(Method::POST, path, &[], body).await
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T, FetchError> {
        self.fetch(Method::PUT, path, &[], Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        self.fetch(Method::DELETE, path, &[], None).await
    }

    /// Non-2xx responses become [`FetchError::Status`]. An empty 2xx body
    /// decodes as JSON `null`, so `T = ()` or `Option<_>` accept it.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> Result<T, FetchError> {
        let url = self.qualify_url(path);
        debug!("{method} {url}");

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header("X-Requested-By", &self.requested_by)
            .header(reqwest::header::ACCEPT, "application/json");

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = &self.api_token {
            request = request.basic_auth(token, Some("token"));
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        trace!("{method} {url} -> {status}: {text}");

        if !status.is_success() {
            return Err(FetchError::Status { status, body: text });
        }

        let payload = if text.trim().is_empty() { "null" } else { text.as_str() };
        serde_json::from_str(payload).map_err(FetchError::Decode)
    }
}
