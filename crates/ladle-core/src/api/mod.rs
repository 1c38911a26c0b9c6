//! HTTP client wrapper for the recipe backend.
//!
//! A thin layer over `reqwest` that concatenates paths onto the configured
//! base URL, attaches the bearer token when one is supplied, and classifies
//! failures into the [`ApiError`] taxonomy. Stores decide what to do with
//! the errors; this module never logs.

mod errors;

pub use errors::{ApiError, ApiErrorKind};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::Config;

/// JSON client for the recipe backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client against the given base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Creates a client from configuration, honoring the env override.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.effective_base_url())
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POSTs a JSON body and decodes a JSON response.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T, ApiError> {
        let mut req = self.http.post(self.url(path)).json(body);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        Self::execute(req).await
    }

    /// GETs a JSON response.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let mut req = self.http.get(self.url(path));
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        Self::execute(req).await
    }

    /// PUTs a JSON body and decodes a JSON response.
    pub async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T, ApiError> {
        let mut req = self.http.put(self.url(path)).json(body);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        Self::execute(req).await
    }

    /// DELETEs and decodes a JSON response.
    pub async fn delete_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let mut req = self.http.delete(self.url(path));
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        Self::execute(req).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends a request and classifies the outcome.
    async fn execute<T: DeserializeOwned>(req: reqwest::RequestBuilder) -> Result<T, ApiError> {
        let response = req.send().await.map_err(|e| ApiError::transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::http_status(status.as_u16(), &body));
        }

        response.json::<T>().await.map_err(|e| ApiError::parse(e))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn test_get_attaches_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/recipes/get-recipes"))
            .and(header("authorization", "Bearer jwt-abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let result: Result<Value, ApiError> = client
            .get_json("/api/recipes/get-recipes", Some("jwt-abc"))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_non_success_status_becomes_http_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/recipes/get-recipes"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"success": false, "message": "Invalid token"})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let err = client
            .get_json::<Value>("/api/recipes/get-recipes", Some("stale"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::HttpStatus);
        assert!(err.message.contains("Invalid token"));
    }

    #[tokio::test]
    async fn test_undecodable_body_becomes_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let err = client.get_json::<Value>("/health", None).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Parse);
    }

    #[tokio::test]
    async fn test_connect_failure_becomes_transport_error() {
        // Port 1 is never listening
        let client = ApiClient::new("http://127.0.0.1:1");
        let err = client.get_json::<Value>("/health", None).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Transport);
    }
}
