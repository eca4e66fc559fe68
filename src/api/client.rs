//! HTTP client for the LMS REST API

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::auth::TokenProvider;
use super::error::ApiError;
use crate::config::Config;

/// LMS API client
///
/// Thin JSON wrapper over reqwest: joins endpoints onto the base URL, adds
/// the bearer token and retries transient failures.
pub struct ApiClient {
    /// HTTP client
    client: Client,
    /// Base URL without trailing slash
    base_url: String,
    /// Source of the bearer token
    tokens: Arc<dyn TokenProvider>,
    /// Extra attempts for retryable failures
    max_retries: u32,
    /// Pause between attempts
    retry_delay: Duration,
}

impl ApiClient {
    /// Create a client from configuration
    pub fn new(config: &Config, tokens: impl TokenProvider + 'static) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.request_timeout()).build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            tokens: Arc::new(tokens),
            max_retries: config.max_retries,
            retry_delay: config.retry_delay(),
        })
    }

    /// Resolve an endpoint path, leaving absolute URLs untouched
    pub fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }

    /// Absolute URL for an endpoint given as path segments
    ///
    /// Each segment is percent-encoded, so ids may contain `/`, `?` or spaces.
    pub fn endpoint(&self, segments: &[&str]) -> Result<String, ApiError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url.to_string())
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request(Method::GET, endpoint, None::<&()>).await
    }

    pub async fn post<T, B>(&self, endpoint: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, endpoint, body).await
    }

    pub async fn put<T, B>(&self, endpoint: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, endpoint, body).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request(Method::DELETE, endpoint, None::<&()>).await
    }

    /// Send a request, retrying network errors, 5xx and 429 responses
    async fn request<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(endpoint);
        let mut attempt = 0;

        loop {
            match self.send_once(method.clone(), &url, body).await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.max_retries && e.is_retryable() => {
                    attempt += 1;
                    tracing::warn!(
                        "{} {} failed ({}), retry {}/{}",
                        method,
                        url,
                        e,
                        attempt,
                        self.max_retries
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => {
                    tracing::error!("{} {} failed: {}", method, url, e);
                    return Err(e);
                }
            }
        }
    }

    async fn send_once<T, B>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut request = self.client.request(method, url).header(CONTENT_TYPE, "application/json");

        if let Some(token) = self.tokens.access_token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(error_from_response(status, &text));
        }

        let text = response.text().await?;
        // Some endpoints answer with an empty body
        let text = if text.trim().is_empty() { "null" } else { text.as_str() };
        Ok(serde_json::from_str(text)?)
    }
}

/// Map a non-success response to an error
fn error_from_response(status: StatusCode, body: &str) -> ApiError {
    let parsed: serde_json::Value = serde_json::from_str(body).unwrap_or_default();

    if status == StatusCode::UNAUTHORIZED && parsed["code"] == "TOKEN_EXPIRED" {
        return ApiError::TokenExpired;
    }

    let message = parsed["error"].as_str().map(str::to_string).unwrap_or_else(|| {
        format!("HTTP {}: {}", status.as_u16(), status.canonical_reason().unwrap_or(""))
    });

    ApiError::Api { status: status.as_u16(), message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::auth::StaticToken;

    fn test_config(base_url: String) -> Config {
        Config { api_base_url: base_url, retry_delay_ms: 0, ..Default::default() }
    }

    #[test]
    fn url_joins_paths_and_keeps_absolute_urls() {
        let config = test_config("http://lms.test/api/".into());
        let client = ApiClient::new(&config, StaticToken::default()).unwrap();
        assert_eq!(client.url("/courses"), "http://lms.test/api/courses");
        assert_eq!(client.url("courses/1"), "http://lms.test/api/courses/1");
        assert_eq!(client.url("https://cdn.test/x"), "https://cdn.test/x");
    }

    #[test]
    fn endpoint_encodes_each_segment() {
        let config = test_config("http://lms.test/api/".into());
        let client = ApiClient::new(&config, StaticToken::default()).unwrap();
        assert_eq!(client.endpoint(&["courses", "c1"]).unwrap(), "http://lms.test/api/courses/c1");
        assert_eq!(
            client.endpoint(&["courses", "a b/c?d", "students"]).unwrap(),
            "http://lms.test/api/courses/a%20b%2Fc%3Fd/students"
        );
    }

    #[test]
    fn endpoint_on_bare_host() {
        let config = test_config("http://lms.test".into());
        let client = ApiClient::new(&config, StaticToken::default()).unwrap();
        assert_eq!(client.endpoint(&["courses"]).unwrap(), "http://lms.test/courses");
    }

    #[test]
    fn endpoint_rejects_unparseable_base() {
        let config = test_config("not a url".into());
        let client = ApiClient::new(&config, StaticToken::default()).unwrap();
        assert!(matches!(client.endpoint(&["courses"]), Err(ApiError::InvalidUrl(_))));
    }

    #[test]
    fn error_body_message_is_used() {
        let err = error_from_response(StatusCode::BAD_REQUEST, r#"{"error":"Title required"}"#);
        assert!(matches!(err, ApiError::Api { status: 400, ref message } if message == "Title required"));
    }

    #[test]
    fn error_without_body_uses_status_line() {
        let err = error_from_response(StatusCode::NOT_FOUND, "");
        assert!(matches!(err, ApiError::Api { status: 404, ref message } if message == "HTTP 404: Not Found"));
    }

    #[test]
    fn expired_token_code_is_detected() {
        let err = error_from_response(StatusCode::UNAUTHORIZED, r#"{"code":"TOKEN_EXPIRED"}"#);
        assert!(matches!(err, ApiError::TokenExpired));
    }

    #[tokio::test]
    async fn sends_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/ping")
            .match_header("authorization", "Bearer secret")
            .with_status(200)
            .with_body(r#"{"ok":true}"#)
            .create_async()
            .await;

        let client =
            ApiClient::new(&test_config(server.url()), StaticToken(Some("secret".into()))).unwrap();
        let body: serde_json::Value = client.get("/ping").await.unwrap();

        assert_eq!(body["ok"], true);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn retries_server_errors_then_gives_up() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/flaky")
            .with_status(503)
            .expect(3)
            .create_async()
            .await;

        let client = ApiClient::new(&test_config(server.url()), StaticToken::default()).unwrap();
        let result: Result<serde_json::Value, _> = client.get("/flaky").await;

        assert!(matches!(result, Err(ApiError::Api { status: 503, .. })));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .with_body(r#"{"error":"Course not found"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = ApiClient::new(&test_config(server.url()), StaticToken::default()).unwrap();
        let result: Result<serde_json::Value, _> = client.get("/missing").await;

        assert!(matches!(result, Err(ApiError::Api { status: 404, .. })));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn empty_success_body_is_null() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server.mock("POST", "/noop").with_status(200).create_async().await;

        let client = ApiClient::new(&test_config(server.url()), StaticToken::default()).unwrap();
        let value: serde_json::Value = client.post("/noop", None::<&()>).await.unwrap();
        assert!(value.is_null());
    }
}
