/*
[INPUT]:  HTTP configuration (base URL, timeouts, bearer token)
[OUTPUT]: Configured reqwest client ready for task API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, RETRY_AFTER};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::http::{Result, TaskApiError};

/// Default base URL for the task API
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Credentials for authenticated requests
#[derive(Debug, Clone)]
pub struct Credentials {
    pub token: String,
}

/// HTTP client for the task API
#[derive(Debug)]
pub struct TaskClient {
    http_client: Client,
    base_url: Url,
    credentials: Option<Credentials>,
}

impl TaskClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_config_and_base_url(config, DEFAULT_BASE_URL)
    }

    /// Create a new client against a custom base URL (self-hosted API, mock servers)
    pub fn with_config_and_base_url(config: ClientConfig, base_url: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: normalize_base_url(base_url)?,
            credentials: None,
        })
    }

    /// Set credentials for authenticated requests
    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = Some(credentials);
    }

    /// Get credentials if set
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a request builder for an endpoint relative to the base URL.
    /// Attaches the bearer token when credentials are set.
    pub(crate) fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.base_url.join(endpoint.trim_start_matches('/'))?;
        let builder = self.http_client.request(method, url);
        Ok(match &self.credentials {
            Some(credentials) => {
                builder.header(AUTHORIZATION, format!("Bearer {}", credentials.token))
            }
            None => builder,
        })
    }

    /// Send a request and decode a JSON body, mapping non-success statuses
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "task api response");

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let message = response.text().await.unwrap_or_default();
            return Err(TaskApiError::Authentication {
                message: non_empty_or(message, status),
            });
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse::<u64>().ok())
                .unwrap_or(1);
            return Err(TaskApiError::RateLimit { retry_after });
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TaskApiError::api_error(status, non_empty_or(message, status)));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// `Url::join` drops the last path segment unless the base ends with '/'.
fn normalize_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn non_empty_or(message: String, status: StatusCode) -> String {
    if message.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let url = normalize_base_url("http://localhost:8080/api/v1").expect("url");
        assert_eq!(url.as_str(), "http://localhost:8080/api/v1/");
        assert_eq!(url.join("tasks").expect("join").as_str(), "http://localhost:8080/api/v1/tasks");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = TaskClient::with_config_and_base_url(ClientConfig::default(), "not a url")
            .expect_err("should fail");
        assert!(matches!(err, TaskApiError::UrlParse(_)));
    }
}
