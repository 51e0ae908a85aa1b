//! HTTP transport for the finance backend
//!
//! [`HttpClient`] owns the `reqwest` client, the configuration and the
//! client-side rate limiter. All calls are authenticated with the caller's
//! bearer token; nothing is retried.

use crate::application::auth::BearerToken;
use crate::application::config::Config;
use crate::application::rate_limiter::RateLimiter;
use crate::constants::{REQUEST_ID_HEADER, USER_AGENT};
use crate::error::AppError;
use crate::utils::id::request_id;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

/// Authenticated HTTP client for the finance backend
pub struct HttpClient {
    http_client: Client,
    config: Arc<Config>,
    rate_limiter: RateLimiter,
}

impl HttpClient {
    /// Creates a new client
    ///
    /// # Arguments
    /// * `config` - Configuration containing the base URL, timeout and rate limits
    ///
    /// # Returns
    /// * `Ok(HttpClient)` - Client ready to use
    /// * `Err(AppError)` - If the underlying HTTP client cannot be built
    pub fn new(config: Config) -> Result<Self, AppError> {
        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.rest_api.timeout))
            .build()?;
        let rate_limiter = RateLimiter::new(&config.rate_limiter);

        Ok(Self {
            http_client,
            config: Arc::new(config),
            rate_limiter,
        })
    }

    /// Returns the configuration in use
    #[must_use]
    pub fn config(&self) -> Arc<Config> {
        self.config.clone()
    }

    /// Makes a GET request
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &BearerToken,
    ) -> Result<T, AppError> {
        self.request(Method::GET, path, token, None::<()>).await
    }

    /// Makes a POST request
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        token: &BearerToken,
        body: B,
    ) -> Result<T, AppError> {
        self.request(Method::POST, path, token, Some(body)).await
    }

    /// Makes a request whose response body is not needed
    pub async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        token: &BearerToken,
        body: Option<B>,
    ) -> Result<(), AppError> {
        let response = self.request_internal(method, path, token, &body).await?;
        let status = response.status();
        debug!("Ignoring response body for status {}", status);
        Ok(())
    }

    /// Makes a request and deserializes the JSON response
    pub async fn request<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        token: &BearerToken,
        body: Option<B>,
    ) -> Result<T, AppError> {
        let response = self.request_internal(method, path, token, &body).await?;
        parse_response(response).await
    }

    async fn request_internal<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        token: &BearerToken,
        body: &Option<B>,
    ) -> Result<Response, AppError> {
        let url = self.config.url_for(path);
        make_http_request(
            &self.http_client,
            &self.rate_limiter,
            method,
            &url,
            token,
            body,
        )
        .await
    }
}

/// Makes an authenticated HTTP request with client-side rate limiting
///
/// Non-success statuses are turned into [`AppError::Http`] carrying the most
/// useful message found in the response body.
pub async fn make_http_request<B: Serialize>(
    client: &Client,
    rate_limiter: &RateLimiter,
    method: Method,
    url: &str,
    token: &BearerToken,
    body: &Option<B>,
) -> Result<Response, AppError> {
    rate_limiter.wait().await;

    let request_id = request_id();
    debug!("{} {} [{}]", method, url, request_id);

    let mut request = client
        .request(method.clone(), url)
        .header(AUTHORIZATION, token.header_value())
        .header(ACCEPT, "application/json")
        .header(REQUEST_ID_HEADER, request_id.as_str());

    if let Some(b) = body {
        request = request.header(CONTENT_TYPE, "application/json").json(b);
    }

    let response = request.send().await?;
    let status = response.status();
    debug!("Response status: {} [{}]", status, request_id);

    if status.is_success() {
        return Ok(response);
    }

    let body_text = response.text().await.unwrap_or_default();
    error!(
        "{} {} failed with status {}: {}",
        method, url, status, body_text
    );
    Err(AppError::Http {
        status,
        message: error_message(status, &body_text),
    })
}

/// Extracts a human readable message from an error response
///
/// Order of preference: the FastAPI `detail` field (string, or the `msg` of
/// validation entries), the `message`/`error` fields, the trimmed body text,
/// the canonical status reason and finally `HTTP <code>`.
#[must_use]
pub fn error_message(status: StatusCode, body: &str) -> String {
    let trimmed = body.trim();
    if let Ok(json) = serde_json::from_str::<Value>(trimmed) {
        if let Some(message) = message_from_json(&json) {
            return message;
        }
    }
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    match status.canonical_reason() {
        Some(reason) => reason.to_string(),
        None => format!("HTTP {}", status.as_u16()),
    }
}

fn message_from_json(json: &Value) -> Option<String> {
    match json.get("detail") {
        Some(Value::String(detail)) if !detail.is_empty() => return Some(detail.clone()),
        Some(Value::Array(entries)) => {
            let messages: Vec<&str> = entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                .collect();
            if !messages.is_empty() {
                return Some(messages.join("; "));
            }
        }
        _ => {}
    }
    ["message", "error"]
        .iter()
        .find_map(|key| json.get(*key).and_then(Value::as_str))
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| {
        debug!("Unparseable response body: {}", text);
        AppError::Json(e)
    })
}
