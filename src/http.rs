//! HTTP fetch boundary
//!
//! All network access goes through the [`HttpGet`] seam so that parsing and
//! resolution logic can be exercised against canned responses in tests. The
//! production implementation is a blocking reqwest client with a fixed
//! descriptive user-agent and a uniform connection timeout.

use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// User-agent sent with every request.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 6.1; rv:25.0) Gecko/20100101 Firefox/25.0";

/// Uniform timeout applied to every request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur at the HTTP boundary
#[derive(Debug, Error)]
pub enum HttpError {
    /// The HTTP client could not be initialized
    #[error("Failed to initialize HTTP client: {0}")]
    ClientInit(String),

    /// The request could not be completed
    #[error("Request to {url} failed: {reason}")]
    RequestFailed { url: String, reason: String },

    /// The server answered with a non-success status
    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The response body was not valid JSON
    #[error("Response from {url} is not valid JSON: {reason}")]
    InvalidJson { url: String, reason: String },
}

/// Blocking GET access to text and JSON resources.
pub(crate) trait HttpGet {
    /// Fetches `url` and returns the response body as text.
    fn get_text(&self, url: &str) -> Result<String, HttpError>;

    /// Fetches `url` and decodes the response body as JSON.
    fn get_json(&self, url: &str) -> Result<Value, HttpError> {
        let body = self.get_text(url)?;
        serde_json::from_str(&body).map_err(|e| HttpError::InvalidJson {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Production client used by the catalog generator.
pub(crate) struct AgentClient {
    client: reqwest::blocking::Client,
}

impl AgentClient {
    pub fn new() -> Result<Self, HttpError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| HttpError::ClientInit(e.to_string()))?;
        Ok(Self { client })
    }
}

impl HttpGet for AgentClient {
    fn get_text(&self, url: &str) -> Result<String, HttpError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| HttpError::RequestFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(HttpError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        response.text().map_err(|e| HttpError::RequestFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}
