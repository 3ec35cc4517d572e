//! HTTP client for the remote conversion service
//!
//! The service accepts a JSON body (see [`super::request`]) and answers
//! with a JSON-encoded string containing the converted output text. There
//! is no structured error body: anything other than a 2xx status with a
//! JSON string is treated as a failure here.

use crate::convert::request::ConversionRequest;
use crate::error::{Error, Result};
use log::debug;
use std::time::Duration;

/// Production conversion endpoint.
pub const DEFAULT_ENDPOINT: &str =
    "https://kvq58p5uqk.execute-api.eu-west-2.amazonaws.com/default/aims-roster-data-extraction";

/// Round-trip timeout for one conversion request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Blocking HTTP client for the conversion endpoint.
///
/// Runs on the worker thread, never on the UI thread.
#[derive(Debug, Clone)]
pub struct ConvertClient {
    endpoint: String,
    http: reqwest::blocking::Client,
}

impl ConvertClient {
    /// Create a client for the given endpoint URL.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.into(),
            http,
        })
    }

    /// The endpoint URL this client posts to.
    #[allow(dead_code)]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Post a conversion request and return the decoded output text.
    ///
    /// Distinguishes the three failure classes at this boundary:
    /// transport failure (`Network`), non-2xx status (`Service`), and a
    /// 2xx body that is not a JSON string (`MalformedResponse`).
    pub fn convert(&self, request: &ConversionRequest) -> Result<String> {
        debug!(
            "Posting {} roster bytes to {} (format: {})",
            request.roster.len(),
            self.endpoint,
            request.format.wire_name()
        );

        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Service {
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|e| Error::Network(e.to_string()))?;
        decode_response(&body)
    }
}

/// Decode the service's response envelope: a single JSON-encoded string.
pub fn decode_response(body: &str) -> Result<String> {
    serde_json::from_str::<String>(body).map_err(|e| Error::MalformedResponse(e.to_string()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
