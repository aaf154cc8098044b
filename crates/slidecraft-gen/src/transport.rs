//! HTTP transport used by provider adapters
//!
//! Adapters build an [`HttpRequest`] and hand it to a [`Transport`]. The
//! production transport is a blocking `ureq` agent with a global per-call
//! timeout, so a hung backend cannot stall a sequential best-of-N scan.

use slidecraft_core::{Result, SlideCraftError};
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// A JSON POST request, fully built by a backend
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: serde_json::Value,
}

impl HttpRequest {
    pub fn new(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            url: url.into(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Look up a header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status code and raw body of a response
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues requests on behalf of adapters.
///
/// Non-2xx statuses are returned as responses, not errors; `Err` is reserved
/// for failures where no response arrived (DNS, connect, timeout).
pub trait Transport: Send + Sync {
    fn post_json(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

/// Blocking HTTP transport backed by `ureq`
pub struct UreqTransport {
    agent: ureq::Agent,
    timeout: Duration,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();
        Self {
            agent: config.into(),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

impl Transport for UreqTransport {
    fn post_json(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let mut builder = self.agent.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let mut response = builder
            .send_json(&request.body)
            .map_err(|e| SlideCraftError::TransportError(describe_ureq_error(&e)))?;

        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().map_err(|e| {
            SlideCraftError::TransportError(format!("Failed to read response body: {}", e))
        })?;

        Ok(HttpResponse { status, body })
    }
}

fn describe_ureq_error(e: &ureq::Error) -> String {
    match e {
        ureq::Error::Timeout(_) => format!("request timed out: {}", e),
        ureq::Error::HostNotFound => "host not found".to_string(),
        ureq::Error::ConnectionFailed => "connection failed".to_string(),
        _ => format!("request failed: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_to_json_content_type() {
        let request = HttpRequest::new("https://example.com", serde_json::json!({}));
        assert_eq!(request.header("content-type"), Some("application/json"));
    }

    #[test]
    fn test_request_header_lookup() {
        let request = HttpRequest::new("https://example.com", serde_json::json!({}))
            .with_header("Authorization", "Bearer sk-test");
        assert_eq!(request.header("authorization"), Some("Bearer sk-test"));
        assert_eq!(request.header("x-api-key"), None);
    }

    #[test]
    fn test_response_success_range() {
        let ok = HttpResponse { status: 200, body: String::new() };
        let created = HttpResponse { status: 201, body: String::new() };
        let limited = HttpResponse { status: 429, body: String::new() };
        assert!(ok.is_success());
        assert!(created.is_success());
        assert!(!limited.is_success());
    }

    #[test]
    fn test_ureq_transport_timeout() {
        let transport = UreqTransport::new(Duration::from_secs(5));
        assert_eq!(transport.timeout(), Duration::from_secs(5));
        assert_eq!(
            UreqTransport::default().timeout(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
    }
}
