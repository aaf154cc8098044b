//! Mock transport for testing and offline runs
//!
//! Answers every request with a canned, backend-shaped response envelope
//! without any network calls, and records the requests it receives.

use crate::provider::Backend;
use crate::transport::{HttpRequest, HttpResponse, Transport};
use slidecraft_core::{Result, Slide};
use std::sync::Mutex;

/// A transport that replies with a fixed response
pub struct MockTransport {
    status: u16,
    body: String,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    /// Reply with `status` and a raw body
    pub fn raw(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Reply 200 with `text` wrapped in `backend`'s response envelope
    pub fn replying(backend: Backend, text: &str) -> Self {
        Self::raw(200, envelope(backend, text).to_string())
    }

    /// Reply 200 with `slides` as a JSON array inside a short preamble
    pub fn with_slides(backend: Backend, slides: &[Slide]) -> Self {
        let array = serde_json::to_string_pretty(slides).unwrap_or_else(|_| "[]".to_string());
        let text = format!("Here is the presentation you asked for:\n{}\n", array);
        Self::replying(backend, &text)
    }

    /// Reply with an error status and an error body in `backend`'s style
    pub fn with_status(backend: Backend, status: u16) -> Self {
        let body = serde_json::json!({
            "error": { "message": format!("mock {} error", backend.name()), "code": status }
        });
        Self::raw(status, body.to_string())
    }

    /// Number of requests received so far
    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// Copies of the requests received so far
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl Transport for MockTransport {
    fn post_json(&self, request: &HttpRequest) -> Result<HttpResponse> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        Ok(HttpResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

/// A minimal successful response envelope carrying `text` for `backend`
pub fn envelope(backend: Backend, text: &str) -> serde_json::Value {
    match backend {
        Backend::Claude => serde_json::json!({
            "type": "message",
            "role": "assistant",
            "content": [{ "type": "text", "text": text }],
            "usage": { "input_tokens": 0, "output_tokens": 0 }
        }),
        Backend::OpenAi => serde_json::json!({
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": text },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 0, "completion_tokens": 0, "total_tokens": 0 }
        }),
        Backend::Gemini => serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": text }], "role": "model" },
                "finishReason": "STOP"
            }]
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelopes_parse_with_their_backend() {
        for backend in Backend::ALL {
            let (text, _) = backend
                .parse_response(&envelope(backend, "round trip"))
                .unwrap();
            assert_eq!(text, "round trip");
        }
    }

    #[test]
    fn test_records_requests() {
        let transport = MockTransport::replying(Backend::Claude, "hi");
        assert_eq!(transport.call_count(), 0);

        let request = HttpRequest::new("http://mock", serde_json::json!({"n": 1}));
        let response = transport.post_json(&request).unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(transport.call_count(), 1);
        assert_eq!(transport.requests()[0], request);
    }

    #[test]
    fn test_with_slides_embeds_json_array() {
        let slides = vec![Slide::new("One", "a\nb"), Slide::new("Two", "c")];
        let transport = MockTransport::with_slides(Backend::OpenAi, &slides);
        let request = HttpRequest::new("http://mock", serde_json::json!({}));
        let response = transport.post_json(&request).unwrap();

        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        let (text, _) = Backend::OpenAi.parse_response(&body).unwrap();
        assert_eq!(crate::parser::ResponseParser::parse(&text), slides);
    }

    #[test]
    fn test_with_status() {
        let transport = MockTransport::with_status(Backend::Gemini, 503);
        let request = HttpRequest::new("http://mock", serde_json::json!({}));
        let response = transport.post_json(&request).unwrap();
        assert_eq!(response.status, 503);
        assert!(!response.is_success());
    }
}
