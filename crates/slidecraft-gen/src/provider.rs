//! Provider adapters and generation result types

use serde::{Deserialize, Serialize};
use slidecraft_core::{Result, Slide, SlideCraftError, TopicAnalysis};
use std::fmt;
use std::sync::Arc;

use crate::parser::ResponseParser;
use crate::prompt;
use crate::providers::{claude, gemini, openai};
use crate::transport::{HttpRequest, Transport};

/// Usage record as reported by the backend; empty when it reports none
pub type TokenUsage = serde_json::Map<String, serde_json::Value>;

/// The LLM backends SlideCraft can talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Claude,
    OpenAi,
    Gemini,
}

impl Backend {
    pub const ALL: [Backend; 3] = [Backend::Claude, Backend::OpenAi, Backend::Gemini];

    /// Registry name (e.g. "claude", "openai")
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Claude => "claude",
            Backend::OpenAi => "openai",
            Backend::Gemini => "gemini",
        }
    }

    /// Parse a provider name, accepting a few common aliases
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "claude" | "anthropic" => Some(Backend::Claude),
            "openai" | "gpt" => Some(Backend::OpenAi),
            "gemini" | "google" => Some(Backend::Gemini),
            _ => None,
        }
    }

    /// Built-in model, limits and endpoint for this backend
    pub fn default_settings(&self) -> ProviderSettings {
        match self {
            Backend::Claude => claude::default_settings(),
            Backend::OpenAi => openai::default_settings(),
            Backend::Gemini => gemini::default_settings(),
        }
    }

    /// Build the backend-specific request for `prompt`
    pub fn format_request(
        &self,
        settings: &ProviderSettings,
        api_key: &str,
        prompt: &str,
    ) -> HttpRequest {
        match self {
            Backend::Claude => claude::format_request(settings, api_key, prompt),
            Backend::OpenAi => openai::format_request(settings, api_key, prompt),
            Backend::Gemini => gemini::format_request(settings, api_key, prompt),
        }
    }

    /// Pull the answer text and usage out of the backend's response envelope
    pub fn parse_response(&self, body: &serde_json::Value) -> Result<(String, TokenUsage)> {
        match self {
            Backend::Claude => claude::parse_response(body),
            Backend::OpenAi => openai::parse_response(body),
            Backend::Gemini => gemini::parse_response(body),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Claude => write!(f, "Claude"),
            Backend::OpenAi => write!(f, "OpenAI"),
            Backend::Gemini => write!(f, "Gemini"),
        }
    }
}

/// Model parameters and endpoint, fixed when an adapter is built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub api_url: String,
}

/// A successful generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedContent {
    /// Raw model text
    pub content: String,
    /// Parsed slides; filled in by the registry after the call
    #[serde(default)]
    pub slides: Vec<Slide>,
    pub provider: String,
    pub model: String,
    #[serde(default)]
    pub token_usage: TokenUsage,
    /// Set only when candidates are compared
    #[serde(default)]
    pub quality_score: Option<f64>,
}

/// A failed generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationFailure {
    pub error: String,
    pub provider: String,
}

/// Outcome of one adapter invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GenerationResult {
    Success(GeneratedContent),
    Failure(GenerationFailure),
}

impl GenerationResult {
    pub fn failure(provider: &str, error: impl Into<String>) -> Self {
        GenerationResult::Failure(GenerationFailure {
            error: error.into(),
            provider: provider.to_string(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, GenerationResult::Success(_))
    }

    pub fn provider(&self) -> &str {
        match self {
            GenerationResult::Success(c) => &c.provider,
            GenerationResult::Failure(f) => &f.provider,
        }
    }

    /// Slides of a successful result; empty for a failure
    pub fn slides(&self) -> &[Slide] {
        match self {
            GenerationResult::Success(c) => &c.slides,
            GenerationResult::Failure(_) => &[],
        }
    }
}

/// Status returned by a provider health check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderStatus {
    Available,
    NoApiKey,
}

/// One configured backend: credential, settings and the transport to call it with
pub struct ProviderAdapter {
    backend: Backend,
    api_key: String,
    settings: ProviderSettings,
    transport: Arc<dyn Transport>,
}

impl ProviderAdapter {
    pub fn new(
        backend: Backend,
        api_key: impl Into<String>,
        settings: ProviderSettings,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            backend,
            api_key: api_key.into(),
            settings,
            transport,
        }
    }

    /// Adapter with the backend's default settings
    pub fn with_defaults(
        backend: Backend,
        api_key: impl Into<String>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self::new(backend, api_key, backend.default_settings(), transport)
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    /// Check that a credential is present (no network I/O)
    pub fn health_check(&self) -> ProviderStatus {
        if self.api_key.trim().is_empty() {
            ProviderStatus::NoApiKey
        } else {
            ProviderStatus::Available
        }
    }

    /// Build the instruction sent to this backend
    pub fn format_prompt(&self, topic: &str, slide_count: usize, analysis: &TopicAnalysis) -> String {
        prompt::format_prompt(topic, slide_count, analysis)
    }

    /// Call the backend once. Failures are reported in the result, never raised.
    pub fn generate_content(&self, prompt: &str) -> GenerationResult {
        let provider = self.name();
        let request = self
            .backend
            .format_request(&self.settings, &self.api_key, prompt);

        log::debug!(
            "Calling {} ({}) at {}",
            self.backend,
            self.settings.model,
            redact_key(&request.url)
        );

        let response = match self.transport.post_json(&request) {
            Ok(response) => response,
            Err(e) => {
                return GenerationResult::failure(
                    provider,
                    format!("{} API request failed: {}", self.backend, e),
                );
            }
        };

        if !response.is_success() {
            return GenerationResult::failure(
                provider,
                format!("{} API error: {}", self.backend, response.status),
            );
        }

        let body: serde_json::Value = match serde_json::from_str(&response.body) {
            Ok(body) => body,
            Err(e) => {
                return GenerationResult::failure(
                    provider,
                    format!("Failed to parse {} response: {}", self.backend, e),
                );
            }
        };

        match self.backend.parse_response(&body) {
            Ok((content, token_usage)) => GenerationResult::Success(GeneratedContent {
                content,
                slides: Vec::new(),
                provider: provider.to_string(),
                model: self.settings.model.clone(),
                token_usage,
                quality_score: None,
            }),
            Err(e) => GenerationResult::failure(provider, e.to_string()),
        }
    }

    /// Structured-first, heuristic-fallback slide extraction
    pub fn extract_slides_from_response(&self, text: &str) -> Vec<Slide> {
        ResponseParser::parse(text)
    }
}

impl fmt::Debug for ProviderAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderAdapter")
            .field("backend", &self.backend)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Drop the query string so `?key=...` never reaches the logs
fn redact_key(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

/// Helper for backends: a malformed envelope
pub(crate) fn unexpected_envelope(backend: Backend, body: &serde_json::Value) -> SlideCraftError {
    SlideCraftError::GenerationError(format!(
        "Unexpected {} response format: {}",
        backend,
        serde_json::to_string(body).unwrap_or_default()
    ))
}

/// Helper for backends: the `usage` object, or an empty record
pub(crate) fn usage_from(body: &serde_json::Value) -> TokenUsage {
    body.get("usage")
        .and_then(|u| u.as_object())
        .cloned()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mock::MockTransport;
    use crate::transport::HttpResponse;

    struct FailingTransport;

    impl Transport for FailingTransport {
        fn post_json(&self, _request: &HttpRequest) -> Result<HttpResponse> {
            Err(SlideCraftError::TransportError("connection failed".to_string()))
        }
    }

    #[test]
    fn test_backend_names_round_trip() {
        for backend in Backend::ALL {
            assert_eq!(Backend::from_name(backend.name()), Some(backend));
        }
        assert_eq!(Backend::from_name("GPT"), Some(Backend::OpenAi));
        assert_eq!(Backend::from_name("mistral"), None);
    }

    #[test]
    fn test_success_result() {
        let transport = Arc::new(MockTransport::replying(Backend::Claude, "Hello deck"));
        let adapter = ProviderAdapter::with_defaults(Backend::Claude, "sk-test", transport.clone());

        match adapter.generate_content("make slides") {
            GenerationResult::Success(content) => {
                assert_eq!(content.content, "Hello deck");
                assert_eq!(content.provider, "claude");
                assert_eq!(content.model, "claude-3-5-sonnet-20241022");
                assert!(content.slides.is_empty());
                assert!(content.quality_score.is_none());
            }
            other => panic!("expected success, got {:?}", other),
        }
        assert_eq!(transport.call_count(), 1);
    }

    #[test]
    fn test_http_error_status() {
        let transport = Arc::new(MockTransport::with_status(Backend::OpenAi, 429));
        let adapter = ProviderAdapter::with_defaults(Backend::OpenAi, "sk-test", transport);

        let result = adapter.generate_content("make slides");
        assert_eq!(
            result,
            GenerationResult::failure("openai", "OpenAI API error: 429")
        );
    }

    #[test]
    fn test_transport_error_becomes_failure() {
        let adapter =
            ProviderAdapter::with_defaults(Backend::Gemini, "key", Arc::new(FailingTransport));
        match adapter.generate_content("make slides") {
            GenerationResult::Failure(f) => {
                assert_eq!(f.provider, "gemini");
                assert!(f.error.contains("connection failed"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_envelope_becomes_failure() {
        let transport = Arc::new(MockTransport::raw(200, r#"{"unexpected": true}"#));
        let adapter = ProviderAdapter::with_defaults(Backend::Claude, "sk-test", transport);
        let result = adapter.generate_content("make slides");
        assert!(!result.is_success());
        assert!(result.slides().is_empty());
    }

    #[test]
    fn test_non_json_body_becomes_failure() {
        let transport = Arc::new(MockTransport::raw(200, "<html>gateway</html>"));
        let adapter = ProviderAdapter::with_defaults(Backend::OpenAi, "sk-test", transport);
        match adapter.generate_content("make slides") {
            GenerationResult::Failure(f) => assert!(f.error.starts_with("Failed to parse OpenAI")),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_adapter_prompt_matches_shared_prompt() {
        let analysis = TopicAnalysis {
            category: "technology".to_string(),
            template: "dark".to_string(),
            color: "tech".to_string(),
        };
        for backend in Backend::ALL {
            let adapter = ProviderAdapter::with_defaults(
                backend,
                "key",
                Arc::new(MockTransport::replying(backend, "")),
            );
            assert_eq!(
                adapter.format_prompt("AI roadmap", 7, &analysis),
                prompt::format_prompt("AI roadmap", 7, &analysis)
            );
        }
    }

    #[test]
    fn test_health_check() {
        let transport = Arc::new(MockTransport::replying(Backend::Claude, ""));
        let with_key = ProviderAdapter::with_defaults(Backend::Claude, "sk", transport.clone());
        let without_key = ProviderAdapter::with_defaults(Backend::Claude, " ", transport);
        assert_eq!(with_key.health_check(), ProviderStatus::Available);
        assert_eq!(without_key.health_check(), ProviderStatus::NoApiKey);
    }

    #[test]
    fn test_result_serializes_with_status_tag() {
        let json = serde_json::to_value(GenerationResult::failure("claude", "boom")).unwrap();
        assert_eq!(json["status"], "failure");
        assert_eq!(json["error"], "boom");
    }

    #[test]
    fn test_redact_key() {
        assert_eq!(
            redact_key("https://example.com/models/x:generateContent?key=secret"),
            "https://example.com/models/x:generateContent"
        );
    }
}
