//! Claude provider (Anthropic Messages API via proxy)
//!
//! Requests go to a local proxy that forwards them to Anthropic, so the
//! credential travels in the request body as `api_key` rather than a header.

use crate::prompt::SYSTEM_INSTRUCTION;
use crate::provider::{unexpected_envelope, usage_from, Backend, ProviderSettings, TokenUsage};
use crate::transport::HttpRequest;
use slidecraft_core::Result;

pub const DEFAULT_CLAUDE_URL: &str = "http://localhost:8000/api/claude";
pub const DEFAULT_CLAUDE_MODEL: &str = "claude-3-5-sonnet-20241022";

pub fn default_settings() -> ProviderSettings {
    ProviderSettings {
        model: DEFAULT_CLAUDE_MODEL.to_string(),
        max_tokens: 4000,
        temperature: 0.7,
        api_url: DEFAULT_CLAUDE_URL.to_string(),
    }
}

pub fn format_request(settings: &ProviderSettings, api_key: &str, prompt: &str) -> HttpRequest {
    let body = serde_json::json!({
        "model": settings.model,
        "max_tokens": settings.max_tokens,
        "temperature": settings.temperature,
        "system": SYSTEM_INSTRUCTION,
        "messages": [
            { "role": "user", "content": prompt }
        ],
        "api_key": api_key
    });
    HttpRequest::new(&settings.api_url, body)
}

/// Answer at `content[0].text`, usage at `usage`
pub fn parse_response(body: &serde_json::Value) -> Result<(String, TokenUsage)> {
    let text = body
        .get("content")
        .and_then(|c| c.as_array())
        .and_then(|arr| arr.first())
        .and_then(|block| block.get("text"))
        .and_then(|t| t.as_str())
        .ok_or_else(|| unexpected_envelope(Backend::Claude, body))?;

    Ok((text.to_string(), usage_from(body)))
}
