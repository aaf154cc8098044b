//! Gemini provider (Generative Language API)
//!
//! The credential goes in the `key` query parameter and the model is part of
//! the path, so `api_url` is the API base. Gemini reports no usage record in
//! the shape the other backends do, so usage is always empty.

use crate::provider::{unexpected_envelope, Backend, ProviderSettings, TokenUsage};
use crate::transport::HttpRequest;
use slidecraft_core::Result;

pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";

pub fn default_settings() -> ProviderSettings {
    ProviderSettings {
        model: DEFAULT_GEMINI_MODEL.to_string(),
        max_tokens: 4000,
        temperature: 0.7,
        api_url: DEFAULT_GEMINI_URL.to_string(),
    }
}

pub fn format_request(settings: &ProviderSettings, api_key: &str, prompt: &str) -> HttpRequest {
    let body = serde_json::json!({
        "contents": [{
            "parts": [{ "text": prompt }]
        }],
        "generationConfig": {
            "temperature": settings.temperature,
            "maxOutputTokens": settings.max_tokens
        }
    });
    HttpRequest::new(
        format!("{}?key={}", endpoint(settings), api_key),
        body,
    )
}

/// `{base}/models/{model}:generateContent`
pub fn endpoint(settings: &ProviderSettings) -> String {
    format!(
        "{}/models/{}:generateContent",
        settings.api_url.trim_end_matches('/'),
        settings.model
    )
}

/// Answer at `candidates[0].content.parts[0].text`
pub fn parse_response(body: &serde_json::Value) -> Result<(String, TokenUsage)> {
    let text = body
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|arr| arr.first())
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(|parts| parts.as_array())
        .and_then(|arr| arr.first())
        .and_then(|part| part.get("text"))
        .and_then(|t| t.as_str())
        .ok_or_else(|| unexpected_envelope(Backend::Gemini, body))?;

    Ok((text.to_string(), TokenUsage::new()))
}
