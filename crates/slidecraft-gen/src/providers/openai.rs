//! OpenAI provider (Chat Completions API)

use crate::prompt::SYSTEM_INSTRUCTION;
use crate::provider::{unexpected_envelope, usage_from, Backend, ProviderSettings, TokenUsage};
use crate::transport::HttpRequest;
use slidecraft_core::Result;

pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4-turbo-preview";

pub fn default_settings() -> ProviderSettings {
    ProviderSettings {
        model: DEFAULT_OPENAI_MODEL.to_string(),
        max_tokens: 4000,
        temperature: 0.7,
        api_url: DEFAULT_OPENAI_URL.to_string(),
    }
}

pub fn format_request(settings: &ProviderSettings, api_key: &str, prompt: &str) -> HttpRequest {
    let body = serde_json::json!({
        "model": settings.model,
        "messages": [
            { "role": "system", "content": SYSTEM_INSTRUCTION },
            { "role": "user", "content": prompt }
        ],
        "max_tokens": settings.max_tokens,
        "temperature": settings.temperature
    });
    HttpRequest::new(&settings.api_url, body)
        .with_header("Authorization", format!("Bearer {}", api_key))
}

/// Answer at `choices[0].message.content`, usage at `usage`
pub fn parse_response(body: &serde_json::Value) -> Result<(String, TokenUsage)> {
    let text = body
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|arr| arr.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|t| t.as_str())
        .ok_or_else(|| unexpected_envelope(Backend::OpenAi, body))?;

    Ok((text.to_string(), usage_from(body)))
}
