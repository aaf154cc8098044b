//! Provider registry
//!
//! Maps provider names to configured adapters.

pub mod claude;
pub mod gemini;
pub mod mock;
pub mod openai;

use crate::config::SlideCraftConfig;
use crate::provider::{Backend, ProviderAdapter};
use crate::registry::ProviderRegistry;
use crate::transport::Transport;
use slidecraft_core::{Result, SlideCraftError};
use std::sync::Arc;

/// Create an adapter by name from configuration
pub fn create_provider(
    name: &str,
    config: &SlideCraftConfig,
    transport: Arc<dyn Transport>,
) -> Result<ProviderAdapter> {
    let backend =
        Backend::from_name(name).ok_or_else(|| SlideCraftError::ProviderNotFound(name.to_string()))?;

    let api_key = config.api_key(backend.name()).ok_or_else(|| {
        SlideCraftError::ConfigError(format!(
            "{} API key not configured. Set SLIDECRAFT_{}_API_KEY or add to .slidecraft/config.toml",
            backend,
            backend.name().to_uppercase()
        ))
    })?;

    Ok(ProviderAdapter::new(
        backend,
        api_key,
        config.provider_settings(backend),
        transport,
    ))
}

/// List all available provider names
pub fn available_providers() -> Vec<&'static str> {
    Backend::ALL.iter().map(|b| b.name()).collect()
}

/// Register every enabled provider that has a key
pub fn build_registry(config: &SlideCraftConfig, transport: Arc<dyn Transport>) -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();
    for name in config.configured_providers() {
        match create_provider(name, config, transport.clone()) {
            Ok(adapter) => registry.register_provider(name, adapter),
            Err(e) => log::warn!("Skipping provider {}: {}", name, e),
        }
    }
    log::debug!("Registered providers: {:?}", registry.provider_names());
    registry
}
