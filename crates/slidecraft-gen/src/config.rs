//! Layered configuration system
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `SLIDECRAFT_{PROVIDER}_API_KEY`
//! 2. Project-local: `.slidecraft/config.toml`
//! 3. Global: `~/.slidecraft/config.toml`

use crate::provider::{Backend, ProviderSettings};
use crate::transport::DEFAULT_TIMEOUT_SECS;
use serde::{Deserialize, Serialize};
use slidecraft_core::{Result, SlideCraftError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Provider-specific configuration; unset fields fall back to backend defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

/// Generation defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_provider")]
    pub default_provider: String,
    #[serde(default = "default_slide_count")]
    pub slide_count: usize,
    /// Per-call HTTP timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Compare every configured provider and keep the best deck
    #[serde(default)]
    pub compare: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            slide_count: default_slide_count(),
            timeout_secs: default_timeout_secs(),
            compare: false,
        }
    }
}

fn default_provider() -> String {
    "claude".to_string()
}
fn default_slide_count() -> usize {
    5
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlideCraftConfigFile {
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    #[serde(default)]
    pub generation: GenerationConfig,
}

/// Resolved configuration with environment variable overrides applied
#[derive(Debug, Clone, Default)]
pub struct SlideCraftConfig {
    pub providers: HashMap<String, ProviderConfig>,
    pub generation: GenerationConfig,
}

impl SlideCraftConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut config = SlideCraftConfigFile::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                Self::merge_into(&mut config, global);
            }
        }

        let local_path = PathBuf::from(".slidecraft/config.toml");
        if local_path.exists() {
            let local = Self::load_file(&local_path)?;
            Self::merge_into(&mut config, local);
        }

        Self::apply_env_overrides(&mut config);
        log::debug!(
            "Loaded config with {} provider entries",
            config.providers.len()
        );

        Ok(SlideCraftConfig {
            providers: config.providers,
            generation: config.generation,
        })
    }

    /// Load config from a specific file path only (for testing)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = Self::load_file(path)?;
        Self::apply_env_overrides(&mut config);
        Ok(SlideCraftConfig {
            providers: config.providers,
            generation: config.generation,
        })
    }

    /// Get API key for a provider
    pub fn api_key(&self, provider_name: &str) -> Option<&str> {
        self.providers
            .get(provider_name)
            .and_then(|p| p.api_key.as_deref())
            .filter(|k| !k.trim().is_empty())
    }

    /// Get API URL override for a provider
    pub fn api_url(&self, provider_name: &str) -> Option<&str> {
        self.providers
            .get(provider_name)
            .and_then(|p| p.api_url.as_deref())
    }

    /// Check if a provider is enabled
    pub fn is_enabled(&self, provider_name: &str) -> bool {
        self.providers
            .get(provider_name)
            .map(|p| p.enabled)
            .unwrap_or(true)
    }

    /// Backend defaults with any configured overrides applied
    pub fn provider_settings(&self, backend: Backend) -> ProviderSettings {
        let mut settings = backend.default_settings();
        if let Some(p) = self.providers.get(backend.name()) {
            if let Some(url) = &p.api_url {
                settings.api_url = url.clone();
            }
            if let Some(model) = &p.model {
                settings.model = model.clone();
            }
            if let Some(max_tokens) = p.max_tokens {
                settings.max_tokens = max_tokens;
            }
            if let Some(temperature) = p.temperature {
                settings.temperature = temperature;
            }
        }
        settings
    }

    /// Enabled providers that have a key, in the order claude, openai, gemini
    pub fn configured_providers(&self) -> Vec<&'static str> {
        Backend::ALL
            .iter()
            .map(|b| b.name())
            .filter(|name| self.is_enabled(name) && self.api_key(name).is_some())
            .collect()
    }

    pub fn default_provider(&self) -> &str {
        &self.generation.default_provider
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.generation.timeout_secs)
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".slidecraft").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<SlideCraftConfigFile> {
        let content = std::fs::read_to_string(path)?;
        let config: SlideCraftConfigFile = toml::from_str(&content).map_err(|e| {
            SlideCraftError::ConfigError(format!(
                "Failed to parse config {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(config)
    }

    fn merge_into(base: &mut SlideCraftConfigFile, overlay: SlideCraftConfigFile) {
        for (name, provider) in overlay.providers {
            let entry = base.providers.entry(name).or_default();
            if provider.api_key.is_some() {
                entry.api_key = provider.api_key;
            }
            if provider.api_url.is_some() {
                entry.api_url = provider.api_url;
            }
            if provider.model.is_some() {
                entry.model = provider.model;
            }
            if provider.max_tokens.is_some() {
                entry.max_tokens = provider.max_tokens;
            }
            if provider.temperature.is_some() {
                entry.temperature = provider.temperature;
            }
            entry.enabled = provider.enabled;
        }

        if overlay.generation.default_provider != default_provider() {
            base.generation.default_provider = overlay.generation.default_provider;
        }
        if overlay.generation.slide_count != default_slide_count() {
            base.generation.slide_count = overlay.generation.slide_count;
        }
        if overlay.generation.timeout_secs != default_timeout_secs() {
            base.generation.timeout_secs = overlay.generation.timeout_secs;
        }
        if overlay.generation.compare {
            base.generation.compare = true;
        }
    }

    fn apply_env_overrides(config: &mut SlideCraftConfigFile) {
        for backend in Backend::ALL {
            let env_key = format!("SLIDECRAFT_{}_API_KEY", backend.name().to_uppercase());
            if let Ok(key) = std::env::var(&env_key) {
                let entry = config.providers.entry(backend.name().to_string()).or_default();
                entry.api_key = Some(key);
            }
        }
    }
}
