//! Generate command

use anyhow::{Context, Result};
use slidecraft_core::GenerationRequest;
use slidecraft_gen::providers::{build_registry, create_provider, mock::MockTransport};
use slidecraft_gen::{
    generate_fallback_slides, generate_presentation, Backend, ProviderAdapter, ProviderRegistry,
    SlideCraftConfig, Transport, UreqTransport,
};
use std::path::Path;
use std::sync::Arc;

pub struct GenerateArgs {
    pub topic: String,
    pub slides: Option<usize>,
    pub audience: Option<String>,
    pub duration: Option<String>,
    pub provider: Option<String>,
    pub compare: bool,
    pub providers: Option<String>,
    pub output: Option<String>,
    pub mock: bool,
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let config = SlideCraftConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config: {}", e);
        SlideCraftConfig::default()
    });

    let slide_count = args.slides.unwrap_or(config.generation.slide_count);
    let compare = args.compare || config.generation.compare;

    let names: Vec<String> = if compare {
        match args.providers.as_deref() {
            Some(list) => list
                .split(',')
                .map(|s| canonical_name(s.trim()))
                .collect::<Result<Vec<String>>>()?,
            None if args.mock => Backend::ALL.iter().map(|b| b.name().to_string()).collect(),
            None => config
                .configured_providers()
                .into_iter()
                .map(String::from)
                .collect(),
        }
    } else {
        let name = args
            .provider
            .as_deref()
            .unwrap_or_else(|| config.default_provider());
        vec![canonical_name(name)?]
    };

    if names.is_empty() {
        anyhow::bail!(
            "No providers configured. Set SLIDECRAFT_CLAUDE_API_KEY, SLIDECRAFT_OPENAI_API_KEY or SLIDECRAFT_GEMINI_API_KEY, or use --mock"
        );
    }

    let registry = if args.mock {
        mock_registry(&args.topic, slide_count, &names)?
    } else {
        let transport: Arc<dyn Transport> = Arc::new(UreqTransport::new(config.timeout()));
        if compare {
            build_registry(&config, transport)
        } else {
            single_registry(&names[0], &config, transport)
        }
    };

    let mut request = GenerationRequest::new(args.topic, slide_count)?
        .with_providers(names.iter().cloned())
        .with_compare(compare);
    if let Some(audience) = args.audience {
        request = request.with_audience(audience);
    }
    if let Some(duration) = args.duration {
        request = request.with_duration(duration);
    }

    if compare {
        println!("Comparing {}...", names.join(", "));
    } else {
        println!("Generating {} slides via {}...", slide_count, names[0]);
    }

    let presentation = generate_presentation(&registry, &request)?;

    if presentation.used_fallback {
        println!("  All providers failed; using placeholder deck");
    } else if let Some(score) = presentation.quality_score {
        println!(
            "  Best result from {} (quality score {:.2})",
            presentation.provider, score
        );
    }
    println!(
        "  Template: {} ({})",
        presentation.analysis.template, presentation.analysis.category
    );
    println!();

    for (i, slide) in presentation.slides.iter().enumerate() {
        println!("{}. {}", i + 1, slide.title);
        for point in slide.points() {
            println!("   {}", point);
        }
    }

    if let Some(output) = args.output {
        presentation
            .save_json(Path::new(&output))
            .with_context(|| format!("Failed to write {}", output))?;
        println!("\nSaved: {}", output);
    }

    Ok(())
}

fn canonical_name(name: &str) -> Result<String> {
    Backend::from_name(name)
        .map(|b| b.name().to_string())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown provider '{}'. Available: {}",
                name,
                slidecraft_gen::providers::available_providers().join(", ")
            )
        })
}

/// Registry holding `name` if it can be built; an unavailable provider
/// leaves it empty so generation falls back to the placeholder deck
fn single_registry(
    name: &str,
    config: &SlideCraftConfig,
    transport: Arc<dyn Transport>,
) -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();
    match create_provider(name, config, transport) {
        Ok(adapter) => registry.register_provider(name, adapter),
        Err(e) => eprintln!("Warning: {}", e),
    }
    registry
}

/// Registry whose adapters answer with a canned outline, no network
fn mock_registry(topic: &str, slide_count: usize, names: &[String]) -> Result<ProviderRegistry> {
    let slides = generate_fallback_slides(topic, slide_count);
    let mut registry = ProviderRegistry::new();
    for name in names {
        let backend = Backend::from_name(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown provider '{}'", name))?;
        let transport = Arc::new(MockTransport::with_slides(backend, &slides));
        registry.register_provider(
            name.clone(),
            ProviderAdapter::with_defaults(backend, "mock-key", transport),
        );
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidecraft_gen::config::ProviderConfig;

    fn transport() -> Arc<dyn Transport> {
        Arc::new(MockTransport::with_slides(
            Backend::Claude,
            &generate_fallback_slides("Offline", 3),
        ))
    }

    #[test]
    fn test_missing_key_falls_back_to_placeholder_deck() {
        let config = SlideCraftConfig::default();
        let registry = single_registry("claude", &config, transport());
        assert!(registry.is_empty());

        let request = GenerationRequest::new("Quarterly planning", 4)
            .unwrap()
            .with_providers(["claude"]);
        let presentation = generate_presentation(&registry, &request).unwrap();
        assert!(presentation.used_fallback);
        assert_eq!(presentation.slides.len(), 4);
    }

    #[test]
    fn test_configured_provider_is_registered() {
        let mut config = SlideCraftConfig::default();
        config.providers.insert(
            "claude".to_string(),
            ProviderConfig {
                api_key: Some("sk-ant".to_string()),
                enabled: true,
                ..Default::default()
            },
        );
        let registry = single_registry("claude", &config, transport());
        assert_eq!(registry.provider_names(), vec!["claude"]);
    }

    #[test]
    fn test_canonical_name() {
        assert_eq!(canonical_name("Anthropic").unwrap(), "claude");
        assert!(canonical_name("mistral").is_err());
    }
}
