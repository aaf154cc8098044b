//! End-to-end deck generation
//!
//! Topic analysis → brief → prompt → one provider or best-of-N → metadata.
//! Any generation failure is absorbed here by substituting the placeholder
//! deck, so callers always get slides for a valid request.

use crate::analysis::{analyze_topic, extract_title_from_topic};
use crate::fallback::{generate_fallback_slides, FALLBACK_PROVIDER};
use crate::presentation::{attach_metadata, Presentation};
use crate::prompt::{build_topic_brief, format_prompt};
use crate::provider::{GeneratedContent, GenerationResult};
use crate::registry::ProviderRegistry;
use slidecraft_core::{GenerationRequest, Result, Slide, SlideCraftError};

/// Generate a deck for `request` using the adapters in `registry`.
///
/// Only an invalid request is an error. Unknown providers, backend failures
/// and empty answers all produce the placeholder deck.
pub fn generate_presentation(
    registry: &ProviderRegistry,
    request: &GenerationRequest,
) -> Result<Presentation> {
    validate(request)?;

    let analysis = request
        .analysis
        .clone()
        .unwrap_or_else(|| analyze_topic(&request.topic));
    let brief = build_topic_brief(request, &analysis);
    let prompt = format_prompt(&brief, request.slide_count, &analysis);
    log::debug!(
        "Generating {} slides ({} template) with {:?}",
        request.slide_count,
        analysis.template,
        request.providers
    );

    let generated = if request.compare {
        registry.generate_best_content(&prompt, &request.providers)
    } else {
        generate_single(registry, &request.providers[0], &prompt)
    };

    let (mut slides, provider, quality_score, used_fallback) = match generated {
        Ok(content) if !content.slides.is_empty() => {
            (content.slides, content.provider, content.quality_score, false)
        }
        Ok(content) => {
            log::warn!("{} returned no usable slides, using placeholder deck", content.provider);
            fallback(request)
        }
        Err(e) => {
            log::warn!("Generation failed ({}), using placeholder deck", e);
            fallback(request)
        }
    };

    attach_metadata(&mut slides, &provider, quality_score, chrono::Utc::now());

    Ok(Presentation {
        title: extract_title_from_topic(&request.topic),
        slides,
        provider,
        quality_score,
        analysis,
        used_fallback,
    })
}

fn validate(request: &GenerationRequest) -> Result<()> {
    if request.topic.trim().is_empty() {
        return Err(SlideCraftError::InvalidRequest(
            "topic must not be empty".to_string(),
        ));
    }
    if request.slide_count == 0 {
        return Err(SlideCraftError::InvalidRequest(
            "slide count must be at least 1".to_string(),
        ));
    }
    if request.providers.is_empty() {
        return Err(SlideCraftError::InvalidRequest(
            "no providers requested".to_string(),
        ));
    }
    Ok(())
}

fn generate_single(
    registry: &ProviderRegistry,
    name: &str,
    prompt: &str,
) -> Result<GeneratedContent> {
    match registry.generate_with_provider(name, prompt)? {
        GenerationResult::Success(content) => Ok(content),
        GenerationResult::Failure(failure) => Err(SlideCraftError::GenerationError(format!(
            "{}: {}",
            failure.provider, failure.error
        ))),
    }
}

fn fallback(request: &GenerationRequest) -> (Vec<Slide>, String, Option<f64>, bool) {
    (
        generate_fallback_slides(&request.topic, request.slide_count),
        FALLBACK_PROVIDER.to_string(),
        None,
        true,
    )
}
