//! Provider registry and best-of-N selection
//!
//! The registry owns the name → adapter mapping. It is mutated only between
//! generations (`&mut self`) and read during them (`&self`); provider calls
//! are issued one at a time, in the order requested.

use crate::provider::{GeneratedContent, GenerationResult, ProviderAdapter};
use crate::scorer::QualityScorer;
use slidecraft_core::{Result, SlideCraftError};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, ProviderAdapter>,
    scorer: QualityScorer,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry that ranks candidates with a custom scorer
    pub fn with_scorer(scorer: QualityScorer) -> Self {
        Self {
            providers: HashMap::new(),
            scorer,
        }
    }

    /// Insert or replace the adapter registered under `name`
    pub fn register_provider(&mut self, name: impl Into<String>, adapter: ProviderAdapter) {
        let name = name.into();
        if self.providers.insert(name.clone(), adapter).is_some() {
            log::debug!("Replaced provider registration for {}", name);
        }
    }

    pub fn get_provider(&self, name: &str) -> Option<&ProviderAdapter> {
        self.providers.get(name)
    }

    /// Registered names, sorted
    pub fn provider_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn scorer(&self) -> &QualityScorer {
        &self.scorer
    }

    /// Run one provider and parse its answer into slides.
    ///
    /// An unregistered name is an error and no request is made. Backend
    /// failures come back as [`GenerationResult::Failure`].
    pub fn generate_with_provider(&self, name: &str, prompt: &str) -> Result<GenerationResult> {
        let adapter = self
            .get_provider(name)
            .ok_or_else(|| SlideCraftError::ProviderNotFound(name.to_string()))?;

        let mut result = adapter.generate_content(prompt);
        if let GenerationResult::Success(content) = &mut result {
            content.slides = adapter.extract_slides_from_response(&content.content);
            log::debug!("{} produced {} slides", name, content.slides.len());
        }
        Ok(result)
    }

    /// Run each named provider in turn and keep the highest-scoring deck.
    ///
    /// Failed or unknown providers are logged and skipped. Equal scores keep
    /// the earlier candidate. Fails only when no provider succeeds.
    pub fn generate_best_content<S: AsRef<str>>(
        &self,
        prompt: &str,
        providers: &[S],
    ) -> Result<GeneratedContent> {
        let mut best: Option<GeneratedContent> = None;

        for name in providers {
            let name = name.as_ref();
            let mut candidate = match self.generate_with_provider(name, prompt) {
                Ok(GenerationResult::Success(content)) => content,
                Ok(GenerationResult::Failure(failure)) => {
                    log::warn!("{} generation failed: {}", failure.provider, failure.error);
                    continue;
                }
                Err(e) => {
                    log::warn!("{} generation failed: {}", name, e);
                    continue;
                }
            };

            let score = self.scorer.score(&candidate.slides);
            log::debug!("{} scored {:.3}", name, score);
            candidate.quality_score = Some(score);

            let replace = match &best {
                Some(current) => score > current.quality_score.unwrap_or(0.0),
                None => true,
            };
            if replace {
                best = Some(candidate);
            }
        }

        let best = best.ok_or(SlideCraftError::AllProvidersFailed)?;
        log::info!(
            "Selected {} (score {:.3})",
            best.provider,
            best.quality_score.unwrap_or(0.0)
        );
        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Backend;
    use crate::providers::mock::MockTransport;
    use slidecraft_core::Slide;
    use std::sync::Arc;

    fn adapter(backend: Backend, transport: Arc<MockTransport>) -> ProviderAdapter {
        ProviderAdapter::with_defaults(backend, "test-key", transport)
    }

    fn q4_slides() -> Vec<Slide> {
        vec![
            Slide::new("Q4 2024 Sales Report", "Revenue grew 18% year over year"),
            Slide::new("Agenda", "Results\nRegions\nProducts\nOutlook"),
            Slide::new("Revenue by Region", "North America up 22%\nEurope up 9%\nAsia flat"),
            Slide::new("Top Products", "Product A led with $4.2M\nProduct B grew 31%"),
            Slide::new("Next Steps", "Expand the partner channel\nHire two account managers"),
        ]
    }

    fn strong_slides() -> Vec<Slide> {
        let content = [
            "Revenue climbed steadily across every region",
            "Churn dropped to its lowest level in two years",
            "Average deal size increased by fifteen percent",
            "Pipeline coverage now exceeds three times quota",
        ]
        .join("\n");
        vec![
            Slide::new("Q4 Revenue Highlights", content.clone()),
            Slide::new("2025 Growth Priorities", content.clone()),
            Slide::new("3 Ways to Improve Retention", content),
        ]
    }

    #[test]
    fn test_single_provider_returns_parsed_slides() {
        let mut registry = ProviderRegistry::new();
        let transport = Arc::new(MockTransport::with_slides(Backend::Claude, &q4_slides()));
        registry.register_provider("claude", adapter(Backend::Claude, transport));

        let prompt = crate::prompt::format_prompt(
            "Q4 2024 sales performance report",
            5,
            &Default::default(),
        );
        let result = registry.generate_with_provider("claude", &prompt).unwrap();

        assert!(result.is_success());
        assert_eq!(result.provider(), "claude");
        assert_eq!(result.slides(), q4_slides().as_slice());
        if let GenerationResult::Success(content) = result {
            assert!(content.quality_score.is_none());
        }
    }

    #[test]
    fn test_best_of_n_prefers_higher_quality() {
        let mut registry = ProviderRegistry::new();
        let empty: Vec<Slide> = (1..=3)
            .map(|i| Slide::new(format!("Slide {} heading", i), ""))
            .collect();
        registry.register_provider(
            "claude",
            adapter(
                Backend::Claude,
                Arc::new(MockTransport::with_slides(Backend::Claude, &strong_slides())),
            ),
        );
        registry.register_provider(
            "openai",
            adapter(
                Backend::OpenAi,
                Arc::new(MockTransport::with_slides(Backend::OpenAi, &empty)),
            ),
        );

        let best = registry
            .generate_best_content("prompt", &["claude", "openai"])
            .unwrap();

        assert_eq!(best.provider, "claude");
        let openai_score = QualityScorer::new().score(&empty);
        assert!(best.quality_score.unwrap() > openai_score);
    }

    #[test]
    fn test_all_providers_failed() {
        let mut registry = ProviderRegistry::new();
        let claude = Arc::new(MockTransport::with_status(Backend::Claude, 500));
        let gemini = Arc::new(MockTransport::with_status(Backend::Gemini, 401));
        registry.register_provider("claude", adapter(Backend::Claude, claude.clone()));
        registry.register_provider("gemini", adapter(Backend::Gemini, gemini.clone()));

        let err = registry
            .generate_best_content("prompt", &["claude", "gemini"])
            .unwrap_err();

        assert!(matches!(err, SlideCraftError::AllProvidersFailed));
        assert_eq!(claude.call_count(), 1);
        assert_eq!(gemini.call_count(), 1);
    }

    #[test]
    fn test_unknown_provider_makes_no_request() {
        let mut registry = ProviderRegistry::new();
        let transport = Arc::new(MockTransport::replying(Backend::Claude, "unused"));
        registry.register_provider("claude", adapter(Backend::Claude, transport.clone()));

        let err = registry.generate_with_provider("mistral", "prompt").unwrap_err();

        assert!(matches!(err, SlideCraftError::ProviderNotFound(ref n) if n == "mistral"));
        assert_eq!(transport.call_count(), 0);
    }

    #[test]
    fn test_unknown_provider_skipped_in_best_of_n() {
        let mut registry = ProviderRegistry::new();
        registry.register_provider(
            "openai",
            adapter(
                Backend::OpenAi,
                Arc::new(MockTransport::with_slides(Backend::OpenAi, &q4_slides())),
            ),
        );

        let best = registry
            .generate_best_content("prompt", &["mistral", "openai"])
            .unwrap();
        assert_eq!(best.provider, "openai");
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = ProviderRegistry::new();
        let first = Arc::new(MockTransport::replying(Backend::Claude, "first"));
        let second = Arc::new(MockTransport::replying(Backend::Claude, "second"));
        registry.register_provider("claude", adapter(Backend::Claude, first.clone()));
        registry.register_provider("claude", adapter(Backend::Claude, second.clone()));

        let result = registry.generate_with_provider("claude", "prompt").unwrap();

        match result {
            GenerationResult::Success(content) => assert_eq!(content.content, "second"),
            other => panic!("expected success, got {:?}", other),
        }
        assert_eq!(first.call_count(), 0);
        assert_eq!(second.call_count(), 1);
        assert_eq!(registry.provider_names(), vec!["claude"]);
    }

    #[test]
    fn test_tie_keeps_first_requested() {
        let mut registry = ProviderRegistry::new();
        let slides = strong_slides();
        registry.register_provider(
            "claude",
            adapter(
                Backend::Claude,
                Arc::new(MockTransport::with_slides(Backend::Claude, &slides)),
            ),
        );
        registry.register_provider(
            "openai",
            adapter(
                Backend::OpenAi,
                Arc::new(MockTransport::with_slides(Backend::OpenAi, &slides)),
            ),
        );

        let best = registry
            .generate_best_content("prompt", &["openai", "claude"])
            .unwrap();
        assert_eq!(best.provider, "openai");

        let best = registry
            .generate_best_content("prompt", &["claude", "openai"])
            .unwrap();
        assert_eq!(best.provider, "claude");
    }

    #[test]
    fn test_empty_request_list_fails() {
        let registry = ProviderRegistry::new();
        let providers: [&str; 0] = [];
        assert!(matches!(
            registry.generate_best_content("prompt", &providers),
            Err(SlideCraftError::AllProvidersFailed)
        ));
    }
}
