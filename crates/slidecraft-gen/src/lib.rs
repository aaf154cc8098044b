//! SlideCraft Gen - multi-provider slide content generation
//!
//! Sends a presentation brief to one or more LLM backends (Claude, OpenAI,
//! Gemini), parses the free-form answers into slides, scores competing decks
//! and keeps the best one, with a placeholder deck when every backend fails.

pub mod analysis;
pub mod config;
pub mod fallback;
pub mod parser;
pub mod pipeline;
pub mod presentation;
pub mod prompt;
pub mod provider;
pub mod providers;
pub mod registry;
pub mod scorer;
pub mod transport;

pub use analysis::{analyze_topic, extract_title_from_topic};
pub use config::SlideCraftConfig;
pub use fallback::generate_fallback_slides;
pub use parser::ResponseParser;
pub use pipeline::generate_presentation;
pub use presentation::{load_slides_json, Presentation};
pub use provider::{
    Backend, GeneratedContent, GenerationFailure, GenerationResult, ProviderAdapter,
    ProviderSettings, ProviderStatus,
};
pub use registry::ProviderRegistry;
pub use scorer::{QualityScorer, ScoreWeights};
pub use transport::{HttpRequest, HttpResponse, Transport, UreqTransport};
