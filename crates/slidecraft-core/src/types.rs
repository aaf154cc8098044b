//! Slide and request types shared across the pipeline

use crate::error::{Result, SlideCraftError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single slide: a title and line-separated content points
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    #[serde(default)]
    pub title: String,
    /// Points separated by `\n`, without bullet glyphs
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SlideMetadata>,
}

impl Slide {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            metadata: None,
        }
    }

    /// Content points with empty lines removed
    pub fn points(&self) -> impl Iterator<Item = &str> {
        self.content
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
    }
}

/// Generation details attached to a slide after it has been produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideMetadata {
    /// Provider that produced the slide ("fallback" for the placeholder deck)
    pub provider: String,
    #[serde(default)]
    pub quality_score: Option<f64>,
    pub generated_at: DateTime<Utc>,
    /// Position in the deck
    pub index: usize,
}

/// Topic classification used to pick a template and color scheme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicAnalysis {
    /// Category label (e.g. "marketing", "technology")
    #[serde(rename = "type")]
    pub category: String,
    pub template: String,
    pub color: String,
}

impl Default for TopicAnalysis {
    fn default() -> Self {
        Self {
            category: "general".to_string(),
            template: "modern".to_string(),
            color: "default".to_string(),
        }
    }
}

/// What the caller wants generated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub topic: String,
    pub slide_count: usize,
    /// Filled in from the topic when absent
    #[serde(default)]
    pub analysis: Option<TopicAnalysis>,
    /// Provider names to try, in order
    pub providers: Vec<String>,
    #[serde(default)]
    pub audience: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    /// Ask every provider in `providers` and keep the best-scoring deck
    #[serde(default)]
    pub compare: bool,
}

impl GenerationRequest {
    /// Create a request for `topic`, validating the topic and slide count
    pub fn new(topic: impl Into<String>, slide_count: usize) -> Result<Self> {
        let topic = topic.into();
        if topic.trim().is_empty() {
            return Err(SlideCraftError::InvalidRequest(
                "topic must not be empty".to_string(),
            ));
        }
        if slide_count == 0 {
            return Err(SlideCraftError::InvalidRequest(
                "slide count must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            topic,
            slide_count,
            analysis: None,
            providers: Vec::new(),
            audience: None,
            duration: None,
            compare: false,
        })
    }

    pub fn with_providers<I, S>(mut self, providers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.providers = providers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_analysis(mut self, analysis: TopicAnalysis) -> Self {
        self.analysis = Some(analysis);
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    pub fn with_compare(mut self, compare: bool) -> Self {
        self.compare = compare;
        self
    }
}
