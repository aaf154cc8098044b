//! Finished decks and their JSON form

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use slidecraft_core::{Result, Slide, SlideMetadata, TopicAnalysis};
use std::path::Path;

/// A generated deck ready for rendering or export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    pub title: String,
    pub slides: Vec<Slide>,
    /// Provider that produced the slides, or "fallback"
    pub provider: String,
    /// Set when several providers were compared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<f64>,
    pub analysis: TopicAnalysis,
    #[serde(default)]
    pub used_fallback: bool,
}

impl Presentation {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the deck as pretty-printed JSON
    pub fn save_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_json()?)?;
        log::debug!("Wrote {} slides to {}", self.slides.len(), path.display());
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SlideFile {
    Deck(Presentation),
    Slides(Vec<Slide>),
}

/// Read slides from a saved deck or from a bare JSON slide array
pub fn load_slides_json(path: &Path) -> Result<Vec<Slide>> {
    let content = std::fs::read_to_string(path)?;
    parse_slides_json(&content)
}

/// Parse slides from a deck object or a bare JSON slide array
pub fn parse_slides_json(content: &str) -> Result<Vec<Slide>> {
    let file: SlideFile = serde_json::from_str(content)?;
    Ok(match file {
        SlideFile::Deck(deck) => deck.slides,
        SlideFile::Slides(slides) => slides,
    })
}

/// Stamp every slide with its provider, score, timestamp and position
pub fn attach_metadata(
    slides: &mut [Slide],
    provider: &str,
    quality_score: Option<f64>,
    generated_at: DateTime<Utc>,
) {
    for (index, slide) in slides.iter_mut().enumerate() {
        slide.metadata = Some(SlideMetadata {
            provider: provider.to_string(),
            quality_score,
            generated_at,
            index,
        });
    }
}
