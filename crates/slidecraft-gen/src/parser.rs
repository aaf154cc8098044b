//! Response parsing: raw model text to slide records
//!
//! Two strategies are composed by [`ResponseParser::parse`]:
//! 1. Structured: decode the bracketed span from the first `[` to the last `]`
//!    as a JSON array of `{title, content}` records.
//! 2. Heuristic: walk non-empty lines, opening a new slide on recognizable
//!    markers (`Slide 3`, `Title:`, `## `, `2. `).

use regex::Regex;
use slidecraft_core::Slide;
use std::sync::LazyLock;

/// Slides opened without a recognizable marker stop after this many
const MAX_UNMARKED_SLIDES: usize = 10;

static SLIDE_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(slide\s+\d+|title:|##\s+)").unwrap());

static NUMBERED_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s+").unwrap());

static MARKER_PREFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(slide\s+\d+[:.]?\s*|title:\s*|##\s+|\d+\.\s*)").unwrap()
});

/// Turns free-form model output into slides. Never fails.
pub struct ResponseParser;

impl ResponseParser {
    /// Parse slides, trying the structured strategy before the line heuristic.
    ///
    /// Returns an empty vector when the text has no non-empty lines.
    pub fn parse(text: &str) -> Vec<Slide> {
        if let Some(slides) = Self::parse_structured(text) {
            return slides;
        }
        log::debug!("No JSON slide array in response, falling back to line parsing");
        Self::parse_heuristic(text)
    }

    /// Decode the greedy `[ ... ]` span as a slide array.
    ///
    /// Records are taken as they are: string fields verbatim, null or missing
    /// fields as empty strings, and a list of points joined with `\n`.
    /// `None` only when the span is not a JSON array.
    pub fn parse_structured(text: &str) -> Option<Vec<Slide>> {
        let span = Self::extract_bracketed_span(text)?;
        match serde_json::from_str::<Vec<serde_json::Value>>(span) {
            Ok(records) => Some(records.iter().map(slide_from_record).collect()),
            Err(e) => {
                log::warn!("JSON parsing failed, using fallback: {}", e);
                None
            }
        }
    }

    /// The span from the first `[` to the last `]`, if the latter follows the former.
    pub fn extract_bracketed_span(text: &str) -> Option<&str> {
        let start = text.find('[')?;
        let end = text.rfind(']')?;
        if end < start {
            return None;
        }
        Some(&text[start..=end])
    }

    /// Line-oriented parsing for answers that are not JSON.
    pub fn parse_heuristic(text: &str) -> Vec<Slide> {
        let mut slides = Vec::new();
        let mut current: Option<Slide> = None;

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let opens_slide = is_slide_marker(line)
                || (current.is_none() && slides.len() < MAX_UNMARKED_SLIDES);

            if opens_slide {
                if let Some(finished) = current.take() {
                    slides.push(finished);
                }
                let title = MARKER_PREFIX_REGEX.replace(line, "");
                current = Some(Slide::new(title.into_owned(), String::new()));
            } else if let Some(slide) = current.as_mut() {
                if !slide.content.is_empty() {
                    slide.content.push('\n');
                }
                slide.content.push_str(line);
            }
        }

        if let Some(finished) = current {
            slides.push(finished);
        }

        slides
    }
}

fn slide_from_record(record: &serde_json::Value) -> Slide {
    Slide::new(
        field_text(record.get("title")),
        field_text(record.get("content")),
    )
}

fn field_text(value: Option<&serde_json::Value>) -> String {
    match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .map(|item| field_text(Some(item)))
            .collect::<Vec<_>>()
            .join("\n"),
        Some(other) => other.to_string(),
    }
}

fn is_slide_marker(line: &str) -> bool {
    SLIDE_MARKER_REGEX.is_match(line) || NUMBERED_MARKER_REGEX.is_match(line)
}
