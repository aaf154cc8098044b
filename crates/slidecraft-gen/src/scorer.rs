//! Content quality scoring
//!
//! A deterministic heuristic in `[0, 1]` used to rank candidate decks from
//! different providers. It never rejects a deck, it only orders them.

use regex::Regex;
use slidecraft_core::Slide;
use std::sync::LazyLock;

static ACTION_WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(how|why|what|create|build|improve|optimize)\b").unwrap()
});

/// Relative weight of each per-slide sub-score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub title: f64,
    pub content: f64,
    pub structure: f64,
    pub length_balance: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            title: 0.3,
            content: 0.4,
            structure: 0.2,
            length_balance: 0.1,
        }
    }
}

/// Scores slide decks for presentation quality
#[derive(Debug, Clone, Default)]
pub struct QualityScorer {
    weights: ScoreWeights,
}

impl QualityScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    /// Mean of the per-slide scores; 0 for an empty deck
    pub fn score(&self, slides: &[Slide]) -> f64 {
        if slides.is_empty() {
            return 0.0;
        }
        let total: f64 = slides.iter().map(|s| self.score_slide(s)).sum();
        total / slides.len() as f64
    }

    /// Like [`score`](Self::score), treating a missing deck as empty
    pub fn score_optional(&self, slides: Option<&[Slide]>) -> f64 {
        slides.map_or(0.0, |s| self.score(s))
    }

    /// Weighted sum of the four sub-scores for one slide
    pub fn score_slide(&self, slide: &Slide) -> f64 {
        self.weights.title * score_title(&slide.title)
            + self.weights.content * score_content(&slide.content)
            + self.weights.structure * score_structure(slide)
            + self.weights.length_balance * score_length_balance(slide)
    }
}

/// Title quality: length sweet spot, numbers, and engagement words
pub fn score_title(title: &str) -> f64 {
    if title.is_empty() {
        return 0.0;
    }

    let length = title.chars().count();
    let mut score = 0.5;

    if (5..=50).contains(&length) {
        score += 0.3;
    } else if length > 50 {
        score -= 0.2;
    }

    if title.chars().any(|c| c.is_ascii_digit()) {
        score += 0.1;
    }
    if ACTION_WORD_REGEX.is_match(title) {
        score += 0.1;
    }

    f64::min(score, 1.0)
}

/// Content quality: number of points and average point length
pub fn score_content(content: &str) -> f64 {
    if content.is_empty() {
        return 0.0;
    }

    let lines: Vec<&str> = content
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect();
    let mut score = 0.5;

    if (3..=6).contains(&lines.len()) {
        score += 0.3;
    } else if lines.len() > 6 {
        score -= 0.1;
    }

    if !lines.is_empty() {
        let total_chars: usize = lines.iter().map(|line| line.chars().count()).sum();
        let average = total_chars as f64 / lines.len() as f64;
        if (20.0..=100.0).contains(&average) {
            score += 0.2;
        }
    }

    f64::min(score, 1.0)
}

/// 1.0 with both title and content, 0.5 with one, 0 with neither
pub fn score_structure(slide: &Slide) -> f64 {
    match (slide.title.is_empty(), slide.content.is_empty()) {
        (false, false) => 1.0,
        (true, true) => 0.0,
        _ => 0.5,
    }
}

/// How close the title's share of the slide text is to the ideal 20%
pub fn score_length_balance(slide: &Slide) -> f64 {
    let title_len = slide.title.chars().count();
    let total = title_len + slide.content.chars().count();
    if total == 0 {
        return 0.0;
    }

    let ratio = title_len as f64 / total as f64;
    if (0.1..=0.3).contains(&ratio) {
        1.0
    } else {
        f64::max(0.0, 1.0 - (ratio - 0.2).abs() * 5.0)
    }
}
