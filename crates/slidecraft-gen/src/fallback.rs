//! Placeholder deck used when no provider produced slides

use crate::analysis::extract_title_from_topic;
use slidecraft_core::Slide;

/// Provider name recorded on slides from [`generate_fallback_slides`]
pub const FALLBACK_PROVIDER: &str = "fallback";

/// Build a deterministic `slide_count`-slide outline for `topic`.
///
/// Title, agenda, numbered key points, then a closing slide. Short decks are
/// cut from the end, so a two-slide deck has no closing slide.
pub fn generate_fallback_slides(topic: &str, slide_count: usize) -> Vec<Slide> {
    let mut slides = vec![
        Slide::new(
            extract_title_from_topic(topic),
            "Presentation overview\nKey objectives\nHow this talk is organized",
        ),
        Slide::new(
            "Agenda",
            "Main topic 1\nMain topic 2\nMain topic 3\nSummary and wrap-up",
        ),
    ];

    for i in 2..slide_count.saturating_sub(1) {
        slides.push(Slide::new(
            format!("Key Point {}", i - 1),
            format!(
                "Important point {}\nDetailed explanation\nPractical applications",
                i - 1
            ),
        ));
    }

    slides.push(Slide::new(
        "Conclusion and Next Steps",
        "Key takeaways\nAction plan\nQ&A",
    ));

    slides.truncate(slide_count);
    slides
}
