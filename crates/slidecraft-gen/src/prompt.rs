//! Prompt construction
//!
//! `format_prompt` is the instruction every backend receives. It asks for a
//! JSON array of `{title, content}` records, which is the shape
//! [`ResponseParser`](crate::parser::ResponseParser) decodes first.

use slidecraft_core::{GenerationRequest, TopicAnalysis};

/// System instruction sent alongside every prompt
pub const SYSTEM_INSTRUCTION: &str = "You are a professional presentation content creator.";

/// Build the model instruction for a deck of `slide_count` slides
pub fn format_prompt(topic: &str, slide_count: usize, analysis: &TopicAnalysis) -> String {
    format!(
        r#"You are a professional presentation designer. Create a perfect presentation with this information:

Project Details:
{topic}

Category: {category}

Presentation Structure Guide:
- Slide 1: Title + Compelling subtitle
- Slide 2: Agenda/Overview (show overall flow)
- Middle slides: Core content (logical order)
- Last slide: Conclusion/Call to action

Content Creation Principles:
1. Each slide focuses on one core message
2. Titles are impactful and clear (under 10 words recommended)
3. Content consists of 3-5 key points
4. Professional yet easy to understand
5. Include specific actionable content

Essential Rules:
- NO bullet point symbols (•, -, *, ○ etc.)
- Separate each point with line breaks (\n) only
- Use numbers, statistics, and specific examples

Return in JSON format:
[
    {{
        "title": "Compelling slide title",
        "content": "First key point\nSecond key point\nThird key point"
    }}
]

Generate {slide_count} perfect slides."#,
        topic = topic.trim(),
        category = analysis.category,
        slide_count = slide_count,
    )
}

/// The caller-side brief that becomes the `topic` of [`format_prompt`]
pub fn build_topic_brief(request: &GenerationRequest, analysis: &TopicAnalysis) -> String {
    let mut lines = vec![format!("Topic: {}", request.topic.trim())];
    if let Some(audience) = request.audience.as_deref().filter(|a| !a.trim().is_empty()) {
        lines.push(format!("Audience: {}", audience.trim()));
    }
    if let Some(duration) = request.duration.as_deref().filter(|d| !d.trim().is_empty()) {
        lines.push(format!("Presentation time: {}", duration.trim()));
    }
    lines.push(format!("Slide count: {}", request.slide_count));
    lines.push(format!("Category: {}", analysis.category));
    lines.push(String::new());
    lines.push("Combine the information above into a complete presentation.".to_string());
    lines.join("\n")
}
