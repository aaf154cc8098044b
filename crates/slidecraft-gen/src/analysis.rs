//! Topic analysis
//!
//! Classifies a topic into a category with a suggested template and color
//! scheme, and derives a short deck title from the topic text.

use regex::Regex;
use slidecraft_core::TopicAnalysis;
use std::sync::LazyLock;

/// Keyword rules checked in order; the first category with a hit wins
const CATEGORY_RULES: &[(&str, &str, &str, &[&str])] = &[
    (
        "marketing",
        "modern",
        "marketing",
        &[
            "marketing", "sales", "branding", "advertising", "promotion", "마케팅", "판매",
            "브랜딩", "광고", "홍보",
        ],
    ),
    (
        "technology",
        "dark",
        "tech",
        &[
            "technology", "development", "ai", "artificial intelligence", "IT", "programming",
            "기술", "개발", "인공지능", "프로그래밍",
        ],
    ),
    (
        "education",
        "minimal",
        "education",
        &[
            "education", "learning", "lecture", "training", "teaching", "교육", "학습", "강의",
            "연수", "교수법",
        ],
    ),
    (
        "business",
        "corporate",
        "business",
        &[
            "company", "enterprise", "business", "strategy", "management", "회사", "기업",
            "비즈니스", "전략", "경영",
        ],
    ),
];

const MAX_TITLE_CHARS: usize = 50;
const DEFAULT_TITLE: &str = "Presentation";

/// Topics naming the deck itself ("PPT about X") get their filler stripped
static TITLE_FILLER_TRIGGER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bPPT\b|\bpresentation\b|프레젠테이션").unwrap());

static TITLE_FILLER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bPPT\b|\bpresentation\b|프레젠테이션|만들어|필요|부탁").unwrap()
});

/// Classify a topic by keyword.
///
/// ASCII keywords must match a whole word so that "ai" does not fire on
/// "training"; other keywords match as substrings. Keywords written in
/// uppercase ("IT") are case-sensitive so the pronoun "it" is not one.
pub fn analyze_topic(topic: &str) -> TopicAnalysis {
    let lower = topic.to_lowercase();
    let words = split_words(&lower);
    let cased_words = split_words(topic);

    for (category, template, color, keywords) in CATEGORY_RULES {
        if keywords
            .iter()
            .any(|k| keyword_matches(k, &lower, &words, &cased_words))
        {
            return TopicAnalysis {
                category: category.to_string(),
                template: template.to_string(),
                color: color.to_string(),
            };
        }
    }

    TopicAnalysis::default()
}

fn split_words(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect()
}

fn keyword_matches(keyword: &str, lower: &str, words: &[&str], cased_words: &[&str]) -> bool {
    if !keyword.is_ascii() {
        return lower.contains(keyword);
    }
    if keyword.chars().any(|c| c.is_ascii_uppercase()) {
        return cased_words.contains(&keyword);
    }
    if keyword.contains(' ') {
        let phrase: Vec<&str> = keyword.split(' ').collect();
        return words.windows(phrase.len()).any(|w| w == phrase.as_slice());
    }
    words.contains(&keyword)
}

/// Derive a deck title from the first line of the topic
pub fn extract_title_from_topic(topic: &str) -> String {
    let first_line = topic.lines().next().unwrap_or("").trim();

    if first_line.chars().count() > MAX_TITLE_CHARS {
        let truncated: String = first_line.chars().take(MAX_TITLE_CHARS).collect();
        return format!("{}...", truncated);
    }

    if TITLE_FILLER_TRIGGER_REGEX.is_match(first_line) {
        let stripped = TITLE_FILLER_REGEX.replace_all(first_line, "");
        let title = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
        return if title.is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            title
        };
    }

    if first_line.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        first_line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marketing_topic() {
        let analysis = analyze_topic("Spring branding campaign results");
        assert_eq!(analysis.category, "marketing");
        assert_eq!(analysis.template, "modern");
        assert_eq!(analysis.color, "marketing");
    }

    #[test]
    fn test_technology_topic() {
        let analysis = analyze_topic("Adopting AI in customer support");
        assert_eq!(analysis.category, "technology");
        assert_eq!(analysis.template, "dark");
    }

    #[test]
    fn test_multi_word_keyword() {
        assert_eq!(
            analyze_topic("Ethics of artificial intelligence").category,
            "technology"
        );
    }

    #[test]
    fn test_ascii_keywords_match_whole_words() {
        // "training" contains "ai" and "it" is inside "with"
        let analysis = analyze_topic("New hire training with mentors");
        assert_eq!(analysis.category, "education");
    }

    #[test]
    fn test_it_keyword_is_case_sensitive() {
        assert_eq!(
            analyze_topic("Why it matters for our family budget"),
            TopicAnalysis::default()
        );
        assert_eq!(analyze_topic("IT budget review").category, "technology");
    }

    #[test]
    fn test_korean_keywords_match_substrings() {
        assert_eq!(analyze_topic("2024년 마케팅 전략").category, "marketing");
        assert_eq!(analyze_topic("신입사원 교육 계획").category, "education");
    }

    #[test]
    fn test_first_matching_category_wins() {
        // Both marketing and business keywords; marketing is checked first
        assert_eq!(analyze_topic("Sales strategy for 2025").category, "marketing");
    }

    #[test]
    fn test_general_topic() {
        assert_eq!(analyze_topic("Our family trip to Iceland"), TopicAnalysis::default());
    }

    #[test]
    fn test_title_first_line() {
        assert_eq!(
            extract_title_from_topic("Q4 2024 sales performance report\nAudience: board"),
            "Q4 2024 sales performance report"
        );
    }

    #[test]
    fn test_title_truncation() {
        let long = "a".repeat(60);
        let title = extract_title_from_topic(&long);
        assert_eq!(title, format!("{}...", "a".repeat(50)));
    }

    #[test]
    fn test_title_strips_filler_words() {
        assert_eq!(
            extract_title_from_topic("PPT about onboarding"),
            "about onboarding"
        );
    }

    #[test]
    fn test_title_keeps_words_containing_filler() {
        assert_eq!(
            extract_title_from_topic("Representation learning basics"),
            "Representation learning basics"
        );
        assert_eq!(
            extract_title_from_topic("Presentations that persuade"),
            "Presentations that persuade"
        );
        assert_eq!(
            extract_title_from_topic("Presentation skills PPT"),
            "skills"
        );
    }

    #[test]
    fn test_title_korean_filler() {
        assert_eq!(
            extract_title_from_topic("신제품 출시 프레젠테이션 만들어 주세요"),
            "신제품 출시 주세요"
        );
    }

    #[test]
    fn test_title_default() {
        assert_eq!(extract_title_from_topic(""), "Presentation");
        assert_eq!(extract_title_from_topic("PPT"), "Presentation");
        assert_eq!(extract_title_from_topic("  ppt presentation "), "Presentation");
    }
}
