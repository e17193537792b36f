use regex::Regex;
use std::sync::OnceLock;

/// Function words plus generic praise and sentiment adjectives. Keywords are
/// meant to surface topics and brands; sentiment language is scored
/// separately.
const STOPWORDS: &[&str] = &[
    "about", "after", "again", "also", "always", "because", "been", "before", "being", "both",
    "came", "come", "could", "does", "doing", "done", "each", "even", "every", "from", "going",
    "gonna", "have", "having", "here", "into", "just", "know", "like", "look", "looking",
    "looks", "made", "make", "many", "more", "most", "much", "must", "never", "only", "other",
    "over", "please", "post", "posts", "same", "should", "some", "still", "such", "sure",
    "take", "than", "that", "their", "them", "then", "there", "these", "they", "thing",
    "things", "think", "this", "those", "through", "time", "today", "tomorrow", "tonight",
    "until", "upon", "very", "want", "well", "were", "what", "when", "where", "which", "while",
    "will", "with", "would", "yeah", "yesterday", "your", "yours", "okay", "really", "totally",
    "absolutely", "definitely", "literally", "actually", "pretty", "super",
    // generic praise / sentiment
    "amazing", "awesome", "beautiful", "best", "better", "cool", "cute", "excellent",
    "fantastic", "good", "great", "incredible", "love", "loved", "lovely", "loves", "loving",
    "nice", "perfect", "thank", "thanks", "wonderful", "wow", "bad", "worst", "hate", "awful",
    "terrible", "horrible",
];

struct Patterns {
    url: Regex,
    disallowed: Regex,
    plain_word: Regex,
}

static PATTERNS: OnceLock<Option<Patterns>> = OnceLock::new();

fn patterns() -> Option<&'static Patterns> {
    PATTERNS
        .get_or_init(|| {
            Some(Patterns {
                url: Regex::new(r"(?:https?://|www\.)\S+").ok()?,
                disallowed: Regex::new(r"[^a-z0-9#\s]+").ok()?,
                plain_word: Regex::new(r"^[a-z]{4,}$").ok()?,
            })
        })
        .as_ref()
}

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

/// Tokenizes free text into candidate topic terms. URLs are removed wherever
/// they start, including inside brackets or after punctuation. Hashtags keep
/// their leading `#`; plain words must be at least four ASCII letters and
/// not a stopword.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let Some(patterns) = patterns() else {
        return Vec::new();
    };
    let lowercase = text.to_lowercase();
    let without_urls = patterns.url.replace_all(&lowercase, " ");
    let cleaned = patterns.disallowed.replace_all(&without_urls, " ");

    cleaned
        .split_whitespace()
        .filter(|token| is_candidate(patterns, token))
        .map(|token| token.to_string())
        .collect()
}

fn is_candidate(patterns: &Patterns, token: &str) -> bool {
    if let Some(tag) = token.strip_prefix('#') {
        return !tag.is_empty();
    }
    patterns.plain_word.is_match(token) && !is_stopword(token)
}
