//! Text normalizer: turns raw document text into the token stream used for
//! lexical similarity.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+").expect("email pattern compiles"));

// `www.` keeps the unescaped dot: any character after `www` starts a URL token.
static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"http\S+|www.\S+").expect("url pattern compiles"));

static DIGIT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("digit pattern compiles"));

/// Closed stopword list. Intentionally minimal.
pub const STOPWORDS: &[&str] = &[
    "the", "and", "is", "in", "to", "of", "a", "for", "on", "with", "at", "from", "by", "an",
    "be", "this", "that",
];

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

/// Normalizes `text` for lexical comparison.
///
/// Order matters, since each step changes token boundaries for the next:
/// 1. lowercase
/// 2. emails, then URLs, then digit runs are replaced with a space
/// 3. ASCII punctuation is removed outright, so `state-of-the-art` merges
///    into `stateoftheart`
/// 4. whitespace split, stopwords dropped, tokens rejoined with one space
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let without_emails = EMAIL_PATTERN.replace_all(&lowered, " ");
    let without_urls = URL_PATTERN.replace_all(&without_emails, " ");
    let without_digits = DIGIT_PATTERN.replace_all(&without_urls, " ");

    let stripped: String = without_digits
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();

    stripped
        .split_whitespace()
        .filter(|token| !STOPWORD_SET.contains(*token))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\t "), "");
    }

    #[test]
    fn test_lowercases_and_drops_stopwords() {
        assert_eq!(
            normalize("The Engineer and THE Team"),
            "engineer team"
        );
    }

    #[test]
    fn test_all_stopwords_yields_empty() {
        assert_eq!(normalize("this is a test of that"), "test");
        assert_eq!(normalize("the and is in to of a"), "");
    }

    #[test]
    fn test_emails_are_removed_before_punctuation() {
        // Without the email pass the address would collapse into one token.
        assert_eq!(
            normalize("Contact jane.doe@example.com today"),
            "contact today"
        );
    }

    #[test]
    fn test_urls_are_removed() {
        assert_eq!(
            normalize("Portfolio: https://github.com/jane and www.jane.dev"),
            "portfolio"
        );
    }

    #[test]
    fn test_digit_runs_split_tokens() {
        assert_eq!(normalize("python3 for 5+ years"), "python years");
        assert_eq!(normalize("abc123def"), "abc def");
    }

    #[test]
    fn test_punctuation_is_stripped_not_separated() {
        assert_eq!(normalize("state-of-the-art"), "stateoftheart");
        assert_eq!(normalize("node.js, react!"), "nodejs react");
    }

    #[test]
    fn test_whitespace_is_collapsed() {
        assert_eq!(normalize("rust\n\n  tokio\t axum"), "rust tokio axum");
    }

    #[test]
    fn test_stopword_check_happens_after_punctuation_strip() {
        // "(the)" only becomes a stopword once the parentheses are gone.
        assert_eq!(normalize("(the) design"), "design");
    }

    #[test]
    fn test_normalize_is_idempotent_on_clean_text() {
        let once = normalize("Senior Rust Engineer, distributed systems!");
        assert_eq!(normalize(&once), once);
    }
}
