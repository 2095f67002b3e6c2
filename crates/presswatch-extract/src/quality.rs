//! Quality gate for extracted article text.

const MIN_CHARS: usize = 100;
const MIN_WORDS: usize = 30;
const MIN_SENTENCES: usize = 3;

/// Openings that mark navigation chrome or consent walls rather than
/// article copy.
const BOILERPLATE_STARTS: &[&str] = &[
    "share",
    "subscribe",
    "sign up",
    "sign in",
    "log in",
    "cookie",
    "we use cookies",
    "enable javascript",
    "javascript is",
    "please enable",
    "advertisement",
    "skip to",
];

/// Decide whether extracted text reads like an article body.
///
/// Selector matches alone are not trusted; length, word count, and
/// sentence-segment floors plus a boilerplate-opening check are what
/// actually reject navigation chrome.
#[must_use]
pub fn validate_content_quality(text: &str) -> bool {
    let trimmed = text.trim();

    if trimmed.chars().count() < MIN_CHARS {
        return false;
    }
    if trimmed.split_whitespace().count() < MIN_WORDS {
        return false;
    }
    if sentence_segments(trimmed) < MIN_SENTENCES {
        return false;
    }

    let opening: String = trimmed.chars().take(40).collect::<String>().to_lowercase();
    !BOILERPLATE_STARTS
        .iter()
        .any(|marker| opening.starts_with(marker))
}

fn sentence_segments(text: &str) -> usize {
    text.split(['.', '!', '?'])
        .filter(|segment| segment.trim().chars().count() >= 12)
        .count()
}
