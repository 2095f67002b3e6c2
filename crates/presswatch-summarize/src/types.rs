//! Structured summary payloads returned by the completion service.

use serde::{Deserialize, Serialize};

/// System prompt used when the caller does not supply one.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You summarize corporate press releases for a financial \
     news dashboard. Respond with JSON containing keys: summary (string, two to three \
     sentences), key_points (array of strings), highlights (array of objects with kind, text, \
     start, end, where kind is one of financial, date, quote, entity, other).";

/// User prompt template; `{title}` and `{content}` are substituted before
/// the request is sent.
pub const DEFAULT_USER_PROMPT_TEMPLATE: &str =
    "Title: {title}\n\nContent:\n{content}\n\nSummarize this press release.";

/// Parsed completion payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub summary: String,
    #[serde(default, alias = "keyPoints")]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
}

/// A span the model flagged as notable, with char offsets into the
/// summarized content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub kind: HighlightKind,
    pub text: String,
    #[serde(default)]
    pub start: usize,
    #[serde(default)]
    pub end: usize,
}

/// Categories the model may assign to a highlight. Unknown strings fold
/// into [`HighlightKind::Other`] instead of failing the whole payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightKind {
    Financial,
    Date,
    Quote,
    Entity,
    #[serde(other)]
    Other,
}

impl HighlightKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            HighlightKind::Financial => "financial",
            HighlightKind::Date => "date",
            HighlightKind::Quote => "quote",
            HighlightKind::Entity => "entity",
            HighlightKind::Other => "other",
        }
    }
}
