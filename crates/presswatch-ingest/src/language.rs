//! English-language screen for general-news feed items.
//!
//! Wire and investor-relations feeds are English by construction; open
//! news-search feeds are not. The screen counts marker-pattern matches
//! rather than doing real language detection: false negatives are
//! acceptable, non-English volume in the store is not.

use presswatch_core::keywords::LanguageKeywords;
use regex::{Regex, RegexBuilder};

use crate::error::IngestError;

/// Language marker patterns compiled for repeated matching.
pub struct LanguageFilter {
    english: Vec<Regex>,
    non_english: Vec<Regex>,
}

impl LanguageFilter {
    /// Compile the marker tables from `config/keywords.yaml`.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Pattern`] if a pattern does not compile. The
    /// core loader pre-validates file-sourced tables, so this only fires on
    /// hand-built ones.
    pub fn new(keywords: &LanguageKeywords) -> Result<Self, IngestError> {
        let english = compile_patterns(&keywords.english)?;
        let mut non_english = Vec::new();
        for patterns in keywords.non_english.values() {
            non_english.extend(compile_patterns(patterns)?);
        }
        Ok(Self {
            english,
            non_english,
        })
    }

    /// Best-effort English test over an item's title and description.
    ///
    /// True iff no non-English marker matched at all, or English markers
    /// outnumber non-English ones by more than two to one.
    #[must_use]
    pub fn is_english_content(&self, text: &str) -> bool {
        let non_english_matches = count_matches(&self.non_english, text);
        if non_english_matches == 0 {
            return true;
        }
        let english_matches = count_matches(&self.english, text);
        english_matches > non_english_matches * 2
    }
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>, IngestError> {
    patterns
        .iter()
        .map(|pattern| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(IngestError::from)
        })
        .collect()
}

fn count_matches(patterns: &[Regex], text: &str) -> usize {
    patterns
        .iter()
        .map(|pattern| pattern.find_iter(text).count())
        .sum()
}
