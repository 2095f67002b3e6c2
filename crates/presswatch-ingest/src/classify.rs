//! Per-item classification: language screen, fintech signal, company match.

use presswatch_core::keywords::KeywordsFile;
use presswatch_core::{ClassifiedItem, Company, FeedItem, FeedKind};

use crate::error::IngestError;
use crate::fintech::FintechClassifier;
use crate::language::LanguageFilter;
use crate::matcher;

/// Compiled classifiers plus the roster, bundled for the feed pipeline.
/// Build once per run; cheap to share behind a reference.
pub struct Classifier {
    language: LanguageFilter,
    fintech: FintechClassifier,
    companies: Vec<Company>,
}

impl Classifier {
    /// Compile the keyword tables and capture the roster.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Pattern`] if any keyword pattern fails to
    /// compile.
    pub fn new(keywords: &KeywordsFile, companies: Vec<Company>) -> Result<Self, IngestError> {
        Ok(Self {
            language: LanguageFilter::new(&keywords.language)?,
            fintech: FintechClassifier::new(&keywords.fintech)?,
            companies,
        })
    }

    #[must_use]
    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    /// Classify one parsed item, or drop it.
    ///
    /// Returns `None` when a general-news item fails the English screen.
    /// Wire, investor-relations, and filing feeds skip the screen: they
    /// are English by construction and the screen's false negatives would
    /// cost real releases.
    #[must_use]
    pub fn classify(&self, item: FeedItem) -> Option<ClassifiedItem> {
        let text = format!("{} {}", item.title, item.description);

        if item.feed_kind == FeedKind::GeneralNews && !self.language.is_english_content(&text) {
            return None;
        }

        let signal = self.fintech.detect_fintech_content(&item.title, &item.description);
        let company_mentions = matcher::extract_company_mentions(&text, &self.companies);
        let scored = matcher::calculate_relevance_score(&item, &self.companies);

        Some(ClassifiedItem {
            item,
            company_mentions,
            matched_company: scored.matched_company,
            relevance_score: scored.score,
            is_fintech: signal.is_fintech,
            fintech_categories: signal.categories,
            fintech_relevance_score: signal.relevance_score,
            matched_keywords: signal.matched_keywords,
        })
    }
}
