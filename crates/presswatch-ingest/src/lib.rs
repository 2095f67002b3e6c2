//! Feed acquisition and classification for the presswatch pipeline.
//!
//! The path from feed URL to storable release: fetch (isolated per feed),
//! parse, language-screen, classify, company-match, dedup, sort,
//! fingerprint, persist. [`poll::run_company_poll`] strings the steps
//! together for one company; everything below it is a pure function over
//! its inputs.

pub mod classify;
pub mod dedup;
pub mod error;
pub mod feed;
pub mod fintech;
pub mod hash;
pub mod language;
pub mod matcher;
pub mod poll;
pub mod text;

pub use classify::Classifier;
pub use dedup::{remove_duplicates, DedupOutcome};
pub use error::IngestError;
pub use feed::{
    parse_feed_xml, search_feed_for_company, FeedFetchResult, FeedFetcher, FetchSummary,
    ParsedFeed,
};
pub use fintech::{FintechClassifier, FintechSignal};
pub use hash::{generate_content_hash, generate_fuzzy_hashes, FuzzyHashes, HashFields};
pub use language::LanguageFilter;
pub use matcher::{
    calculate_relevance_score, extract_company_mentions, sort_by_relevance, MatchScore,
};
pub use poll::{company_feeds, run_company_poll};
