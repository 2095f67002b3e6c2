//! Feed acquisition: HTTP fetch with body gates, concurrent fan-out with
//! per-feed isolation, and derived per-company search feeds.

use std::collections::HashMap;
use std::time::Duration;

use futures::future::join_all;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use presswatch_core::{ClassifiedItem, Company, FeedConfig, FeedKind};
use reqwest::header;

use crate::classify::Classifier;
use crate::error::IngestError;

mod parse;

pub use parse::parse_feed_xml;

/// Accept header sent with every feed request.
const FEED_ACCEPT: &str = "application/rss+xml, application/xml, text/xml";

/// Parse outcome for one feed body.
#[derive(Debug)]
pub struct ParsedFeed {
    pub items: Vec<ClassifiedItem>,
    /// Items dropped at parse time for a missing title or link.
    pub skipped: usize,
    /// General-news items dropped by the English screen.
    pub dropped_non_english: usize,
}

/// Outcome of one feed fetch: items on success, the error string on
/// failure, never both.
#[derive(Debug)]
pub struct FeedFetchResult {
    pub feed_id: String,
    pub feed_kind: FeedKind,
    pub items: Vec<ClassifiedItem>,
    pub skipped_items: usize,
    pub dropped_non_english: usize,
    pub error: Option<String>,
}

impl FeedFetchResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregate counts across one batch of fetches.
#[derive(Debug, Default)]
pub struct FetchSummary {
    /// `(feed_id, item count)` in batch order; failed feeds count zero.
    pub per_feed: Vec<(String, usize)>,
    pub total_items: usize,
    pub failed_feeds: usize,
    pub by_kind: HashMap<FeedKind, usize>,
}

impl FetchSummary {
    /// Roll up a batch of per-feed results.
    #[must_use]
    pub fn aggregate(results: &[FeedFetchResult]) -> Self {
        let mut summary = Self::default();
        for result in results {
            if !result.is_success() {
                summary.failed_feeds += 1;
            }
            summary.total_items += result.items.len();
            summary.per_feed.push((result.feed_id.clone(), result.items.len()));
            *summary.by_kind.entry(result.feed_kind).or_default() += result.items.len();
        }
        summary
    }
}

/// HTTP client for feed endpoints. One instance per run; connection pooling
/// lives inside `reqwest`.
pub struct FeedFetcher {
    client: reqwest::Client,
}

impl FeedFetcher {
    /// Build the fetcher with the pipeline User-Agent and request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Http`] if the underlying client cannot be
    /// constructed (TLS backend initialization).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, IngestError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetch one feed and classify its items.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::UnexpectedStatus`] on a non-2xx response,
    /// [`IngestError::EmptyFeed`] on a blank body,
    /// [`IngestError::NotRss`] when the body contains neither `<rss` nor
    /// `<feed`, and [`IngestError::Http`] on transport failures.
    pub async fn fetch_feed(
        &self,
        feed: &FeedConfig,
        classifier: &Classifier,
    ) -> Result<ParsedFeed, IngestError> {
        let response = self
            .client
            .get(&feed.url)
            .header(header::ACCEPT, FEED_ACCEPT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(IngestError::UnexpectedStatus {
                status: status.as_u16(),
                url: feed.url.clone(),
            });
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(IngestError::EmptyFeed {
                url: feed.url.clone(),
            });
        }
        if !body.contains("<rss") && !body.contains("<feed") {
            return Err(IngestError::NotRss {
                url: feed.url.clone(),
            });
        }

        parse::parse_feed_xml(&body, feed, classifier)
    }

    /// Fetch every feed concurrently. A failing feed becomes a result with
    /// `error: Some(..)` without touching its siblings; results come back
    /// in `feeds` order.
    pub async fn fetch_all_feeds(
        &self,
        feeds: &[FeedConfig],
        classifier: &Classifier,
    ) -> Vec<FeedFetchResult> {
        let fetches = feeds.iter().map(|feed| async move {
            match self.fetch_feed(feed, classifier).await {
                Ok(parsed) => {
                    tracing::debug!(
                        feed = %feed.id,
                        items = parsed.items.len(),
                        skipped = parsed.skipped,
                        dropped_non_english = parsed.dropped_non_english,
                        "feed fetched"
                    );
                    FeedFetchResult {
                        feed_id: feed.id.clone(),
                        feed_kind: feed.kind,
                        items: parsed.items,
                        skipped_items: parsed.skipped,
                        dropped_non_english: parsed.dropped_non_english,
                        error: None,
                    }
                }
                Err(e) => {
                    tracing::warn!(feed = %feed.id, error = %e, "feed fetch failed");
                    FeedFetchResult {
                        feed_id: feed.id.clone(),
                        feed_kind: feed.kind,
                        items: Vec::new(),
                        skipped_items: 0,
                        dropped_non_english: 0,
                        error: Some(e.to_string()),
                    }
                }
            }
        });
        join_all(fetches).await
    }
}

/// Derived Google News search feed for one company: the quoted canonical
/// name OR'd with each quoted alias.
#[must_use]
pub fn search_feed_for_company(company: &Company) -> FeedConfig {
    let mut query = format!("\"{}\"", company.name);
    for variation in &company.variations {
        query.push_str(" OR \"");
        query.push_str(variation);
        query.push('"');
    }
    let encoded = utf8_percent_encode(&query, NON_ALPHANUMERIC).to_string();
    FeedConfig {
        id: format!("google-news-{}", company.id),
        name: "Google News".to_string(),
        url: format!(
            "https://news.google.com/rss/search?q={encoded}&hl=en-US&gl=US&ceid=US:en"
        ),
        kind: FeedKind::GeneralNews,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_feed_quotes_name_and_aliases() {
        let company = Company {
            id: "blackstone".to_string(),
            name: "Blackstone".to_string(),
            variations: vec!["Blackstone Group".to_string(), "BX".to_string()],
        };
        let feed = search_feed_for_company(&company);
        assert_eq!(feed.id, "google-news-blackstone");
        assert_eq!(feed.kind, FeedKind::GeneralNews);
        assert!(feed.url.starts_with("https://news.google.com/rss/search?q="));
        assert!(feed.url.contains("%22Blackstone%22%20OR%20%22Blackstone%20Group%22"));
        assert!(feed.url.ends_with("&hl=en-US&gl=US&ceid=US:en"));
    }

    #[test]
    fn aggregate_rolls_up_counts_and_failures() {
        let results = vec![
            FeedFetchResult {
                feed_id: "wire".to_string(),
                feed_kind: FeedKind::PressWire,
                items: Vec::new(),
                skipped_items: 0,
                dropped_non_english: 0,
                error: None,
            },
            FeedFetchResult {
                feed_id: "news".to_string(),
                feed_kind: FeedKind::GeneralNews,
                items: Vec::new(),
                skipped_items: 0,
                dropped_non_english: 0,
                error: Some("feed down".to_string()),
            },
        ];
        let summary = FetchSummary::aggregate(&results);
        assert_eq!(summary.per_feed.len(), 2);
        assert_eq!(summary.total_items, 0);
        assert_eq!(summary.failed_feeds, 1);
        assert_eq!(summary.by_kind.get(&FeedKind::PressWire), Some(&0));
    }
}
