//! Per-company poll orchestration.
//!
//! One run per company: open a poll-log entry, fetch and classify the
//! company's feeds, dedup in-batch, sort, hash-check against the store,
//! persist what is new, and drive the entry to a terminal status exactly
//! once. A company's failure never aborts sibling companies; the caller's
//! loop isolates per company the way the fetcher isolates per feed.

use std::collections::HashMap;

use chrono::Utc;
use presswatch_core::{ClassifiedItem, Company, FeedConfig};
use presswatch_store::{
    ContentStore, NewRelease, PollLogEntry, PollLogStore, PollOutcome, StoreError,
};

use crate::classify::Classifier;
use crate::dedup::remove_duplicates;
use crate::feed::{search_feed_for_company, FeedFetcher, FetchSummary};
use crate::hash::{generate_content_hash, HashFields};
use crate::matcher::sort_by_relevance;
use crate::text;

/// Character budget for the stored summary field.
const SUMMARY_MAX_CHARS: usize = 200;

/// Feeds polled for one company: the derived Google News search feed plus
/// every configured feed whose declared source name matches the company.
#[must_use]
pub fn company_feeds(company: &Company, configured: &[FeedConfig]) -> Vec<FeedConfig> {
    let company_name = company.name.to_lowercase();
    let mut feeds = vec![search_feed_for_company(company)];
    feeds.extend(
        configured
            .iter()
            .filter(|feed| feed.name.to_lowercase() == company_name)
            .cloned(),
    );
    feeds
}

/// Run one poll for one company over `feeds`.
///
/// The returned entry is terminal: `Success` with found/new/duplicate
/// counts, or `Error` with a message and serialized per-feed detail. A
/// partial feed failure still counts the items the other feeds produced;
/// only all feeds failing, or the store failing, marks the run as an error.
///
/// # Errors
///
/// Returns `StoreError` only when the poll log itself cannot be written;
/// every other failure lands in the entry.
pub async fn run_company_poll(
    fetcher: &FeedFetcher,
    classifier: &Classifier,
    store: &dyn ContentStore,
    poll_log: &dyn PollLogStore,
    user_id: &str,
    company: &Company,
    feeds: &[FeedConfig],
) -> Result<PollLogEntry, StoreError> {
    let entry = poll_log.create_entry(&company.id, Utc::now()).await?;

    let outcome = match poll_feeds(fetcher, classifier, store, user_id, company, feeds).await {
        Ok(tally) => {
            tracing::info!(
                company = %company.id,
                found = tally.found,
                new = tally.new,
                duplicate = tally.duplicate,
                "poll completed"
            );
            PollOutcome::Success {
                found: tally.found,
                new: tally.new,
                duplicate: tally.duplicate,
            }
        }
        Err(failure) => {
            tracing::warn!(company = %company.id, error = %failure.message, "poll failed");
            PollOutcome::Error {
                message: failure.message,
                detail: failure.detail,
            }
        }
    };

    poll_log.complete_entry(entry.id, outcome).await
}

struct PollTally {
    found: u32,
    new: u32,
    duplicate: u32,
}

struct PollFailure {
    message: String,
    detail: Option<String>,
}

impl PollFailure {
    fn from_store(e: &StoreError) -> Self {
        Self {
            message: format!("store error: {e}"),
            detail: None,
        }
    }
}

async fn poll_feeds(
    fetcher: &FeedFetcher,
    classifier: &Classifier,
    store: &dyn ContentStore,
    user_id: &str,
    company: &Company,
    feeds: &[FeedConfig],
) -> Result<PollTally, PollFailure> {
    let results = fetcher.fetch_all_feeds(feeds, classifier).await;
    let summary = FetchSummary::aggregate(&results);
    tracing::debug!(
        company = %company.id,
        feeds = summary.per_feed.len(),
        failed = summary.failed_feeds,
        items = summary.total_items,
        "company feeds fetched"
    );

    if !results.is_empty() && summary.failed_feeds == results.len() {
        let errors: HashMap<&str, &str> = results
            .iter()
            .filter_map(|r| r.error.as_deref().map(|e| (r.feed_id.as_str(), e)))
            .collect();
        return Err(PollFailure {
            message: format!("all {} feeds failed", results.len()),
            detail: serde_json::to_string(&errors).ok(),
        });
    }

    let all_items: Vec<ClassifiedItem> =
        results.into_iter().flat_map(|result| result.items).collect();
    let outcome = remove_duplicates(all_items);
    if outcome.duplicates_removed > 0 {
        tracing::debug!(
            company = %company.id,
            removed = outcome.duplicates_removed,
            "in-batch duplicates removed"
        );
    }
    let mut items = outcome.items;
    sort_by_relevance(&mut items);

    let found = u32::try_from(items.len()).unwrap_or(u32::MAX);
    let mut new_count: u32 = 0;
    let mut duplicate: u32 = 0;

    for classified in &items {
        let release = to_new_release(classified);
        let existing = store
            .find_by_hash(user_id, &company.id, &release.content_hash)
            .await
            .map_err(|e| PollFailure::from_store(&e))?;
        if existing.is_some() {
            duplicate += 1;
            tracing::debug!(
                company = %company.id,
                link = %classified.item.link,
                "duplicate release skipped"
            );
            continue;
        }
        store
            .save(user_id, &company.id, release)
            .await
            .map_err(|e| PollFailure::from_store(&e))?;
        new_count += 1;
    }

    Ok(PollTally {
        found,
        new: new_count,
        duplicate,
    })
}

/// Storable projection of a classified item. The description arrives from
/// the parser already stripped to plain text, so only the summary budget
/// and the fingerprint are applied here.
fn to_new_release(classified: &ClassifiedItem) -> NewRelease {
    let item = &classified.item;
    NewRelease {
        title: item.title.clone(),
        summary: text::truncate_chars(&item.description, SUMMARY_MAX_CHARS),
        content: item.description.clone(),
        link: item.link.clone(),
        source_name: item.source_name.clone(),
        feed_kind: item.feed_kind,
        published_at: item.published_at,
        content_hash: generate_content_hash(
            &item.title,
            &item.description,
            item.published_at,
            HashFields::default(),
        ),
        fintech_categories: classified.fintech_categories.clone(),
        relevance_score: classified.relevance_score,
    }
}
