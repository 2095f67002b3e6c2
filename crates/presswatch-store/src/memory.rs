//! In-memory store implementation, used by tests and `--dry-run` polls.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::StoreError;
use crate::types::{
    NewRelease, PollLogEntry, PollOutcome, PollStatus, ReleaseFilters, StoredRelease,
};
use crate::{ContentStore, PollLogStore};

#[derive(Debug, Default)]
pub struct MemoryStore {
    releases: Mutex<Vec<StoredRelease>>,
    poll_log: Mutex<Vec<PollLogEntry>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn save(
        &self,
        user_id: &str,
        company_id: &str,
        release: NewRelease,
    ) -> Result<StoredRelease, StoreError> {
        let stored = StoredRelease {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            company_id: company_id.to_string(),
            title: release.title,
            summary: release.summary,
            content: release.content,
            link: release.link,
            source_name: release.source_name,
            feed_kind: release.feed_kind,
            published_at: release.published_at,
            content_hash: release.content_hash,
            fintech_categories: release.fintech_categories,
            relevance_score: release.relevance_score,
            created_at: Utc::now(),
        };
        let mut releases = self.releases.lock().map_err(poisoned)?;
        releases.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_hash(
        &self,
        user_id: &str,
        company_id: &str,
        hash: &str,
    ) -> Result<Option<StoredRelease>, StoreError> {
        let releases = self.releases.lock().map_err(poisoned)?;
        Ok(releases
            .iter()
            .find(|r| {
                r.user_id == user_id && r.company_id == company_id && r.content_hash == hash
            })
            .cloned())
    }

    async fn query(
        &self,
        user_id: &str,
        filters: &ReleaseFilters,
    ) -> Result<Vec<StoredRelease>, StoreError> {
        let releases = self.releases.lock().map_err(poisoned)?;
        let mut matched: Vec<StoredRelease> = releases
            .iter()
            .filter(|r| r.user_id == user_id)
            .filter(|r| {
                filters
                    .company_id
                    .as_ref()
                    .is_none_or(|c| &r.company_id == c)
            })
            .filter(|r| !filters.only_fintech || !r.fintech_categories.is_empty())
            .filter(|r| {
                filters
                    .since
                    .is_none_or(|since| r.published_at.is_some_and(|p| p >= since))
            })
            .filter(|r| {
                filters
                    .min_relevance
                    .is_none_or(|min| r.relevance_score >= min)
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched)
    }

    async fn delete_past(
        &self,
        user_id: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        let mut releases = self.releases.lock().map_err(poisoned)?;
        let before = releases.len();
        releases.retain(|r| {
            r.user_id != user_id || r.published_at.is_none_or(|p| p >= cutoff)
        });
        Ok((before - releases.len()) as u64)
    }
}

#[async_trait]
impl PollLogStore for MemoryStore {
    async fn create_entry(
        &self,
        company_id: &str,
        started_at: DateTime<Utc>,
    ) -> Result<PollLogEntry, StoreError> {
        let entry = PollLogEntry {
            id: Uuid::new_v4(),
            company_id: company_id.to_string(),
            started_at,
            completed_at: None,
            status: PollStatus::Running,
            releases_found: 0,
            releases_new: 0,
            releases_duplicate: 0,
            error_message: None,
            error_detail: None,
        };
        let mut poll_log = self.poll_log.lock().map_err(poisoned)?;
        poll_log.push(entry.clone());
        Ok(entry)
    }

    async fn complete_entry(
        &self,
        id: Uuid,
        outcome: PollOutcome,
    ) -> Result<PollLogEntry, StoreError> {
        let mut poll_log = self.poll_log.lock().map_err(poisoned)?;
        let entry = poll_log
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(StoreError::NotFound)?;

        if entry.status != PollStatus::Running {
            return Err(StoreError::InvalidPollTransition {
                id,
                expected_status: "running",
            });
        }

        entry.completed_at = Some(Utc::now());
        match outcome {
            PollOutcome::Success {
                found,
                new,
                duplicate,
            } => {
                entry.status = PollStatus::Success;
                entry.releases_found = found;
                entry.releases_new = new;
                entry.releases_duplicate = duplicate;
            }
            PollOutcome::Error { message, detail } => {
                entry.status = PollStatus::Error;
                entry.error_message = Some(message);
                entry.error_detail = detail;
            }
        }
        Ok(entry.clone())
    }

    async fn entries(&self, company_id: Option<&str>) -> Result<Vec<PollLogEntry>, StoreError> {
        let poll_log = self.poll_log.lock().map_err(poisoned)?;
        Ok(poll_log
            .iter()
            .filter(|e| company_id.is_none_or(|c| e.company_id == c))
            .cloned()
            .collect())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Backend {
        message: "store mutex poisoned".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use presswatch_core::{FeedKind, FintechCategory};

    use super::*;

    fn release(title: &str, hash: &str) -> NewRelease {
        NewRelease {
            title: title.to_string(),
            summary: "summary".to_string(),
            content: "content".to_string(),
            link: format!("https://example.com/{hash}"),
            source_name: "PR Newswire".to_string(),
            feed_kind: FeedKind::PressWire,
            published_at: Some(Utc::now()),
            content_hash: hash.to_string(),
            fintech_categories: vec![FintechCategory::Markets],
            relevance_score: 100,
        }
    }

    #[tokio::test]
    async fn save_then_find_by_hash() {
        let store = MemoryStore::new();
        store
            .save("user-1", "blackstone", release("a", "hash-a"))
            .await
            .unwrap();

        let found = store
            .find_by_hash("user-1", "blackstone", "hash-a")
            .await
            .unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().title, "a");
    }

    #[tokio::test]
    async fn find_by_hash_scoped_to_user_and_company() {
        let store = MemoryStore::new();
        store
            .save("user-1", "blackstone", release("a", "hash-a"))
            .await
            .unwrap();

        assert!(store
            .find_by_hash("user-2", "blackstone", "hash-a")
            .await
            .unwrap()
            .is_none());
        assert!(store
            .find_by_hash("user-1", "stripe", "hash-a")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn query_applies_filters() {
        let store = MemoryStore::new();
        store
            .save("user-1", "blackstone", release("a", "hash-a"))
            .await
            .unwrap();
        let mut plain = release("b", "hash-b");
        plain.fintech_categories.clear();
        plain.relevance_score = 10;
        store.save("user-1", "stripe", plain).await.unwrap();

        let fintech_only = store
            .query(
                "user-1",
                &ReleaseFilters {
                    only_fintech: true,
                    ..ReleaseFilters::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(fintech_only.len(), 1);
        assert_eq!(fintech_only[0].title, "a");

        let by_company = store
            .query(
                "user-1",
                &ReleaseFilters {
                    company_id: Some("stripe".to_string()),
                    ..ReleaseFilters::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(by_company.len(), 1);
        assert_eq!(by_company[0].title, "b");

        let high_relevance = store
            .query(
                "user-1",
                &ReleaseFilters {
                    min_relevance: Some(50),
                    ..ReleaseFilters::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(high_relevance.len(), 1);
    }

    #[tokio::test]
    async fn delete_past_removes_older_releases() {
        let store = MemoryStore::new();
        let mut old = release("old", "hash-old");
        old.published_at = Some(Utc::now() - chrono::Duration::days(120));
        store.save("user-1", "blackstone", old).await.unwrap();
        store
            .save("user-1", "blackstone", release("new", "hash-new"))
            .await
            .unwrap();

        let cutoff = Utc::now() - chrono::Duration::days(90);
        let deleted = store.delete_past("user-1", cutoff).await.unwrap();
        assert_eq!(deleted, 1);

        let remaining = store
            .query("user-1", &ReleaseFilters::default())
            .await
            .unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title, "new");
    }

    #[tokio::test]
    async fn poll_log_success_lifecycle() {
        let store = MemoryStore::new();
        let entry = store.create_entry("blackstone", Utc::now()).await.unwrap();
        assert_eq!(entry.status, PollStatus::Running);

        let done = store
            .complete_entry(
                entry.id,
                PollOutcome::Success {
                    found: 12,
                    new: 3,
                    duplicate: 9,
                },
            )
            .await
            .unwrap();
        assert_eq!(done.status, PollStatus::Success);
        assert_eq!(done.releases_found, 12);
        assert_eq!(done.releases_new, 3);
        assert_eq!(done.releases_duplicate, 9);
        assert!(done.completed_at.is_some());
    }

    #[tokio::test]
    async fn poll_log_error_records_message() {
        let store = MemoryStore::new();
        let entry = store.create_entry("stripe", Utc::now()).await.unwrap();
        let done = store
            .complete_entry(
                entry.id,
                PollOutcome::Error {
                    message: "feed fetch failed".to_string(),
                    detail: Some("{\"feed\":\"x\"}".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(done.status, PollStatus::Error);
        assert_eq!(done.error_message.as_deref(), Some("feed fetch failed"));
        assert!(done.error_detail.is_some());
    }

    #[tokio::test]
    async fn poll_log_rejects_double_completion() {
        let store = MemoryStore::new();
        let entry = store.create_entry("stripe", Utc::now()).await.unwrap();
        store
            .complete_entry(
                entry.id,
                PollOutcome::Success {
                    found: 0,
                    new: 0,
                    duplicate: 0,
                },
            )
            .await
            .unwrap();

        let err = store
            .complete_entry(
                entry.id,
                PollOutcome::Error {
                    message: "late".to_string(),
                    detail: None,
                },
            )
            .await
            .unwrap_err();
        assert!(
            matches!(err, StoreError::InvalidPollTransition { .. }),
            "expected InvalidPollTransition, got: {err:?}"
        );
    }
}
