use chrono::{DateTime, Utc};
use presswatch_core::{FeedKind, FintechCategory};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Releases
// ---------------------------------------------------------------------------

/// A release ready to persist: the storable projection of a classified feed
/// item, built by the poll job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRelease {
    pub title: String,
    /// Feed-supplied description truncated to the summary budget.
    pub summary: String,
    pub content: String,
    pub link: String,
    pub source_name: String,
    pub feed_kind: FeedKind,
    pub published_at: Option<DateTime<Utc>>,
    /// Exact content fingerprint used for the pre-insert duplicate check.
    pub content_hash: String,
    pub fintech_categories: Vec<FintechCategory>,
    pub relevance_score: i64,
}

/// A persisted release as returned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRelease {
    pub id: Uuid,
    pub user_id: String,
    pub company_id: String,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub link: String,
    pub source_name: String,
    pub feed_kind: FeedKind,
    pub published_at: Option<DateTime<Utc>>,
    pub content_hash: String,
    pub fintech_categories: Vec<FintechCategory>,
    pub relevance_score: i64,
    pub created_at: DateTime<Utc>,
}

/// Filters for `ContentStore::query`. All fields are conjunctive.
#[derive(Debug, Clone, Default)]
pub struct ReleaseFilters {
    pub company_id: Option<String>,
    pub only_fintech: bool,
    pub since: Option<DateTime<Utc>>,
    pub min_relevance: Option<i64>,
}

// ---------------------------------------------------------------------------
// Poll log
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollStatus {
    Running,
    Success,
    Error,
}

impl std::fmt::Display for PollStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PollStatus::Running => write!(f, "running"),
            PollStatus::Success => write!(f, "success"),
            PollStatus::Error => write!(f, "error"),
        }
    }
}

/// One record per company per poll run. Created as `Running`, transitioned
/// exactly once to `Success` or `Error`; retention belongs to the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollLogEntry {
    pub id: Uuid,
    pub company_id: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub status: PollStatus,
    pub releases_found: u32,
    pub releases_new: u32,
    pub releases_duplicate: u32,
    pub error_message: Option<String>,
    /// Serialized error detail for the operational dashboard.
    pub error_detail: Option<String>,
}

/// Terminal outcome written to a poll log entry.
#[derive(Debug, Clone)]
pub enum PollOutcome {
    Success {
        found: u32,
        new: u32,
        duplicate: u32,
    },
    Error {
        message: String,
        detail: Option<String>,
    },
}
