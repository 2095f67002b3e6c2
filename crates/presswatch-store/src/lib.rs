//! Storage seams for the presswatch pipeline.
//!
//! The relational backend is an external collaborator; the pipeline only
//! speaks the verbs below. [`MemoryStore`] implements both traits for tests
//! and dry runs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub mod error;
pub mod memory;
pub mod types;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use types::{
    NewRelease, PollLogEntry, PollOutcome, PollStatus, ReleaseFilters, StoredRelease,
};

/// Persistence verbs for releases.
///
/// Invariant: two releases with the same content hash under the same
/// `(user_id, company_id)` are the same release. Callers check
/// [`ContentStore::find_by_hash`] before [`ContentStore::save`].
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn save(
        &self,
        user_id: &str,
        company_id: &str,
        release: NewRelease,
    ) -> Result<StoredRelease, StoreError>;

    async fn find_by_hash(
        &self,
        user_id: &str,
        company_id: &str,
        hash: &str,
    ) -> Result<Option<StoredRelease>, StoreError>;

    async fn query(
        &self,
        user_id: &str,
        filters: &ReleaseFilters,
    ) -> Result<Vec<StoredRelease>, StoreError>;

    /// Deletes releases published before `cutoff`; returns how many went.
    async fn delete_past(&self, user_id: &str, cutoff: DateTime<Utc>)
        -> Result<u64, StoreError>;
}

/// Poll-run audit log. One entry per company per run; entries transition
/// from `Running` to a terminal status exactly once.
#[async_trait]
pub trait PollLogStore: Send + Sync {
    async fn create_entry(
        &self,
        company_id: &str,
        started_at: DateTime<Utc>,
    ) -> Result<PollLogEntry, StoreError>;

    async fn complete_entry(
        &self,
        id: Uuid,
        outcome: PollOutcome,
    ) -> Result<PollLogEntry, StoreError>;

    async fn entries(&self, company_id: Option<&str>) -> Result<Vec<PollLogEntry>, StoreError>;
}
