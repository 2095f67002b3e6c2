use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Opaque failure from the backing store.
    #[error("store backend error: {message}")]
    Backend { message: String },

    #[error("record not found")]
    NotFound,

    /// A poll log entry was completed twice, or completed without being
    /// created first.
    #[error("poll log entry {id} is not in '{expected_status}' status")]
    InvalidPollTransition {
        id: Uuid,
        expected_status: &'static str,
    },
}
