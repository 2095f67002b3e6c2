//! Completion-service client producing structured press-release summaries.

pub mod client;
pub mod error;
pub mod types;

pub use client::CompletionClient;
pub use error::CompletionError;
pub use types::{
    Highlight, HighlightKind, Summary, DEFAULT_SYSTEM_PROMPT, DEFAULT_USER_PROMPT_TEMPLATE,
};
