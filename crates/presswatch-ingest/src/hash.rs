//! Content fingerprints for duplicate suppression.
//!
//! Two copies of the same release routinely differ in markup, casing, and
//! whitespace density between wire services, so fields are normalized
//! before hashing. The fingerprint is a stable cross-process contract:
//! stored hashes outlive any single run.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::text;

/// Which normalized fields participate in the fingerprint.
#[derive(Debug, Clone, Copy)]
pub struct HashFields {
    pub title: bool,
    pub content: bool,
    pub published_at: bool,
}

impl Default for HashFields {
    fn default() -> Self {
        Self {
            title: true,
            content: true,
            published_at: true,
        }
    }
}

/// The exact fingerprint plus partial variants for near-duplicate
/// diagnostics (same story re-dated, retitled, or trimmed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyHashes {
    pub exact: String,
    pub title_only: String,
    pub content_only: String,
    pub title_date: String,
}

/// SHA-256 fingerprint over the selected normalized fields, lowercase hex.
///
/// Normalization: title lowercased with whitespace collapsed; content
/// stripped of HTML (entities decoded) then lowercased; the timestamp
/// rendered as UTC epoch seconds, empty when absent. Each included field
/// carries its name as a prefix so adjacent fields cannot collide, and
/// fields join on `|`.
#[must_use]
pub fn generate_content_hash(
    title: &str,
    content: &str,
    published_at: Option<DateTime<Utc>>,
    fields: HashFields,
) -> String {
    let mut parts = Vec::with_capacity(3);
    if fields.title {
        parts.push(format!(
            "title:{}",
            text::collapse_whitespace(&title.to_lowercase())
        ));
    }
    if fields.content {
        parts.push(format!("content:{}", text::strip_html(content).to_lowercase()));
    }
    if fields.published_at {
        let stamp = published_at.map_or_else(String::new, |ts| ts.timestamp().to_string());
        parts.push(format!("date:{stamp}"));
    }

    let digest = Sha256::digest(parts.join("|").as_bytes());
    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}

/// The exact hash plus title-only, content-only, and title+date variants.
#[must_use]
pub fn generate_fuzzy_hashes(
    title: &str,
    content: &str,
    published_at: Option<DateTime<Utc>>,
) -> FuzzyHashes {
    FuzzyHashes {
        exact: generate_content_hash(title, content, published_at, HashFields::default()),
        title_only: generate_content_hash(
            title,
            content,
            published_at,
            HashFields {
                title: true,
                content: false,
                published_at: false,
            },
        ),
        content_only: generate_content_hash(
            title,
            content,
            published_at,
            HashFields {
                title: false,
                content: true,
                published_at: false,
            },
        ),
        title_date: generate_content_hash(
            title,
            content,
            published_at,
            HashFields {
                title: true,
                content: false,
                published_at: true,
            },
        ),
    }
}
