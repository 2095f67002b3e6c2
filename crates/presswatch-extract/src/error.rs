use thiserror::Error;

/// Failures while fetching or extracting article content.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{url} returned HTTP status {status}")]
    Http { status: u16, url: String },

    #[error("{url} served non-HTML content-type {content_type}")]
    NotHtml { content_type: String, url: String },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("no extraction strategy passed the quality gate ({attempts} candidates tried)")]
    QualityRejected { attempts: usize },

    #[error("not a fetchable article URL: {url}")]
    InvalidUrl { url: String },
}

/// Failures while resolving a Google News redirect URL.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("not a Google News article URL: {url}")]
    NotGoogleNews { url: String },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("wrapper page returned HTTP status {status}")]
    Http { status: u16 },

    #[error("could not resolve a publisher URL: {detail}")]
    Unresolvable { detail: String },
}
