use thiserror::Error;

/// Failures from the completion service, classified so callers can decide
/// between aborting, backing off, and surfacing a degraded result.
///
/// Network-level errors are folded into [`CompletionError::UpstreamUnavailable`]
/// rather than exposed as a transport type.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion service rejected the credential")]
    InvalidCredential,

    #[error("completion service rate limited the request")]
    RateLimited { retry_after: Option<u64> },

    #[error("completion request was malformed: {detail}")]
    MalformedRequest { detail: String },

    #[error("completion service unavailable: {detail}")]
    UpstreamUnavailable { detail: String },

    #[error("completion service returned no content")]
    NoContent,
}
