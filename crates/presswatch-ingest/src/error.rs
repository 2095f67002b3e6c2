use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed {url} returned HTTP status {status}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("feed {url} returned an empty body")]
    EmptyFeed { url: String },

    #[error("feed {url} body is neither RSS nor Atom")]
    NotRss { url: String },

    #[error("feed XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("keyword pattern failed to compile: {0}")]
    Pattern(#[from] regex::Error),
}
