//! Publisher URL resolution and article content extraction.
//!
//! Feed items frequently link to Google News wrapper pages instead of the
//! publisher article. [`resolver`] turns wrapper links into publisher URLs
//! and [`ContentExtractor`] pulls a sanitized article body out of the page
//! behind them, with extraction outcomes tracked per instance in
//! [`ExtractionMetrics`].

pub mod client;
pub mod error;
pub mod extract;
pub mod metrics;
pub mod quality;
pub mod resolver;
mod sanitize;
mod sites;

pub use client::{build_browser_client, fetch_html_with_retries};
pub use error::{ExtractError, ResolveError};
pub use extract::{ContentExtractor, ExtractOptions, ExtractedContent};
pub use metrics::{ExtractionMetrics, MetricsSnapshot, StrategyFamily};
pub use quality::validate_content_quality;
pub use resolver::{
    is_google_news_url, is_valid_article_url, GoogleNewsResolver, Resolution, ResolutionCache,
    ResolvedVia,
};
