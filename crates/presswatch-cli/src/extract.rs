//! `extract` command: fetch a page and print the extracted body.

use presswatch_core::AppConfig;
use presswatch_extract::{is_google_news_url, ContentExtractor, ExtractOptions};

use crate::resolve::resolver_from_config;

/// Fetch `url` (resolving Google News wrappers first) and print the text
/// rendition of the extracted body.
///
/// # Errors
///
/// Returns an error on resolution failure, fetch failure, or when every
/// extraction strategy fails the quality gate.
pub(crate) async fn run_extract(
    config: &AppConfig,
    url: &str,
    timeout_secs: Option<u64>,
    retries: Option<u32>,
) -> anyhow::Result<()> {
    let target = resolve_if_wrapped(config, url).await?;

    let extractor = ContentExtractor::new(ExtractOptions {
        timeout_secs: timeout_secs.unwrap_or(config.extract_timeout_secs),
        max_retries: retries.unwrap_or(config.extract_max_retries),
        backoff_base_secs: config.extract_backoff_base_secs,
    })?;
    let content = extractor.extract_content_from_url(&target).await?;

    if let Some(title) = &content.title {
        println!("{title}");
    }
    println!(
        "extracted by {} (confidence {:.2})",
        content.extracted_by, content.confidence
    );
    println!();
    println!("{}", content.text);
    Ok(())
}

/// Swap a Google News wrapper URL for its publisher URL; other URLs pass
/// through untouched.
pub(crate) async fn resolve_if_wrapped(config: &AppConfig, url: &str) -> anyhow::Result<String> {
    if !is_google_news_url(url) {
        return Ok(url.to_string());
    }
    let resolver = resolver_from_config(config)?;
    let resolution = resolver.resolve(url).await?;
    tracing::info!(wrapper = url, publisher = %resolution.final_url, "resolved wrapper link");
    Ok(resolution.final_url)
}
