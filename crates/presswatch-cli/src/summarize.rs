//! `summarize` command: extract a page, then run it through the completion
//! service.

use presswatch_core::AppConfig;
use presswatch_extract::{ContentExtractor, ExtractOptions};
use presswatch_summarize::{CompletionClient, DEFAULT_SYSTEM_PROMPT, DEFAULT_USER_PROMPT_TEMPLATE};

use crate::extract::resolve_if_wrapped;

/// Completions tolerate slow models; page fetches never need this long.
const COMPLETION_TIMEOUT_SECS: u64 = 60;

/// Extract `url` and print the structured summary the completion service
/// returns for it.
///
/// # Errors
///
/// Returns an error if extraction fails, the API key is missing, or the
/// completion service rejects the request.
pub(crate) async fn run_summarize(config: &AppConfig, url: &str) -> anyhow::Result<()> {
    let api_key = config.summarize_credential()?;
    let target = resolve_if_wrapped(config, url).await?;

    let extractor = ContentExtractor::new(ExtractOptions {
        timeout_secs: config.extract_timeout_secs,
        max_retries: config.extract_max_retries,
        backoff_base_secs: config.extract_backoff_base_secs,
    })?;
    let content = extractor.extract_content_from_url(&target).await?;
    let title = content.title.as_deref().unwrap_or(&target);

    let client = CompletionClient::with_base_url(
        api_key,
        &config.summarize_model,
        COMPLETION_TIMEOUT_SECS,
        &config.summarize_base_url,
    )?;
    let summary = client
        .summarize(
            title,
            &content.text,
            DEFAULT_SYSTEM_PROMPT,
            DEFAULT_USER_PROMPT_TEMPLATE,
        )
        .await?;

    println!("{}", summary.summary);
    if !summary.key_points.is_empty() {
        println!();
        println!("key points:");
        for point in &summary.key_points {
            println!("  - {point}");
        }
    }
    if !summary.highlights.is_empty() {
        println!();
        println!("highlights:");
        for highlight in &summary.highlights {
            println!("  [{}] {}", highlight.kind.as_str(), highlight.text);
        }
    }
    Ok(())
}
