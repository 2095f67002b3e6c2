//! Browser-profile HTTP client for article and wrapper pages.

use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::redirect::Policy;

use crate::error::ExtractError;

/// Several wire services serve bot user agents a consent or cookie wall
/// instead of the article, so the client presents a desktop browser.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
const MAX_REDIRECTS: usize = 10;

/// Ceiling on any single retry delay.
const BACKOFF_CAP_SECS: u64 = 5;

/// Build a client that follows redirects and looks like a desktop browser.
///
/// # Errors
///
/// Returns the underlying `reqwest` error if the client cannot be built.
pub fn build_browser_client(timeout_secs: u64) -> Result<reqwest::Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static(ACCEPT_LANGUAGE),
    );

    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(BROWSER_USER_AGENT)
        .default_headers(headers)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .build()
}

/// GET `url` expecting an HTML page, retrying network-level failures.
///
/// Retries use exponential backoff from `backoff_base_secs`, capped at
/// five seconds per wait. A non-2xx status or a non-HTML content type
/// aborts immediately: the server answered, it just declined. The final
/// failure propagates the last error observed.
///
/// # Errors
///
/// Returns [`ExtractError::Http`] on a non-2xx response,
/// [`ExtractError::NotHtml`] when the content type is not HTML, and
/// [`ExtractError::Request`] once network retries are exhausted.
pub async fn fetch_html_with_retries(
    client: &reqwest::Client,
    url: &str,
    max_retries: u32,
    backoff_base_secs: u64,
) -> Result<String, ExtractError> {
    let mut attempt: u32 = 0;

    loop {
        match fetch_html_once(client, url).await {
            Ok(body) => return Ok(body),
            Err(err) => {
                let retriable = matches!(err, ExtractError::Request(_));
                if !retriable || attempt >= max_retries {
                    return Err(err);
                }

                let delay = backoff_delay(attempt, backoff_base_secs);
                tracing::warn!(
                    url,
                    attempt,
                    max_retries,
                    delay_secs = delay.as_secs(),
                    error = %err,
                    "transient fetch error, retrying after backoff"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

async fn fetch_html_once(client: &reqwest::Client, url: &str) -> Result<String, ExtractError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ExtractError::Http {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    if !content_type.is_empty() && !content_type.contains("html") {
        return Err(ExtractError::NotHtml {
            content_type,
            url: url.to_string(),
        });
    }

    Ok(response.text().await?)
}

/// Delay before retry `attempt` (0-based): `base * 2^attempt`, capped.
fn backoff_delay(attempt: u32, backoff_base_secs: u64) -> Duration {
    let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
    Duration::from_secs(delay_secs.min(BACKOFF_CAP_SECS))
}
