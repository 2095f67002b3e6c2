//! Google News redirect resolution.
//!
//! Feed items from Google News point at `news.google.com/rss/articles/<id>`
//! wrapper pages rather than the publisher article. Resolution walks a
//! ladder: follow the redirect, mine the wrapper markup for the target URL,
//! decode the article id, and as a last resort infer a coarse section URL
//! from a publisher hint in the query string.

mod cache;

pub use cache::ResolutionCache;

use std::collections::HashMap;
use std::time::Duration;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use regex::Regex;

use crate::client;
use crate::error::ResolveError;
use crate::sites;

/// How a resolution was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedVia {
    Redirect,
    DataUrl,
    AnchorHref,
    ScriptUrl,
    MetaTag,
    DecodedArticleId,
    SourceHint,
}

impl ResolvedVia {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ResolvedVia::Redirect => "redirect",
            ResolvedVia::DataUrl => "data-url",
            ResolvedVia::AnchorHref => "anchor-href",
            ResolvedVia::ScriptUrl => "script-url",
            ResolvedVia::MetaTag => "meta-tag",
            ResolvedVia::DecodedArticleId => "decoded-article-id",
            ResolvedVia::SourceHint => "source-hint",
        }
    }
}

/// A publisher URL recovered from a Google News wrapper link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub final_url: String,
    pub redirect_chain: Vec<String>,
    pub via: ResolvedVia,
    pub cached: bool,
}

/// Path tokens that mark listing or search pages rather than articles.
const NON_ARTICLE_PATH_TOKENS: &[&str] = &[
    "/search", "/category", "/categories", "/tag/", "/tags/", "/topic/", "/topics/", "/author/",
    "/authors/", "/feed", "/rss",
];

/// Whether `url` is a Google News article wrapper link.
#[must_use]
pub fn is_google_news_url(url: &str) -> bool {
    let Ok(parsed) = reqwest::Url::parse(url) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };

    let host = host.to_lowercase();
    let on_google_news = host == "news.google.com" || host.ends_with(".news.google.com");
    on_google_news
        && (parsed.path().starts_with("/rss/articles/") || parsed.path().starts_with("/articles/"))
}

/// Whether `url` looks like a publisher article we are willing to fetch:
/// HTTPS, an allow-listed publisher host, a real path, and no listing-page
/// markers.
#[must_use]
pub fn is_valid_article_url(url: &str) -> bool {
    let Ok(parsed) = reqwest::Url::parse(url) else {
        return false;
    };
    if parsed.scheme() != "https" {
        return false;
    }
    let Some(host) = parsed.host_str() else {
        return false;
    };
    if !sites::is_allowed_article_host(&host.to_lowercase()) {
        return false;
    }

    let path = parsed.path();
    if path.len() < 5 {
        return false;
    }
    let lower = path.to_lowercase();
    !NON_ARTICLE_PATH_TOKENS
        .iter()
        .any(|token| lower.contains(token))
}

/// Resolves Google News wrapper links to publisher article URLs.
pub struct GoogleNewsResolver {
    client: reqwest::Client,
    cache: ResolutionCache,
}

impl GoogleNewsResolver {
    /// # Errors
    ///
    /// Returns [`ResolveError::Request`] if the HTTP client cannot be built.
    pub fn new(timeout_secs: u64) -> Result<Self, ResolveError> {
        Self::with_cache(timeout_secs, ResolutionCache::default())
    }

    /// # Errors
    ///
    /// Returns [`ResolveError::Request`] if the HTTP client cannot be built.
    pub fn with_cache(timeout_secs: u64, cache: ResolutionCache) -> Result<Self, ResolveError> {
        let client = client::build_browser_client(timeout_secs)?;
        Ok(Self { client, cache })
    }

    /// Resolve one wrapper URL. Successful resolutions are cached by the
    /// original URL; failures are never cached.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NotGoogleNews`] for non-wrapper URLs,
    /// [`ResolveError::Http`] or [`ResolveError::Request`] on fetch
    /// problems, and [`ResolveError::Unresolvable`] when the whole ladder
    /// comes up empty.
    pub async fn resolve(&self, url: &str) -> Result<Resolution, ResolveError> {
        if !is_google_news_url(url) {
            return Err(ResolveError::NotGoogleNews {
                url: url.to_string(),
            });
        }

        if let Some(hit) = self.cache.get(url) {
            tracing::debug!(url, final_url = %hit.final_url, "resolution cache hit");
            return Ok(hit);
        }

        let resolution = self.resolve_uncached(url).await?;
        tracing::debug!(
            url,
            final_url = %resolution.final_url,
            via = ?resolution.via,
            "resolved google news url"
        );
        self.cache.insert(url, &resolution);
        Ok(resolution)
    }

    /// Resolve `urls` in fixed-size concurrent batches with an inter-batch
    /// delay. One entry per input URL regardless of outcome.
    pub async fn resolve_batch(
        &self,
        urls: &[String],
        concurrency: usize,
        delay: Duration,
    ) -> HashMap<String, Result<Resolution, String>> {
        let concurrency = concurrency.max(1);
        let mut results = HashMap::with_capacity(urls.len());

        for (index, batch) in urls.chunks(concurrency).enumerate() {
            if index > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let outcomes = futures::future::join_all(
                batch
                    .iter()
                    .map(|url| async move { (url.clone(), self.resolve(url).await) }),
            )
            .await;

            for (url, outcome) in outcomes {
                results.insert(url, outcome.map_err(|e| e.to_string()));
            }
        }

        results
    }

    async fn resolve_uncached(&self, url: &str) -> Result<Resolution, ResolveError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::Http {
                status: status.as_u16(),
            });
        }

        let landed = response.url().clone();
        let mut redirect_chain = vec![url.to_string()];
        if landed.as_str() != url {
            redirect_chain.push(landed.to_string());
        }

        let landed_host = landed.host_str().map(str::to_lowercase).unwrap_or_default();
        let off_google = !landed_host.is_empty()
            && landed_host != "news.google.com"
            && !landed_host.ends_with(".news.google.com");
        if off_google && is_valid_article_url(landed.as_str()) {
            return Ok(Resolution {
                final_url: landed.to_string(),
                redirect_chain,
                via: ResolvedVia::Redirect,
                cached: false,
            });
        }

        let body = response.text().await?;
        if let Some((final_url, via)) = extract_from_wrapper(&body) {
            return Ok(Resolution {
                final_url,
                redirect_chain,
                via,
                cached: false,
            });
        }

        if let Some(final_url) = decode_article_id(url) {
            return Ok(Resolution {
                final_url,
                redirect_chain,
                via: ResolvedVia::DecodedArticleId,
                cached: false,
            });
        }

        if let Some(final_url) = infer_from_source_hint(url) {
            return Ok(Resolution {
                final_url,
                redirect_chain,
                via: ResolvedVia::SourceHint,
                cached: false,
            });
        }

        Err(ResolveError::Unresolvable {
            detail: format!("no publisher URL recoverable from wrapper page for {url}"),
        })
    }
}

/// Mine the wrapper page markup for the publisher URL, in ladder order.
fn extract_from_wrapper(html: &str) -> Option<(String, ResolvedVia)> {
    if let Some(url) = first_valid(data_url_candidates(html)) {
        return Some((url, ResolvedVia::DataUrl));
    }
    if let Some(url) = first_valid(anchor_candidates(html)) {
        return Some((url, ResolvedVia::AnchorHref));
    }
    if let Some(url) = first_valid(script_candidates(html)) {
        return Some((url, ResolvedVia::ScriptUrl));
    }
    if let Some(url) = first_valid(meta_candidates(html)) {
        return Some((url, ResolvedVia::MetaTag));
    }
    None
}

fn first_valid(candidates: Vec<String>) -> Option<String> {
    candidates
        .into_iter()
        .find(|candidate| is_valid_article_url(candidate))
}

fn data_url_candidates(html: &str) -> Vec<String> {
    let re = Regex::new(r#"(?is)data-(?:n-au|url)\s*=\s*["']([^"']+)["']"#)
        .expect("valid data-url regex");
    re.captures_iter(html)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().trim().to_string()))
        .collect()
}

fn anchor_candidates(html: &str) -> Vec<String> {
    let re = Regex::new(r#"(?is)<a\b[^>]*href\s*=\s*["'](https?://[^"']+)["']"#)
        .expect("valid anchor regex");
    re.captures_iter(html)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().trim().to_string()))
        .collect()
}

fn script_candidates(html: &str) -> Vec<String> {
    let script_re = Regex::new(r"(?is)<script[^>]*>(.*?)</script>").expect("valid script regex");
    let url_re = Regex::new(r"https?:[\\/]{2,4}[A-Za-z0-9\-._~:/?#@!$&()*+,;=%\\]+")
        .expect("valid embedded url regex");

    let mut candidates = Vec::new();
    for cap in script_re.captures_iter(html) {
        let body = cap.get(1).map_or("", |m| m.as_str());
        for m in url_re.find_iter(body) {
            candidates.push(unescape_js_url(m.as_str()));
        }
    }
    candidates
}

fn meta_candidates(html: &str) -> Vec<String> {
    let re = Regex::new(r#"(?is)<meta\b[^>]*content\s*=\s*["'](https?://[^"']+)["']"#)
        .expect("valid meta regex");
    re.captures_iter(html)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().trim().to_string()))
        .collect()
}

fn unescape_js_url(raw: &str) -> String {
    raw.replace("\\/", "/")
        .trim_end_matches(|c: char| matches!(c, ',' | ';' | ')' | '.' | '\'' | '"'))
        .to_string()
}

/// Article ids are URL-safe base64; newer ones embed the publisher URL in
/// the decoded bytes.
fn decode_article_id(url: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(url).ok()?;
    let segments: Vec<&str> = parsed.path_segments()?.collect();
    let id = segments.iter().rev().find(|segment| segment.len() > 20)?;

    let decoded = URL_SAFE_NO_PAD.decode(id.trim_end_matches('=')).ok()?;
    let haystack = String::from_utf8_lossy(&decoded);

    let url_re =
        Regex::new(r"https?://[A-Za-z0-9\-._~:/?#@!$&'()*+,;=%]+").expect("valid url regex");
    let found = url_re
        .find_iter(&haystack)
        .map(|m| m.as_str().to_string())
        .find(|candidate| is_valid_article_url(candidate));
    found
}

/// Some wrapper URLs carry the publisher hostname in a query parameter.
/// The exact article path is not recoverable from it, so fall back to the
/// publisher's news section.
fn infer_from_source_hint(url: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(url).ok()?;

    for (_, value) in parsed.query_pairs() {
        let value = value.trim();
        let candidate = if value.starts_with("http://") || value.starts_with("https://") {
            value.to_string()
        } else if value.contains('.') && !value.contains(' ') {
            format!("https://{value}")
        } else {
            continue;
        };

        let Ok(hint) = reqwest::Url::parse(&candidate) else {
            continue;
        };
        let Some(host) = hint.host_str() else {
            continue;
        };
        let host = host.to_lowercase();
        if sites::is_allowed_article_host(&host) {
            return Some(format!("https://{host}/news"));
        }
    }

    None
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
