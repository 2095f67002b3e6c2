//! Article body extraction: publisher cascade, generic cascade, then
//! regex fallbacks, each gated by the quality check.

use regex::Regex;
use scraper::{Html, Selector};

use crate::client;
use crate::error::ExtractError;
use crate::metrics::{ExtractionMetrics, MetricsSnapshot, StrategyFamily};
use crate::quality::validate_content_quality;
use crate::sanitize;
use crate::sites;

/// Visible characters a `<p>` block needs to count as substantial.
const MIN_PARAGRAPH_CHARS: usize = 40;
/// Visible characters a `<main>`/`<article>`/`<section>` region needs.
const MIN_REGION_CHARS: usize = 120;

/// Sanitized article content plus the strategy that produced it.
///
/// `confidence` is the winning strategy's static trust level, not a
/// statement about the content itself. `title` is the page headline
/// (`og:title` when present, else the `<title>` text) regardless of which
/// strategy won.
#[derive(Debug, Clone)]
pub struct ExtractedContent {
    pub title: Option<String>,
    pub html: String,
    pub text: String,
    pub extracted_by: String,
    pub confidence: f32,
}

/// Fetch and retry knobs; defaults mirror the pipeline configuration.
#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub backoff_base_secs: u64,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            timeout_secs: 20,
            max_retries: 3,
            backoff_base_secs: 1,
        }
    }
}

/// Pulls article bodies out of publisher pages.
pub struct ContentExtractor {
    client: reqwest::Client,
    options: ExtractOptions,
    metrics: ExtractionMetrics,
}

impl ContentExtractor {
    /// # Errors
    ///
    /// Returns [`ExtractError::Request`] if the HTTP client cannot be built.
    pub fn new(options: ExtractOptions) -> Result<Self, ExtractError> {
        let client = client::build_browser_client(options.timeout_secs)?;
        Ok(Self {
            client,
            options,
            metrics: ExtractionMetrics::default(),
        })
    }

    #[must_use]
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Fetch `url` and extract the article body from the returned page.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::InvalidUrl`] for unparseable or non-HTTP
    /// URLs, fetch errors from the retrying client, and
    /// [`ExtractError::QualityRejected`] when every strategy fails the
    /// quality gate.
    pub async fn extract_content_from_url(&self, url: &str) -> Result<ExtractedContent, ExtractError> {
        let parsed = reqwest::Url::parse(url).map_err(|_| ExtractError::InvalidUrl {
            url: url.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ExtractError::InvalidUrl {
                url: url.to_string(),
            });
        }
        let host = parsed
            .host_str()
            .map(str::to_lowercase)
            .ok_or_else(|| ExtractError::InvalidUrl {
                url: url.to_string(),
            })?;

        let body = client::fetch_html_with_retries(
            &self.client,
            url,
            self.options.max_retries,
            self.options.backoff_base_secs,
        )
        .await?;

        tracing::debug!(url, host, bytes = body.len(), "fetched article page");
        self.extract_from_html(&host, &body)
    }

    /// Extraction over an already-fetched page, keyed by host for the
    /// publisher profile lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::QualityRejected`] when no strategy passes
    /// the quality gate.
    pub fn extract_from_html(&self, host: &str, html: &str) -> Result<ExtractedContent, ExtractError> {
        self.metrics.record_attempt();
        let mut attempts = 0usize;
        let document = Html::parse_document(html);

        if let Some(profile) = sites::profile_for_host(host) {
            if let Some(mut content) = cascade(&document, profile, &mut attempts) {
                tracing::debug!(host, extracted_by = %content.extracted_by, "publisher cascade matched");
                self.metrics.record_success(StrategyFamily::Publisher);
                content.title = page_title(&document);
                return Ok(content);
            }
        }

        if let Some(mut content) = cascade(&document, &sites::GENERIC, &mut attempts) {
            tracing::debug!(host, "generic cascade matched");
            self.metrics.record_success(StrategyFamily::Generic);
            content.title = page_title(&document);
            return Ok(content);
        }

        if let Some(mut content) = regex_fallbacks(html, &mut attempts) {
            tracing::debug!(host, extracted_by = %content.extracted_by, "regex fallback matched");
            self.metrics.record_success(StrategyFamily::Fallback);
            content.title = page_title(&document);
            return Ok(content);
        }

        self.metrics.record_failure();
        Err(ExtractError::QualityRejected { attempts })
    }
}

fn cascade(
    document: &Html,
    profile: &sites::PublisherProfile,
    attempts: &mut usize,
) -> Option<ExtractedContent> {
    let boilerplate: Vec<Selector> = profile
        .boilerplate_selectors
        .iter()
        .filter_map(|raw| Selector::parse(raw).ok())
        .collect();

    for raw in profile.content_selectors {
        let selector = Selector::parse(raw).expect("valid content selector");
        for element in document.select(&selector) {
            *attempts += 1;
            let sanitized = sanitize::sanitize_element(element, &boilerplate);
            if validate_content_quality(&sanitized.text) {
                return Some(ExtractedContent {
                    title: None,
                    html: sanitized.html,
                    text: sanitized.text,
                    extracted_by: profile.label.to_string(),
                    confidence: profile.confidence,
                });
            }
        }
    }

    None
}

fn regex_fallbacks(html: &str, attempts: &mut usize) -> Option<ExtractedContent> {
    *attempts += 1;
    if let Some(fragment) = paragraph_run(html) {
        let sanitized = sanitize::sanitize_fragment(&fragment, &[]);
        if validate_content_quality(&sanitized.text) {
            return Some(ExtractedContent {
                title: None,
                html: sanitized.html,
                text: sanitized.text,
                extracted_by: "paragraph-run".to_string(),
                confidence: 0.5,
            });
        }
    }

    *attempts += 1;
    if let Some(region) = region_scan(html) {
        let sanitized = sanitize::sanitize_fragment(&region, &[]);
        if validate_content_quality(&sanitized.text) {
            return Some(ExtractedContent {
                title: None,
                html: sanitized.html,
                text: sanitized.text,
                extracted_by: "region-scan".to_string(),
                confidence: 0.4,
            });
        }
    }

    *attempts += 1;
    if let Some((html_out, text)) = after_dateline(html) {
        if validate_content_quality(&text) {
            return Some(ExtractedContent {
                title: None,
                html: html_out,
                text,
                extracted_by: "dateline".to_string(),
                confidence: 0.3,
            });
        }
    }

    None
}

/// Collect substantial `<p>` blocks in document order.
fn paragraph_run(html: &str) -> Option<String> {
    let re = Regex::new(r"(?is)<p\b[^>]*>(.*?)</p>").expect("valid paragraph regex");
    let blocks: Vec<String> = re
        .captures_iter(html)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str()))
        .filter(|block| strip_tags(block).chars().count() >= MIN_PARAGRAPH_CHARS)
        .map(|block| format!("<p>{block}</p>"))
        .collect();

    if blocks.is_empty() {
        return None;
    }
    Some(blocks.join("\n"))
}

/// Largest `<main>`, `<article>`, or `<section>` region with enough text.
fn region_scan(html: &str) -> Option<String> {
    for tag in ["main", "article", "section"] {
        let re =
            Regex::new(&format!(r"(?is)<{tag}\b[^>]*>(.*?)</{tag}>")).expect("valid region regex");
        let best = re
            .captures_iter(html)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .max_by_key(String::len);
        if let Some(region) = best {
            if strip_tags(&region).chars().count() >= MIN_REGION_CHARS {
                return Some(region);
            }
        }
    }
    None
}

/// Text after a press-release dateline marker (`CITY, ST, Month DD, YYYY --`).
fn after_dateline(html: &str) -> Option<(String, String)> {
    let text = strip_tags(html);
    let found = dateline_regex().find(&text)?;
    let body = text[found.end()..].trim().to_string();
    if body.is_empty() {
        return None;
    }
    let html_out = format!("<p>{}</p>", html_escape::encode_text(&body));
    Some((html_out, body))
}

fn dateline_regex() -> Regex {
    let months = "Jan(?:\\.|uary)?|Feb(?:\\.|ruary)?|Mar(?:\\.|ch)?|Apr(?:\\.|il)?|May\
         |Jun(?:\\.|e)?|Jul(?:\\.|y)?|Aug(?:\\.|ust)?|Sep(?:\\.|t\\.?|tember)?\
         |Oct(?:\\.|ober)?|Nov(?:\\.|ember)?|Dec(?:\\.|ember)?";
    let pattern = format!(
        r"[A-Z][A-Z'.\- ]{{2,}},\s*(?:[A-Za-z'.\- ]+,\s*)?(?:{months})\s+\d{{1,2}},\s*\d{{4}}\s*(?:/[A-Za-z0-9 .\-]+/)?\s*(?:--|—|–)"
    );
    Regex::new(&pattern).expect("valid dateline regex")
}

/// Page headline: the `og:title` meta when present, else the `<title>` text.
fn page_title(document: &Html) -> Option<String> {
    let og = Selector::parse(r#"meta[property="og:title"]"#).expect("valid og:title selector");
    let title = Selector::parse("title").expect("valid title selector");

    document
        .select(&og)
        .next()
        .and_then(|meta| meta.value().attr("content").map(strip_tags))
        .filter(|t| !t.is_empty())
        .or_else(|| {
            document
                .select(&title)
                .next()
                .map(|el| strip_tags(&el.text().collect::<String>()))
                .filter(|t| !t.is_empty())
        })
}

fn strip_tags(html: &str) -> String {
    let tags = Regex::new(r"(?is)<[^>]+>").expect("valid tag regex");
    let no_tags = tags.replace_all(html, " ");
    no_tags.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
