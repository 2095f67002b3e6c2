use std::path::PathBuf;

use crate::CoreError;

/// Runtime configuration for the acquisition pipeline, read from the
/// environment. Tuning knobs all have defaults; the only secret
/// (`OPENAI_API_KEY`) stays optional until the summarize path needs it.
#[derive(Clone)]
pub struct AppConfig {
    pub companies_path: PathBuf,
    pub feeds_path: PathBuf,
    pub keywords_path: PathBuf,
    /// Owner of persisted releases and poll logs.
    pub user_id: String,
    pub feed_timeout_secs: u64,
    pub feed_user_agent: String,
    pub extract_timeout_secs: u64,
    pub extract_max_retries: u32,
    pub extract_backoff_base_secs: u64,
    pub resolve_timeout_secs: u64,
    pub resolve_cache_ttl_secs: u64,
    pub resolve_cache_max_entries: usize,
    pub resolve_concurrency: usize,
    pub resolve_batch_delay_ms: u64,
    pub openai_api_key: Option<String>,
    pub summarize_base_url: String,
    pub summarize_model: String,
}

impl AppConfig {
    /// The completion-service credential, required only when summarizing.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::MissingEnvVar` naming `OPENAI_API_KEY` when the
    /// key was not configured.
    pub fn summarize_credential(&self) -> Result<&str, CoreError> {
        self.openai_api_key
            .as_deref()
            .ok_or_else(|| CoreError::MissingEnvVar("OPENAI_API_KEY".to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("companies_path", &self.companies_path)
            .field("feeds_path", &self.feeds_path)
            .field("keywords_path", &self.keywords_path)
            .field("user_id", &self.user_id)
            .field("feed_timeout_secs", &self.feed_timeout_secs)
            .field("feed_user_agent", &self.feed_user_agent)
            .field("extract_timeout_secs", &self.extract_timeout_secs)
            .field("extract_max_retries", &self.extract_max_retries)
            .field("extract_backoff_base_secs", &self.extract_backoff_base_secs)
            .field("resolve_timeout_secs", &self.resolve_timeout_secs)
            .field("resolve_cache_ttl_secs", &self.resolve_cache_ttl_secs)
            .field(
                "resolve_cache_max_entries",
                &self.resolve_cache_max_entries,
            )
            .field("resolve_concurrency", &self.resolve_concurrency)
            .field("resolve_batch_delay_ms", &self.resolve_batch_delay_ms)
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("summarize_base_url", &self.summarize_base_url)
            .field("summarize_model", &self.summarize_model)
            .finish()
    }
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `CoreError` if a configured value fails to parse.
pub fn load_app_config() -> Result<AppConfig, CoreError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `CoreError` if a configured value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, CoreError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup
/// function. Decoupled from the real environment so tests can drive it from
/// a plain `HashMap` without `set_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, CoreError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, CoreError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| CoreError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, CoreError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| CoreError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, CoreError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| CoreError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let companies_path = PathBuf::from(or_default(
        "PRESSWATCH_COMPANIES_PATH",
        "./config/companies.yaml",
    ));
    let feeds_path = PathBuf::from(or_default("PRESSWATCH_FEEDS_PATH", "./config/feeds.yaml"));
    let keywords_path = PathBuf::from(or_default(
        "PRESSWATCH_KEYWORDS_PATH",
        "./config/keywords.yaml",
    ));

    let user_id = or_default("PRESSWATCH_USER_ID", "local");

    let feed_timeout_secs = parse_u64("PRESSWATCH_FEED_TIMEOUT_SECS", "15")?;
    let feed_user_agent = or_default(
        "PRESSWATCH_FEED_USER_AGENT",
        "presswatch/0.1 (press-release aggregation)",
    );

    let extract_timeout_secs = parse_u64("PRESSWATCH_EXTRACT_TIMEOUT_SECS", "20")?;
    let extract_max_retries = parse_u32("PRESSWATCH_EXTRACT_MAX_RETRIES", "3")?;
    let extract_backoff_base_secs = parse_u64("PRESSWATCH_EXTRACT_BACKOFF_BASE_SECS", "1")?;

    let resolve_timeout_secs = parse_u64("PRESSWATCH_RESOLVE_TIMEOUT_SECS", "15")?;
    let resolve_cache_ttl_secs = parse_u64("PRESSWATCH_RESOLVE_CACHE_TTL_SECS", "86400")?;
    let resolve_cache_max_entries = parse_usize("PRESSWATCH_RESOLVE_CACHE_MAX_ENTRIES", "512")?;
    let resolve_concurrency = parse_usize("PRESSWATCH_RESOLVE_CONCURRENCY", "3")?;
    let resolve_batch_delay_ms = parse_u64("PRESSWATCH_RESOLVE_BATCH_DELAY_MS", "1000")?;

    let openai_api_key = lookup("OPENAI_API_KEY").ok();
    let summarize_base_url = or_default(
        "PRESSWATCH_SUMMARIZE_BASE_URL",
        "https://api.openai.com/v1",
    );
    let summarize_model = or_default("PRESSWATCH_SUMMARIZE_MODEL", "gpt-4o-mini");

    Ok(AppConfig {
        companies_path,
        feeds_path,
        keywords_path,
        user_id,
        feed_timeout_secs,
        feed_user_agent,
        extract_timeout_secs,
        extract_max_retries,
        extract_backoff_base_secs,
        resolve_timeout_secs,
        resolve_cache_ttl_secs,
        resolve_cache_max_entries,
        resolve_concurrency,
        resolve_batch_delay_ms,
        openai_api_key,
        summarize_base_url,
        summarize_model,
    })
}
