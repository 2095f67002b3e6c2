//! `resolve` command: recover the publisher URL behind a Google News
//! wrapper link.

use std::time::Duration;

use presswatch_core::AppConfig;
use presswatch_extract::{GoogleNewsResolver, ResolutionCache, ResolveError};

/// Resolver wired from the app config.
pub(crate) fn resolver_from_config(config: &AppConfig) -> Result<GoogleNewsResolver, ResolveError> {
    let cache = ResolutionCache::new(
        Duration::from_secs(config.resolve_cache_ttl_secs),
        config.resolve_cache_max_entries,
    );
    GoogleNewsResolver::with_cache(config.resolve_timeout_secs, cache)
}

/// Resolve one wrapper URL and print where it leads.
///
/// # Errors
///
/// Returns an error if the URL is not a Google News wrapper or no publisher
/// URL can be recovered from it.
pub(crate) async fn run_resolve(config: &AppConfig, url: &str) -> anyhow::Result<()> {
    let resolver = resolver_from_config(config)?;
    let resolution = resolver.resolve(url).await?;

    println!("{}", resolution.final_url);
    println!("via: {}", resolution.via.as_str());
    if resolution.redirect_chain.len() > 1 {
        println!("chain: {}", resolution.redirect_chain.join(" -> "));
    }
    Ok(())
}
