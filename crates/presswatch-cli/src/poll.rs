//! `poll` command: run the acquisition job across the tracked roster.
//!
//! Per-company failures are logged and skipped rather than propagated so a
//! single bad company does not abort the full run.

use presswatch_core::{load_companies, load_feeds, load_keywords, AppConfig, Company};
use presswatch_ingest::{company_feeds, run_company_poll, Classifier, FeedFetcher};
use presswatch_store::{MemoryStore, PollStatus};

/// Load the companies to poll.
///
/// With a filter, resolves that single company by id and errors if it is
/// unknown. Without one, returns the whole roster.
fn load_roster(config: &AppConfig, company_filter: Option<&str>) -> anyhow::Result<Vec<Company>> {
    let companies = load_companies(&config.companies_path)?.to_companies();
    let Some(id) = company_filter else {
        return Ok(companies);
    };
    let company = companies.into_iter().find(|c| c.id == id).ok_or_else(|| {
        anyhow::anyhow!(
            "company '{id}' not found in {}",
            config.companies_path.display()
        )
    })?;
    Ok(vec![company])
}

/// Poll every company in the roster (or the one selected by
/// `company_filter`), storing results in an in-process store and printing
/// per-company counts.
///
/// When `dry_run` is `true` the function prints the feeds each company
/// would poll and returns without fetching.
///
/// # Errors
///
/// Returns an error if a roster file cannot be loaded, the company filter
/// matches nothing, or every company's poll fails.
pub(crate) async fn run_poll(
    config: &AppConfig,
    company_filter: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let companies = load_roster(config, company_filter)?;
    if companies.is_empty() {
        println!("no companies configured; nothing to poll");
        return Ok(());
    }

    let feeds_file = load_feeds(&config.feeds_path)?;

    if dry_run {
        for company in &companies {
            let feeds = company_feeds(company, &feeds_file.feeds);
            let ids: Vec<&str> = feeds.iter().map(|f| f.id.as_str()).collect();
            println!(
                "dry-run: would poll {} feeds for {}: [{}]",
                feeds.len(),
                company.id,
                ids.join(", ")
            );
        }
        return Ok(());
    }

    let keywords = load_keywords(&config.keywords_path)?;
    let classifier = Classifier::new(&keywords, companies.clone())?;
    let fetcher = FeedFetcher::new(config.feed_timeout_secs, &config.feed_user_agent)?;
    let store = MemoryStore::new();

    let company_count = companies.len();
    let mut failed: usize = 0;
    let mut total_new: u32 = 0;

    for company in &companies {
        let feeds = company_feeds(company, &feeds_file.feeds);
        match run_company_poll(
            &fetcher,
            &classifier,
            &store,
            &store,
            &config.user_id,
            company,
            &feeds,
        )
        .await
        {
            Ok(entry) if entry.status == PollStatus::Error => {
                tracing::error!(
                    company = %company.id,
                    error = entry.error_message.as_deref().unwrap_or("unknown"),
                    "poll run failed"
                );
                failed += 1;
            }
            Ok(entry) => {
                total_new = total_new.saturating_add(entry.releases_new);
                println!(
                    "{}: {} found, {} new, {} duplicate",
                    company.id, entry.releases_found, entry.releases_new, entry.releases_duplicate
                );
            }
            Err(e) => {
                tracing::error!(company = %company.id, error = %e, "poll log write failed");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        tracing::warn!(failed, total = company_count, "some companies failed to poll");
    }
    if failed == company_count {
        anyhow::bail!("all {failed} companies failed to poll");
    }

    println!("stored {total_new} new releases across {company_count} companies");
    Ok(())
}
