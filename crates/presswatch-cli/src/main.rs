//! `presswatch` command line interface.

mod extract;
mod poll;
mod resolve;
mod summarize;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "presswatch")]
#[command(about = "Press-release acquisition pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Poll tracked companies' feeds and report what was stored
    Poll {
        /// Restrict the run to a single company (by id)
        #[arg(long)]
        company: Option<String>,

        /// Print which feeds would be polled without fetching anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Resolve a Google News wrapper URL to its publisher URL
    Resolve {
        /// Wrapper URL from a Google News feed item
        url: String,
    },
    /// Fetch a page and print the extracted article body
    Extract {
        /// Article URL (Google News wrapper URLs are resolved first)
        url: String,

        /// Per-request timeout override
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Retry budget override for transient fetch errors
        #[arg(long)]
        retries: Option<u32>,
    },
    /// Extract a page, then summarize it through the completion service
    Summarize {
        /// Article URL (Google News wrapper URLs are resolved first)
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = presswatch_core::load_app_config_from_env()?;

    let cli = Cli::parse();
    match cli.command {
        Commands::Poll { company, dry_run } => {
            poll::run_poll(&config, company.as_deref(), dry_run).await
        }
        Commands::Resolve { url } => resolve::run_resolve(&config, &url).await,
        Commands::Extract {
            url,
            timeout_secs,
            retries,
        } => extract::run_extract(&config, &url, timeout_secs, retries).await,
        Commands::Summarize { url } => summarize::run_summarize(&config, &url).await,
    }
}
