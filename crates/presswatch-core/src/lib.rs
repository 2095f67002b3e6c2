//! Shared types, environment configuration, and config-file loaders for the
//! presswatch content-acquisition pipeline.

pub mod config;
pub mod error;
pub mod keywords;
pub mod roster;
pub mod types;

pub use config::{load_app_config, load_app_config_from_env, AppConfig};
pub use error::CoreError;
pub use keywords::{load_keywords, CategoryKeywords, KeywordsFile, LanguageKeywords};
pub use roster::{
    load_companies, load_feeds, CompaniesFile, CompanyConfig, FeedConfig, FeedsFile,
};
pub use types::{ClassifiedItem, Company, FeedItem, FeedKind, FintechCategory};
