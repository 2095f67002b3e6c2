use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{Company, FeedKind};
use crate::CoreError;

/// One tracked company as written in `config/companies.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyConfig {
    pub name: String,
    /// Alias spellings (tickers, short names) that also count as mentions.
    #[serde(default)]
    pub variations: Vec<String>,
    pub notes: Option<String>,
}

impl CompanyConfig {
    /// Generate a URL-safe slug from the company name.
    #[must_use]
    pub fn slug(&self) -> String {
        let mut slug = String::new();
        let mut pending_sep = false;
        for c in self.name.to_lowercase().chars() {
            if c.is_ascii_alphanumeric() {
                if pending_sep && !slug.is_empty() {
                    slug.push('-');
                }
                pending_sep = false;
                slug.push(c);
            } else if c == ' ' || c == '-' || c == '_' {
                pending_sep = true;
            }
        }
        slug
    }

    #[must_use]
    pub fn to_company(&self) -> Company {
        Company {
            id: self.slug(),
            name: self.name.clone(),
            variations: self.variations.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CompaniesFile {
    pub companies: Vec<CompanyConfig>,
}

impl CompaniesFile {
    #[must_use]
    pub fn to_companies(&self) -> Vec<Company> {
        self.companies.iter().map(CompanyConfig::to_company).collect()
    }
}

/// One configured feed as written in `config/feeds.yaml`. Doubles as the
/// runtime descriptor handed to the fetcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub id: String,
    /// Declared publisher/source name, carried onto every parsed item.
    pub name: String,
    pub url: String,
    pub kind: FeedKind,
}

#[derive(Debug, Deserialize)]
pub struct FeedsFile {
    pub feeds: Vec<FeedConfig>,
}

/// Load and validate the tracked-company roster from a YAML file.
///
/// # Errors
///
/// Returns `CoreError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_companies(path: &Path) -> Result<CompaniesFile, CoreError> {
    let content = std::fs::read_to_string(path).map_err(|e| CoreError::ConfigFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: CompaniesFile = serde_yaml::from_str(&content)?;
    validate_companies(&file)?;
    Ok(file)
}

/// Load and validate the configured feed list from a YAML file.
///
/// # Errors
///
/// Returns `CoreError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_feeds(path: &Path) -> Result<FeedsFile, CoreError> {
    let content = std::fs::read_to_string(path).map_err(|e| CoreError::ConfigFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: FeedsFile = serde_yaml::from_str(&content)?;
    validate_feeds(&file)?;
    Ok(file)
}

fn validate_companies(file: &CompaniesFile) -> Result<(), CoreError> {
    let mut seen_names = HashSet::new();
    let mut seen_slugs = HashSet::new();

    for company in &file.companies {
        if company.name.trim().is_empty() {
            return Err(CoreError::Validation(
                "company name must be non-empty".to_string(),
            ));
        }

        let slug = company.slug();
        if slug.is_empty() {
            return Err(CoreError::Validation(format!(
                "company '{}' produces an empty slug",
                company.name
            )));
        }

        if !seen_names.insert(company.name.to_lowercase()) {
            return Err(CoreError::Validation(format!(
                "duplicate company name: '{}'",
                company.name
            )));
        }
        if !seen_slugs.insert(slug.clone()) {
            return Err(CoreError::Validation(format!(
                "duplicate company slug: '{}' (from company '{}')",
                slug, company.name
            )));
        }

        for variation in &company.variations {
            if variation.trim().is_empty() {
                return Err(CoreError::Validation(format!(
                    "company '{}' has an empty variation",
                    company.name
                )));
            }
        }
    }

    Ok(())
}

fn validate_feeds(file: &FeedsFile) -> Result<(), CoreError> {
    let mut seen_ids = HashSet::new();

    for feed in &file.feeds {
        if feed.id.trim().is_empty() {
            return Err(CoreError::Validation("feed id must be non-empty".to_string()));
        }
        if feed.name.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "feed '{}' must declare a source name",
                feed.id
            )));
        }
        if !feed.url.starts_with("http://") && !feed.url.starts_with("https://") {
            return Err(CoreError::Validation(format!(
                "feed '{}' has a non-HTTP url: '{}'",
                feed.id, feed.url
            )));
        }
        if !seen_ids.insert(feed.id.clone()) {
            return Err(CoreError::Validation(format!(
                "duplicate feed id: '{}'",
                feed.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company(name: &str) -> CompanyConfig {
        CompanyConfig {
            name: name.to_string(),
            variations: vec![],
            notes: None,
        }
    }

    #[test]
    fn slug_simple_name() {
        assert_eq!(company("Stripe").slug(), "stripe");
    }

    #[test]
    fn slug_multi_word() {
        assert_eq!(company("Blackstone Group").slug(), "blackstone-group");
    }

    #[test]
    fn slug_punctuation_dropped_without_separator() {
        assert_eq!(company("Moody's Analytics").slug(), "moodys-analytics");
    }

    #[test]
    fn slug_non_ascii_stripped() {
        assert_eq!(company("Klärna AB").slug(), "klrna-ab");
    }

    #[test]
    fn validate_rejects_empty_name() {
        let file = CompaniesFile {
            companies: vec![company("  ")],
        };
        let err = validate_companies(&file).unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }

    #[test]
    fn validate_rejects_empty_slug() {
        let file = CompaniesFile {
            companies: vec![company("株式会社")],
        };
        let err = validate_companies(&file).unwrap_err();
        assert!(err.to_string().contains("empty slug"));
    }

    #[test]
    fn validate_rejects_duplicate_name_case_insensitive() {
        let file = CompaniesFile {
            companies: vec![company("Stripe"), company("stripe")],
        };
        let err = validate_companies(&file).unwrap_err();
        assert!(err.to_string().contains("duplicate company name"));
    }

    #[test]
    fn validate_rejects_duplicate_slug() {
        let file = CompaniesFile {
            companies: vec![company("Block Inc"), company("Block-Inc")],
        };
        let err = validate_companies(&file).unwrap_err();
        assert!(err.to_string().contains("duplicate company"));
    }

    #[test]
    fn validate_rejects_empty_variation() {
        let file = CompaniesFile {
            companies: vec![CompanyConfig {
                name: "Stripe".to_string(),
                variations: vec!["Stripe Inc".to_string(), " ".to_string()],
                notes: None,
            }],
        };
        let err = validate_companies(&file).unwrap_err();
        assert!(err.to_string().contains("empty variation"));
    }

    #[test]
    fn to_company_uses_slug_as_id() {
        let cfg = CompanyConfig {
            name: "Blackstone Group".to_string(),
            variations: vec!["Blackstone".to_string(), "BX".to_string()],
            notes: None,
        };
        let c = cfg.to_company();
        assert_eq!(c.id, "blackstone-group");
        assert_eq!(c.variations.len(), 2);
    }

    #[test]
    fn validate_rejects_duplicate_feed_id() {
        let file = FeedsFile {
            feeds: vec![
                FeedConfig {
                    id: "wire".to_string(),
                    name: "PR Newswire".to_string(),
                    url: "https://example.com/a.rss".to_string(),
                    kind: FeedKind::PressWire,
                },
                FeedConfig {
                    id: "wire".to_string(),
                    name: "Business Wire".to_string(),
                    url: "https://example.com/b.rss".to_string(),
                    kind: FeedKind::PressWire,
                },
            ],
        };
        let err = validate_feeds(&file).unwrap_err();
        assert!(err.to_string().contains("duplicate feed id"));
    }

    #[test]
    fn validate_rejects_non_http_feed_url() {
        let file = FeedsFile {
            feeds: vec![FeedConfig {
                id: "bad".to_string(),
                name: "Bad".to_string(),
                url: "ftp://example.com/feed".to_string(),
                kind: FeedKind::GeneralNews,
            }],
        };
        let err = validate_feeds(&file).unwrap_err();
        assert!(err.to_string().contains("non-HTTP"));
    }

    #[test]
    fn feed_config_parses_kind_tags() {
        let yaml = r"
feeds:
  - id: sec-8k
    name: SEC EDGAR
    url: https://example.com/8k.rss
    kind: regulatory-filing
  - id: ir
    name: Blackstone
    url: https://example.com/ir.rss
    kind: ir-news
";
        let file: FeedsFile = serde_yaml::from_str(yaml).expect("parse");
        assert_eq!(file.feeds[0].kind, FeedKind::RegulatoryFiling);
        assert_eq!(file.feeds[1].kind, FeedKind::InvestorRelations);
    }

    #[test]
    fn load_companies_from_real_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("companies.yaml");
        assert!(
            path.exists(),
            "companies.yaml missing at {path:?}, required for this test"
        );
        let file = load_companies(&path).expect("failed to load companies.yaml");
        assert!(!file.companies.is_empty());
        for company in &file.companies {
            assert!(!company.slug().is_empty());
        }
    }

    #[test]
    fn load_feeds_from_real_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("feeds.yaml");
        assert!(
            path.exists(),
            "feeds.yaml missing at {path:?}, required for this test"
        );
        let file = load_feeds(&path).expect("failed to load feeds.yaml");
        assert!(!file.feeds.is_empty());
    }
}
