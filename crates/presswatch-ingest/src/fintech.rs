//! Fintech relevance classifier over the ten fixed content categories.
//!
//! The category set is closed ([`FintechCategory`]); the keyword and
//! pattern tables under each category are versioned data in
//! `config/keywords.yaml`. Detection is deterministic and side-effect
//! free: same text, same tables, same signal.

use std::collections::BTreeMap;

use presswatch_core::keywords::CategoryKeywords;
use presswatch_core::FintechCategory;
use regex::{Regex, RegexBuilder};

use crate::error::IngestError;

/// Classification outcome for one item.
#[derive(Debug, Clone)]
pub struct FintechSignal {
    pub is_fintech: bool,
    /// Categories with at least one keyword or pattern hit, table order.
    pub categories: Vec<FintechCategory>,
    /// 0–100.
    pub relevance_score: u32,
    /// The keywords and pattern-matched fragments that fired.
    pub matched_keywords: Vec<String>,
}

struct CompiledCategory {
    category: FintechCategory,
    /// Substring keywords, pre-lowercased.
    keywords: Vec<String>,
    patterns: Vec<Regex>,
}

/// Keyword tables compiled for repeated matching.
pub struct FintechClassifier {
    categories: Vec<CompiledCategory>,
}

impl FintechClassifier {
    /// Compile the category tables.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Pattern`] if a regex pattern does not compile.
    pub fn new(
        tables: &BTreeMap<FintechCategory, CategoryKeywords>,
    ) -> Result<Self, IngestError> {
        let mut categories = Vec::with_capacity(tables.len());
        for (category, entry) in tables {
            let patterns = entry
                .patterns
                .iter()
                .map(|pattern| {
                    RegexBuilder::new(pattern)
                        .case_insensitive(true)
                        .build()
                        .map_err(IngestError::from)
                })
                .collect::<Result<Vec<_>, _>>()?;
            categories.push(CompiledCategory {
                category: *category,
                keywords: entry.keywords.iter().map(|k| k.to_lowercase()).collect(),
                patterns,
            });
        }
        Ok(Self { categories })
    }

    /// Classify `title + " " + content`.
    ///
    /// A category is present iff at least one of its keywords appears as a
    /// substring or one of its patterns matches, case-insensitively.
    /// `relevance_score = min(100, 10 × categories + min(50, 5 × hits))`.
    #[must_use]
    pub fn detect_fintech_content(&self, title: &str, content: &str) -> FintechSignal {
        let text = format!("{title} {content}").to_lowercase();

        let mut categories = Vec::new();
        let mut matched_keywords = Vec::new();
        let mut total_hits: u32 = 0;

        for entry in &self.categories {
            let mut hits: u32 = 0;
            for keyword in &entry.keywords {
                if text.contains(keyword.as_str()) {
                    hits += 1;
                    matched_keywords.push(keyword.clone());
                }
            }
            for pattern in &entry.patterns {
                if let Some(found) = pattern.find(&text) {
                    hits += 1;
                    matched_keywords.push(found.as_str().to_string());
                }
            }
            if hits > 0 {
                categories.push(entry.category);
                total_hits = total_hits.saturating_add(hits);
            }
        }

        let category_count = u32::try_from(categories.len()).unwrap_or(u32::MAX);
        let hit_points = total_hits.saturating_mul(5).min(50);
        let relevance_score = category_count.saturating_mul(10).saturating_add(hit_points).min(100);

        FintechSignal {
            is_fintech: !categories.is_empty(),
            categories,
            relevance_score,
            matched_keywords,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tables() -> BTreeMap<FintechCategory, CategoryKeywords> {
        let mut tables = BTreeMap::new();
        tables.insert(
            FintechCategory::Funding,
            CategoryKeywords {
                keywords: vec![
                    "series a".to_string(),
                    "funding round".to_string(),
                    "raised".to_string(),
                ],
                patterns: vec![r"raises?\s+\$\d+".to_string()],
            },
        );
        tables.insert(
            FintechCategory::Markets,
            CategoryKeywords {
                keywords: vec!["earnings".to_string(), "quarterly results".to_string()],
                patterns: vec![
                    r"q[1-4]\s+20\d{2}".to_string(),
                    r"\$\d+(\.\d+)?\s*(million|billion|trillion)".to_string(),
                ],
            },
        );
        tables.insert(
            FintechCategory::Crypto,
            CategoryKeywords {
                keywords: vec!["bitcoin".to_string(), "stablecoin".to_string()],
                patterns: vec![],
            },
        );
        tables
    }

    fn classifier() -> FintechClassifier {
        FintechClassifier::new(&sample_tables()).expect("tables compile")
    }

    #[test]
    fn single_keyword_scores_one_category() {
        let signal = classifier().detect_fintech_content("Acme raised new capital", "");
        assert!(signal.is_fintech);
        assert_eq!(signal.categories, vec![FintechCategory::Funding]);
        // One category, one hit: 10 + 5.
        assert_eq!(signal.relevance_score, 15);
        assert_eq!(signal.matched_keywords, vec!["raised".to_string()]);
    }

    #[test]
    fn patterns_match_case_insensitively() {
        let signal =
            classifier().detect_fintech_content("Record Q4 2024 Results", "AUM hit $1.3 trillion");
        assert!(signal.is_fintech);
        assert_eq!(signal.categories, vec![FintechCategory::Markets]);
        // One category, two pattern hits: 10 + 10.
        assert_eq!(signal.relevance_score, 20);
        assert!(signal.matched_keywords.contains(&"q4 2024".to_string()));
        assert!(signal.matched_keywords.contains(&"$1.3 trillion".to_string()));
    }

    #[test]
    fn adding_matched_categories_never_lowers_the_score() {
        let one = classifier().detect_fintech_content("Acme raised funds", "");
        let two = classifier().detect_fintech_content("Acme raised funds", "earnings beat");
        let three = classifier()
            .detect_fintech_content("Acme raised funds", "earnings beat on bitcoin custody");
        assert!(two.relevance_score >= one.relevance_score);
        assert!(three.relevance_score >= two.relevance_score);
        assert_eq!(three.categories.len(), 3);
    }

    #[test]
    fn hit_points_cap_at_fifty() {
        // 3 categories (30) + 10 hits (50 capped): the hit term saturates.
        let text = "series a funding round raised raises $5 earnings quarterly results \
                    q1 2025 $2 billion bitcoin stablecoin";
        let signal = classifier().detect_fintech_content(text, text);
        assert_eq!(signal.categories.len(), 3);
        assert_eq!(signal.relevance_score, 80);
    }

    #[test]
    fn score_caps_at_one_hundred() {
        let mut tables = BTreeMap::new();
        for (category, keyword) in [
            (FintechCategory::Funding, "funding"),
            (FintechCategory::Banking, "bank"),
            (FintechCategory::Payments, "payments"),
            (FintechCategory::Crypto, "crypto"),
            (FintechCategory::Lending, "loan"),
            (FintechCategory::Regulatory, "sec"),
            (FintechCategory::Markets, "earnings"),
            (FintechCategory::Wealthtech, "robo-advisor"),
        ] {
            tables.insert(
                category,
                CategoryKeywords {
                    keywords: vec![keyword.to_string()],
                    patterns: vec![],
                },
            );
        }
        let classifier = FintechClassifier::new(&tables).expect("tables compile");
        let text = "funding bank payments crypto loan sec earnings robo-advisor";
        // 8 categories (80) + 8 hits (40): 120 before the cap.
        let signal = classifier.detect_fintech_content(text, "");
        assert_eq!(signal.relevance_score, 100);
    }

    #[test]
    fn unrelated_text_is_not_fintech() {
        let signal = classifier().detect_fintech_content("Local bakery opens", "Fresh bread daily");
        assert!(!signal.is_fintech);
        assert!(signal.categories.is_empty());
        assert_eq!(signal.relevance_score, 0);
        assert!(signal.matched_keywords.is_empty());
    }
}
