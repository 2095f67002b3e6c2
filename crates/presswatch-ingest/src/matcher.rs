//! Company mention extraction and relevance scoring.
//!
//! Scoring weights: canonical name 100/50 per title/description occurrence,
//! alias 80/40, authoritative-source short-circuit 200, plus a multi-mention
//! bonus of `(title_hits + desc_hits − 1) × 10` counted over canonical-name
//! hits only. The bonus nets −10 for an alias-only match; stored history
//! depends on these exact values, so the arithmetic is frozen; change the
//! roster, not the weights.

use std::cmp::Ordering;

use presswatch_core::{ClassifiedItem, Company, FeedItem};

/// Result of scoring one item against the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchScore {
    pub score: i64,
    pub matched_company: Option<String>,
}

impl MatchScore {
    fn none() -> Self {
        Self {
            score: 0,
            matched_company: None,
        }
    }
}

/// Every tracked company whose name or alias appears in `text`,
/// case-insensitively. Roster order, each company listed at most once.
#[must_use]
pub fn extract_company_mentions(text: &str, companies: &[Company]) -> Vec<String> {
    let haystack = text.to_lowercase();
    let mut mentions = Vec::new();
    for company in companies {
        let mentioned = contains_needle(&haystack, &company.name)
            || company
                .variations
                .iter()
                .any(|alias| contains_needle(&haystack, alias));
        if mentioned {
            mentions.push(company.name.clone());
        }
    }
    mentions
}

/// Score `item` against the roster and name the best-matching company.
///
/// Items from authoritative feeds (investor relations, regulatory filings)
/// whose declared source name equals a tracked company's name score 200
/// outright, without any text matching. Ties keep the first company in
/// roster order; no hits anywhere yields score 0 and no company.
#[must_use]
pub fn calculate_relevance_score(item: &FeedItem, companies: &[Company]) -> MatchScore {
    if item.feed_kind.is_authoritative() {
        for company in companies {
            if company.name.to_lowercase() == item.source_name.to_lowercase() {
                return MatchScore {
                    score: 200,
                    matched_company: Some(company.name.clone()),
                };
            }
        }
    }

    let title = item.title.to_lowercase();
    let description = item.description.to_lowercase();

    let mut best: Option<(i64, &Company)> = None;
    for company in companies {
        let score = company_score(&title, &description, company);
        if score > 0 && best.is_none_or(|(top, _)| score > top) {
            best = Some((score, company));
        }
    }

    match best {
        Some((score, company)) => MatchScore {
            score,
            matched_company: Some(company.name.clone()),
        },
        None => MatchScore::none(),
    }
}

/// Sort in place: descending relevance, then most recent first. Undated
/// items sort after dated items at the same score and keep their relative
/// input order among themselves.
pub fn sort_by_relevance(items: &mut [ClassifiedItem]) {
    items.sort_by(|a, b| {
        b.relevance_score
            .cmp(&a.relevance_score)
            .then_with(|| match (a.item.published_at, b.item.published_at) {
                (Some(left), Some(right)) => right.cmp(&left),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
    });
}

fn company_score(title: &str, description: &str, company: &Company) -> i64 {
    let name = company.name.to_lowercase();
    let title_hits = count_occurrences(title, &name);
    let desc_hits = count_occurrences(description, &name);

    let mut score = title_hits * 100 + desc_hits * 50;
    let mut any_hit = title_hits > 0 || desc_hits > 0;

    for alias in &company.variations {
        let alias = alias.to_lowercase();
        let alias_title = count_occurrences(title, &alias);
        let alias_desc = count_occurrences(description, &alias);
        score += alias_title * 80 + alias_desc * 40;
        any_hit = any_hit || alias_title > 0 || alias_desc > 0;
    }

    if any_hit {
        score += (title_hits + desc_hits - 1) * 10;
    }

    score
}

fn contains_needle(haystack_lower: &str, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    !needle.is_empty() && haystack_lower.contains(&needle)
}

/// Non-overlapping occurrence count; both sides already lowercased.
fn count_occurrences(haystack: &str, needle: &str) -> i64 {
    if needle.is_empty() {
        return 0;
    }
    i64::try_from(haystack.matches(needle).count()).unwrap_or(i64::MAX)
}
