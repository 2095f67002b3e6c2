use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a feed's items come from, semantically.
///
/// The kind drives two behaviors downstream: general-news items pass through
/// the English-language filter, and investor-relations/regulatory-filing
/// items get the authoritative-source relevance short-circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedKind {
    #[serde(rename = "general-news")]
    GeneralNews,
    #[serde(rename = "press-wire")]
    PressWire,
    #[serde(rename = "ir-news")]
    InvestorRelations,
    #[serde(rename = "regulatory-filing")]
    RegulatoryFiling,
}

impl FeedKind {
    /// True for feeds published directly by the covered company or a
    /// regulator, where the declared source name identifies the issuer.
    #[must_use]
    pub fn is_authoritative(self) -> bool {
        match self {
            FeedKind::InvestorRelations | FeedKind::RegulatoryFiling => true,
            FeedKind::GeneralNews | FeedKind::PressWire => false,
        }
    }
}

impl std::fmt::Display for FeedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedKind::GeneralNews => write!(f, "general-news"),
            FeedKind::PressWire => write!(f, "press-wire"),
            FeedKind::InvestorRelations => write!(f, "ir-news"),
            FeedKind::RegulatoryFiling => write!(f, "regulatory-filing"),
        }
    }
}

/// One parsed `<item>` from a feed.
///
/// Invariant: `title` and `link` are non-empty; items violating this are
/// dropped at parse time and never constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedItem {
    pub title: String,
    /// Description with HTML already stripped to plain text.
    pub description: String,
    pub published_at: Option<DateTime<Utc>>,
    pub link: String,
    pub guid: Option<String>,
    pub source_feed_id: String,
    /// Declared publisher/source name from the feed descriptor.
    pub source_name: String,
    pub feed_kind: FeedKind,
}

impl FeedItem {
    /// Key used for in-batch duplicate suppression: `guid` when the feed
    /// supplies one, else the link.
    #[must_use]
    pub fn dedup_key(&self) -> &str {
        match &self.guid {
            Some(guid) if !guid.is_empty() => guid,
            _ => &self.link,
        }
    }
}

/// The 10 fintech content categories. Keyword tables in
/// `config/keywords.yaml` are keyed by these names; an unknown key fails at
/// deserialization rather than at match time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FintechCategory {
    Funding,
    Banking,
    Payments,
    Crypto,
    Lending,
    Regulatory,
    Markets,
    Wealthtech,
    Insurtech,
    Regtech,
}

impl FintechCategory {
    pub const ALL: [FintechCategory; 10] = [
        FintechCategory::Funding,
        FintechCategory::Banking,
        FintechCategory::Payments,
        FintechCategory::Crypto,
        FintechCategory::Lending,
        FintechCategory::Regulatory,
        FintechCategory::Markets,
        FintechCategory::Wealthtech,
        FintechCategory::Insurtech,
        FintechCategory::Regtech,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FintechCategory::Funding => "funding",
            FintechCategory::Banking => "banking",
            FintechCategory::Payments => "payments",
            FintechCategory::Crypto => "crypto",
            FintechCategory::Lending => "lending",
            FintechCategory::Regulatory => "regulatory",
            FintechCategory::Markets => "markets",
            FintechCategory::Wealthtech => "wealthtech",
            FintechCategory::Insurtech => "insurtech",
            FintechCategory::Regtech => "regtech",
        }
    }
}

impl std::fmt::Display for FintechCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A feed item after language filtering, fintech classification, and
/// company matching. Immutable once built; re-sorted freely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedItem {
    pub item: FeedItem,
    /// Tracked companies mentioned in title+description, first-seen order,
    /// each at most once.
    pub company_mentions: Vec<String>,
    pub matched_company: Option<String>,
    pub relevance_score: i64,
    pub is_fintech: bool,
    pub fintech_categories: Vec<FintechCategory>,
    pub fintech_relevance_score: u32,
    pub matched_keywords: Vec<String>,
}

/// A tracked company as read from the roster. Owned by the external
/// user-management system; this pipeline only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    /// Stable slug identifier derived from the name.
    pub id: String,
    pub name: String,
    /// Alias spellings that also count as mentions (tickers, short names).
    pub variations: Vec<String>,
}
