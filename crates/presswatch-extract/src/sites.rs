//! Publisher extraction profiles and the article-domain allow list.

/// Where a publisher keeps its article body and how much a match from it
/// is trusted.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PublisherProfile {
    pub label: &'static str,
    pub domains: &'static [&'static str],
    /// Content selectors in priority order; the first element that passes
    /// the quality gate wins.
    pub content_selectors: &'static [&'static str],
    /// Profile-specific subtrees stripped before rendering. Script, style,
    /// and site chrome are always stripped regardless.
    pub boilerplate_selectors: &'static [&'static str],
    pub confidence: f32,
}

pub(crate) const PUBLISHERS: &[PublisherProfile] = &[
    PublisherProfile {
        label: "prnewswire",
        domains: &["prnewswire.com"],
        content_selectors: &[
            "section.release-body",
            ".release-body",
            "div.news-release",
        ],
        boilerplate_selectors: &[".pr-contact", ".media-contacts", ".view-original"],
        confidence: 0.9,
    },
    PublisherProfile {
        label: "globenewswire",
        domains: &["globenewswire.com"],
        content_selectors: &["#main-body-container", ".main-body-container", ".article-body"],
        boilerplate_selectors: &[".tags-container", ".article-contacts"],
        confidence: 0.9,
    },
    PublisherProfile {
        label: "businesswire",
        domains: &["businesswire.com"],
        content_selectors: &[".bw-release-story", "#bw-release-story", ".bw-release-main"],
        boilerplate_selectors: &[".bw-release-contact", ".bw-release-timestamp"],
        confidence: 0.9,
    },
    PublisherProfile {
        label: "reuters",
        domains: &["reuters.com"],
        content_selectors: &[
            "[data-testid=\"ArticleBody\"]",
            ".article-body__content",
            "article",
        ],
        boilerplate_selectors: &["[data-testid=\"SignupBanner\"]", ".read-next"],
        confidence: 0.85,
    },
    PublisherProfile {
        label: "cnbc",
        domains: &["cnbc.com"],
        content_selectors: &[".ArticleBody-articleBody", ".PageBuilder-article"],
        boilerplate_selectors: &[".RelatedContent-relatedContent", ".InlineVideo-container"],
        confidence: 0.8,
    },
    PublisherProfile {
        label: "yahoo-finance",
        domains: &["finance.yahoo.com", "news.yahoo.com"],
        content_selectors: &[".caas-body", ".body"],
        boilerplate_selectors: &[".caas-readmore", ".caas-attr-meta"],
        confidence: 0.8,
    },
    PublisherProfile {
        label: "techcrunch",
        domains: &["techcrunch.com"],
        content_selectors: &[".entry-content", ".article-content"],
        boilerplate_selectors: &[".wp-block-tc23-related-articles", ".ad-unit"],
        confidence: 0.85,
    },
    PublisherProfile {
        label: "coindesk",
        domains: &["coindesk.com"],
        content_selectors: &[".at-content-wrapper", ".article-body", "main article"],
        boilerplate_selectors: &[".article-ad", ".disclosure"],
        confidence: 0.8,
    },
];

/// Fallback for hosts without a dedicated profile.
pub(crate) const GENERIC: PublisherProfile = PublisherProfile {
    label: "generic",
    domains: &[],
    content_selectors: &[
        "article",
        "[role=\"main\"]",
        "main",
        ".article-body",
        ".article-content",
        ".story-body",
        ".post-content",
        ".entry-content",
        "#content",
    ],
    boilerplate_selectors: &[".related-articles", ".newsletter-signup", ".social-share"],
    confidence: 0.6,
};

/// Publishers accepted as resolution targets but extracted with the
/// generic cascade.
const EXTRA_ARTICLE_DOMAINS: &[&str] = &[
    "americanbanker.com",
    "apnews.com",
    "axios.com",
    "barrons.com",
    "bloomberg.com",
    "businessinsider.com",
    "finextra.com",
    "forbes.com",
    "fortune.com",
    "ft.com",
    "marketwatch.com",
    "pymnts.com",
    "seekingalpha.com",
    "theblock.co",
    "wsj.com",
];

pub(crate) fn profile_for_host(host: &str) -> Option<&'static PublisherProfile> {
    PUBLISHERS
        .iter()
        .find(|profile| profile.domains.iter().any(|domain| host_matches(host, domain)))
}

/// Whether `host` equals or is a subdomain of an allow-listed publisher.
pub(crate) fn is_allowed_article_host(host: &str) -> bool {
    PUBLISHERS
        .iter()
        .flat_map(|profile| profile.domains.iter())
        .chain(EXTRA_ARTICLE_DOMAINS.iter())
        .any(|domain| host_matches(host, domain))
}

fn host_matches(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

#[cfg(test)]
mod tests {
    use super::{is_allowed_article_host, profile_for_host};

    #[test]
    fn profile_lookup_matches_subdomains() {
        assert_eq!(
            profile_for_host("www.prnewswire.com").map(|p| p.label),
            Some("prnewswire")
        );
        assert_eq!(
            profile_for_host("prnewswire.com").map(|p| p.label),
            Some("prnewswire")
        );
        assert!(profile_for_host("example.com").is_none());
    }

    #[test]
    fn suffix_match_requires_a_dot_boundary() {
        assert!(!is_allowed_article_host("notreuters.com"));
        assert!(!is_allowed_article_host("evilreuters.com"));
        assert!(is_allowed_article_host("www.reuters.com"));
        assert!(is_allowed_article_host("bloomberg.com"));
    }
}
