//! HTTP-level tests for the feed fetcher: the status, empty-body, and
//! not-a-feed gates, plus per-feed isolation inside one batch.

use std::collections::BTreeMap;

use presswatch_core::keywords::{CategoryKeywords, KeywordsFile, LanguageKeywords};
use presswatch_core::{Company, FeedConfig, FeedKind, FintechCategory};
use presswatch_ingest::{Classifier, FeedFetcher, IngestError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RSS_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>Financial Wire</title>
<item>
  <title>Blackstone Announces Record Q4 2024 Results</title>
  <link>https://example.com/bx-q4</link>
  <description><![CDATA[<p>Assets under management reached $1.3 trillion.</p>]]></description>
  <pubDate>Mon, 06 Jan 2025 13:00:00 GMT</pubDate>
  <guid>bx-q4-2024</guid>
</item>
</channel></rss>"#;

fn classifier() -> Classifier {
    let mut non_english = BTreeMap::new();
    for (language, patterns) in [
        ("spanish", vec![r"\bel\b", r"\bmillones\b"]),
        ("french", vec![r"\bune\b", r"\bpour\b"]),
        ("german", vec![r"\bund\b", r"\bmillionen\b"]),
        ("italian", vec![r"\bil\b", r"\bmilioni\b"]),
        ("portuguese", vec![r"\bpara\b", r"\bmilhões\b"]),
    ] {
        non_english.insert(
            language.to_string(),
            patterns.into_iter().map(str::to_string).collect(),
        );
    }
    let mut fintech = BTreeMap::new();
    fintech.insert(
        FintechCategory::Markets,
        CategoryKeywords {
            keywords: vec!["earnings".to_string()],
            patterns: vec![
                r"q[1-4]\s+20\d{2}".to_string(),
                r"\$\d+(\.\d+)?\s*(million|billion|trillion)".to_string(),
            ],
        },
    );
    let keywords = KeywordsFile {
        language: LanguageKeywords {
            english: vec![r"\bthe\b".to_string(), r"\band\b".to_string()],
            non_english,
        },
        fintech,
    };
    let roster = vec![Company {
        id: "blackstone".to_string(),
        name: "Blackstone".to_string(),
        variations: vec!["BX".to_string()],
    }];
    Classifier::new(&keywords, roster).expect("tables compile")
}

fn fetcher() -> FeedFetcher {
    FeedFetcher::new(5, "presswatch-test/0.1").expect("client builds")
}

fn feed_at(url: String) -> FeedConfig {
    FeedConfig {
        id: "wire".to_string(),
        name: "Financial Wire".to_string(),
        url,
        kind: FeedKind::PressWire,
    }
}

#[tokio::test]
async fn fetch_feed_parses_and_classifies_a_live_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(RSS_BODY, "application/rss+xml"))
        .mount(&server)
        .await;

    let parsed = fetcher()
        .fetch_feed(&feed_at(format!("{}/feed.xml", server.uri())), &classifier())
        .await
        .expect("fetch succeeds");

    assert_eq!(parsed.items.len(), 1);
    let classified = &parsed.items[0];
    assert_eq!(classified.item.title, "Blackstone Announces Record Q4 2024 Results");
    assert_eq!(
        classified.item.description,
        "Assets under management reached $1.3 trillion."
    );
    assert_eq!(classified.company_mentions, vec!["Blackstone".to_string()]);
    assert!(classified.is_fintech);
    assert_eq!(classified.relevance_score, 100);
}

#[tokio::test]
async fn non_2xx_status_maps_to_unexpected_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed.xml"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = fetcher()
        .fetch_feed(&feed_at(format!("{}/feed.xml", server.uri())), &classifier())
        .await
        .expect_err("status gate fires");

    match err {
        IngestError::UnexpectedStatus { status, .. } => assert_eq!(status, 503),
        other => panic!("expected UnexpectedStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn blank_body_maps_to_empty_feed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string("   \n  "))
        .mount(&server)
        .await;

    let err = fetcher()
        .fetch_feed(&feed_at(format!("{}/feed.xml", server.uri())), &classifier())
        .await
        .expect_err("empty gate fires");

    assert!(matches!(err, IngestError::EmptyFeed { .. }));
}

#[tokio::test]
async fn html_body_maps_to_not_rss() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><body>maintenance page</body></html>", "text/html"),
        )
        .mount(&server)
        .await;

    let err = fetcher()
        .fetch_feed(&feed_at(format!("{}/feed.xml", server.uri())), &classifier())
        .await
        .expect_err("feed marker gate fires");

    assert!(matches!(err, IngestError::NotRss { .. }));
}

#[tokio::test]
async fn one_failing_feed_leaves_siblings_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/good.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(RSS_BODY, "application/rss+xml"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bad.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;

    let feeds = vec![
        FeedConfig {
            id: "good".to_string(),
            name: "Good Wire".to_string(),
            url: format!("{}/good.xml", server.uri()),
            kind: FeedKind::PressWire,
        },
        FeedConfig {
            id: "bad".to_string(),
            name: "Bad Wire".to_string(),
            url: format!("{}/bad.xml", server.uri()),
            kind: FeedKind::PressWire,
        },
    ];

    let results = fetcher().fetch_all_feeds(&feeds, &classifier()).await;

    assert_eq!(results.len(), 2);
    assert!(results[0].is_success());
    assert_eq!(results[0].items.len(), 1);
    assert!(!results[1].is_success());
    let error = results[1].error.as_deref().expect("error string present");
    assert!(error.contains("empty body"), "unexpected error: {error}");
}
