use super::{ContentExtractor, ExtractOptions};
use crate::error::ExtractError;

fn extractor() -> ContentExtractor {
    ContentExtractor::new(ExtractOptions::default()).expect("client should build")
}

const BODY_PARAGRAPHS: &str = "<p>Blackstone announced today that total assets under management \
     reached a new record in the fourth quarter.</p>\
     <p>Management fees grew by double digits year over year across the credit and insurance \
     segments.</p>\
     <p>The firm declared a quarterly dividend payable next month to holders of record at the \
     close of business.</p>";

#[test]
fn publisher_profile_wins_and_strips_its_boilerplate() {
    let html = format!(
        r#"<html><head><title>Blackstone Reports Record Results</title></head><body>
        <section class="release-body">{BODY_PARAGRAPHS}
        <div class="pr-contact"><p>Media Contact: John Smith, 212-555-0100, press@example.com</p></div>
        </section>
        </body></html>"#
    );

    let content = extractor()
        .extract_from_html("www.prnewswire.com", &html)
        .expect("publisher cascade should match");

    assert_eq!(content.extracted_by, "prnewswire");
    assert!((content.confidence - 0.9).abs() < f32::EPSILON);
    assert_eq!(content.title.as_deref(), Some("Blackstone Reports Record Results"));
    assert!(content.text.contains("assets under management"));
    assert!(!content.text.contains("Media Contact"));
    assert!(content.html.starts_with("<p>"));
}

#[test]
fn unknown_host_falls_back_to_generic_cascade() {
    let html = format!("<html><body><article>{BODY_PARAGRAPHS}</article></body></html>");

    let content = extractor()
        .extract_from_html("example-news.com", &html)
        .expect("generic cascade should match");

    assert_eq!(content.extracted_by, "generic");
    assert!((content.confidence - 0.6).abs() < f32::EPSILON);
    assert!(content.title.is_none());
}

#[test]
fn open_graph_title_beats_the_title_tag() {
    let html = format!(
        r#"<html><head>
        <title>Blackstone Reports Record Results | PR Newswire</title>
        <meta property="og:title" content="Blackstone Reports Record Results">
        </head><body><article>{BODY_PARAGRAPHS}</article></body></html>"#
    );

    let content = extractor()
        .extract_from_html("example-news.com", &html)
        .expect("generic cascade should match");

    assert_eq!(content.title.as_deref(), Some("Blackstone Reports Record Results"));
}

#[test]
fn paragraph_run_recovers_unmarked_layouts() {
    let html = format!(r#"<html><body><div class="page">{BODY_PARAGRAPHS}</div></body></html>"#);

    let content = extractor()
        .extract_from_html("example-news.com", &html)
        .expect("paragraph fallback should match");

    assert_eq!(content.extracted_by, "paragraph-run");
    assert!((content.confidence - 0.5).abs() < f32::EPSILON);
    assert!(content.text.contains("quarterly dividend"));
}

#[test]
fn region_scan_recovers_section_only_layouts() {
    let html = "<html><body><section><span>Blackstone announced today that total assets \
         under management reached a new record in the fourth quarter. Management fees grew by \
         double digits year over year across the credit and insurance segments. The firm \
         declared a quarterly dividend payable next month to holders of record.</span>\
         </section></body></html>";

    let content = extractor()
        .extract_from_html("example-news.com", html)
        .expect("region fallback should match");

    assert_eq!(content.extracted_by, "region-scan");
    assert!((content.confidence - 0.4).abs() < f32::EPSILON);
}

#[test]
fn dateline_marker_recovers_wire_copy() {
    let html = "<html><body><div><b>NEW YORK, NY, January 6, 2025 --</b> Blackstone Inc. today \
         reported record quarterly results. Assets under management rose sharply across every \
         segment of the business. The firm credited sustained inflows from insurance and \
         private wealth clients for the growth.</div></body></html>";

    let content = extractor()
        .extract_from_html("example-news.com", html)
        .expect("dateline fallback should match");

    assert_eq!(content.extracted_by, "dateline");
    assert!((content.confidence - 0.3).abs() < f32::EPSILON);
    assert!(content.text.starts_with("Blackstone Inc."));
    assert!(!content.text.contains("NEW YORK"));
}

#[test]
fn rejects_pages_with_no_acceptable_content() {
    let err = extractor()
        .extract_from_html("example-news.com", "<html><body><p>short</p></body></html>")
        .expect_err("junk page should be rejected");

    match err {
        ExtractError::QualityRejected { attempts } => assert_eq!(attempts, 3),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn metrics_count_outcomes_by_strategy_family() {
    let ex = extractor();

    let publisher = format!(
        r#"<html><body><section class="release-body">{BODY_PARAGRAPHS}</section></body></html>"#
    );
    let generic = format!("<html><body><article>{BODY_PARAGRAPHS}</article></body></html>");
    let fallback = format!("<html><body><div>{BODY_PARAGRAPHS}</div></body></html>");

    ex.extract_from_html("www.prnewswire.com", &publisher)
        .expect("publisher extraction");
    ex.extract_from_html("example-news.com", &generic)
        .expect("generic extraction");
    ex.extract_from_html("example-news.com", &fallback)
        .expect("fallback extraction");
    ex.extract_from_html("example-news.com", "<html><body></body></html>")
        .expect_err("empty page");

    let snap = ex.metrics();
    assert_eq!(snap.attempts, 4);
    assert_eq!(snap.publisher_successes, 1);
    assert_eq!(snap.generic_successes, 1);
    assert_eq!(snap.fallback_successes, 1);
    assert_eq!(snap.failures, 1);
}
