//! Streaming parser for RSS 2.0 `<item>` blocks.
//!
//! Only the item fields the pipeline stores are read; everything else in
//! the channel is skipped. Atom bodies pass the fetch gate but yield no
//! `<item>` elements and therefore no items.

use chrono::{DateTime, Utc};
use presswatch_core::{FeedConfig, FeedItem};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::classify::Classifier;
use crate::error::IngestError;
use crate::text;

use super::ParsedFeed;

/// Field accumulator that prefers CDATA content over inline text.
///
/// Feeds that wrap a field in CDATA often also emit stray text nodes around
/// the section; once CDATA has been seen for the current field, plain text
/// nodes are ignored.
#[derive(Default)]
struct FieldBuf {
    value: String,
    from_cdata: bool,
}

impl FieldBuf {
    fn clear(&mut self) {
        self.value.clear();
        self.from_cdata = false;
    }

    fn push_text(&mut self, text: &str) {
        if self.from_cdata {
            return;
        }
        if !self.value.is_empty() {
            self.value.push(' ');
        }
        self.value.push_str(text);
    }

    fn push_cdata(&mut self, text: &str) {
        if !self.from_cdata {
            self.value.clear();
            self.from_cdata = true;
        }
        if !self.value.is_empty() {
            self.value.push(' ');
        }
        self.value.push_str(text);
    }

    fn take(&mut self) -> String {
        std::mem::take(&mut self.value)
    }
}

/// Parse a feed body into classified items.
///
/// Items lacking a title or link are dropped and counted, never an error;
/// general-news items failing the English screen are dropped and counted
/// separately. Item order follows document order.
///
/// # Errors
///
/// Returns [`IngestError::Xml`] on malformed XML. The fetcher's body gate
/// has already established this looks like a feed, so a syntax error here
/// means a truncated or corrupt response.
pub fn parse_feed_xml(
    xml: &str,
    feed: &FeedConfig,
    classifier: &Classifier,
) -> Result<ParsedFeed, IngestError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut parsed = ParsedFeed {
        items: Vec::new(),
        skipped: 0,
        dropped_non_english: 0,
    };

    let mut in_item = false;
    let mut current_tag = String::new();
    let mut title = FieldBuf::default();
    let mut description = FieldBuf::default();
    let mut link = FieldBuf::default();
    let mut guid = FieldBuf::default();
    let mut pub_date = FieldBuf::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if name == "item" {
                    in_item = true;
                    title.clear();
                    description.clear();
                    link.clear();
                    guid.clear();
                    pub_date.clear();
                }
                current_tag = name;
            }
            Ok(Event::End(e)) => {
                let name_buf = e.name().as_ref().to_vec();
                let name = String::from_utf8_lossy(&name_buf);
                if name == "item" && in_item {
                    in_item = false;
                    let item_title = text::collapse_whitespace(&title.take());
                    let item_link = link.take().trim().to_string();
                    if item_title.is_empty() || item_link.is_empty() {
                        parsed.skipped += 1;
                    } else {
                        let raw_guid = guid.take();
                        let trimmed_guid = raw_guid.trim();
                        let item = FeedItem {
                            title: item_title,
                            description: text::strip_html(&description.take()),
                            published_at: parse_item_date(&pub_date.take()),
                            link: item_link,
                            guid: (!trimmed_guid.is_empty()).then(|| trimmed_guid.to_string()),
                            source_feed_id: feed.id.clone(),
                            source_name: feed.name.clone(),
                            feed_kind: feed.kind,
                        };
                        match classifier.classify(item) {
                            Some(classified) => parsed.items.push(classified),
                            None => parsed.dropped_non_english += 1,
                        }
                    }
                }
                current_tag.clear();
            }
            Ok(Event::Text(e)) => {
                if in_item {
                    let value = e.unescape().unwrap_or_default().into_owned();
                    if let Some(field) = field_for(
                        &current_tag,
                        &mut title,
                        &mut description,
                        &mut link,
                        &mut guid,
                        &mut pub_date,
                    ) {
                        field.push_text(&value);
                    }
                }
            }
            Ok(Event::CData(e)) => {
                if in_item {
                    let value = String::from_utf8_lossy(e.as_ref()).into_owned();
                    if let Some(field) = field_for(
                        &current_tag,
                        &mut title,
                        &mut description,
                        &mut link,
                        &mut guid,
                        &mut pub_date,
                    ) {
                        field.push_cdata(&value);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(IngestError::Xml(e)),
            _ => {}
        }
    }

    Ok(parsed)
}

fn field_for<'a>(
    tag: &str,
    title: &'a mut FieldBuf,
    description: &'a mut FieldBuf,
    link: &'a mut FieldBuf,
    guid: &'a mut FieldBuf,
    pub_date: &'a mut FieldBuf,
) -> Option<&'a mut FieldBuf> {
    match tag {
        "title" => Some(title),
        "description" => Some(description),
        "link" => Some(link),
        "guid" => Some(guid),
        "pubDate" => Some(pub_date),
        _ => None,
    }
}

/// RFC 2822 (`Mon, 06 Jan 2025 13:00:00 GMT`) with RFC 3339 tolerated;
/// anything else is an absent date, not an error.
fn parse_item_date(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc2822(trimmed)
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed))
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}
