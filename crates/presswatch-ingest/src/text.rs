//! Shared plain-text helpers: HTML stripping, whitespace collapsing, and
//! summary truncation.

/// Strip HTML tags from a string, decode entities, and normalize whitespace.
///
/// Feed descriptions frequently arrive with escaped markup
/// (`&lt;p&gt;...&lt;/p&gt;`); entities are decoded before tags are removed
/// so both escaped and literal markup reduce to the same plain text.
#[must_use]
pub fn strip_html(html: &str) -> String {
    let decoded = html_escape::decode_html_entities(html);
    let mut out = String::with_capacity(decoded.len());
    let mut in_tag = false;
    for ch in decoded.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    collapse_whitespace(&out)
}

/// Collapse runs of whitespace (including newlines) into single spaces and
/// trim the ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to at most `max_chars` characters on a char boundary.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    text.chars().take(max_chars).collect::<String>().trim_end().to_string()
}
