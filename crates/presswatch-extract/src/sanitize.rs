//! Allow-list HTML sanitizer with a plain-text rendition.

use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

/// Tags preserved in sanitized output. Anything else unwraps to its
/// children; attributes are never carried over.
const ALLOWED_TAGS: &[&str] = &[
    "p", "br", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li", "em", "strong", "blockquote",
];

/// Subtrees dropped wholesale.
const DROPPED_TAGS: &[&str] = &[
    "script", "style", "noscript", "iframe", "svg", "form", "nav", "header", "footer", "aside",
    "button", "figure", "video",
];

#[derive(Debug)]
pub(crate) struct Sanitized {
    pub html: String,
    pub text: String,
}

/// Render `root` keeping only the allowed tag subset, skipping dropped and
/// boilerplate subtrees, and derive a whitespace-collapsed text rendition.
pub(crate) fn sanitize_element(root: ElementRef<'_>, boilerplate: &[Selector]) -> Sanitized {
    let mut html = String::new();
    let mut text = String::new();
    render(root, boilerplate, &mut html, &mut text);

    Sanitized {
        html: html.trim().to_string(),
        text: text.split_whitespace().collect::<Vec<_>>().join(" "),
    }
}

/// Sanitize a detached HTML fragment.
pub(crate) fn sanitize_fragment(fragment: &str, boilerplate: &[Selector]) -> Sanitized {
    let parsed = Html::parse_fragment(fragment);
    sanitize_element(parsed.root_element(), boilerplate)
}

fn render(element: ElementRef<'_>, boilerplate: &[Selector], html: &mut String, text: &mut String) {
    let name = element.value().name();
    if DROPPED_TAGS.contains(&name) {
        return;
    }
    if boilerplate.iter().any(|selector| selector.matches(&element)) {
        return;
    }
    if name == "br" {
        html.push_str("<br>");
        text.push(' ');
        return;
    }

    let keep = ALLOWED_TAGS.contains(&name);
    if keep {
        html.push('<');
        html.push_str(name);
        html.push('>');
    }

    for child in element.children() {
        match child.value() {
            Node::Text(chunk) => {
                html.push_str(&html_escape::encode_text(&**chunk));
                text.push_str(chunk);
            }
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    render(child_element, boilerplate, html, text);
                }
            }
            _ => {}
        }
    }

    if keep {
        html.push_str("</");
        html.push_str(name);
        html.push('>');
    }
    if is_block(name) {
        text.push(' ');
    }
}

fn is_block(name: &str) -> bool {
    matches!(
        name,
        "p" | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "ul"
            | "ol"
            | "li"
            | "blockquote"
            | "div"
            | "section"
            | "article"
            | "table"
            | "tr"
    )
}
