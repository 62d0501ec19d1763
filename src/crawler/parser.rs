//! HTML parser for extracting page text and metadata
//!
//! This module handles parsing HTML content to extract:
//! - Page title
//! - Visible text, which is what addresses are searched for in

use scraper::{ElementRef, Html, Node, Selector};

/// Elements whose text content is never shown to a reader
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Phrasing elements that do not break the text flow
const INLINE_ELEMENTS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "cite", "code", "data", "dfn", "em", "font", "i", "kbd",
    "mark", "q", "s", "samp", "small", "span", "strong", "sub", "sup", "time", "u", "var", "wbr",
];

/// Extracted information from an HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// The page title (from <title> tag), trimmed; None when absent or blank
    pub title: Option<String>,

    /// Visible text, whitespace collapsed; block elements are space-separated
    pub text: String,
}

/// Parses HTML content and extracts the title and visible text
///
/// Block-level elements (paragraphs, cells, list items, line breaks) are
/// separated by a space; inline markup inside a word does not split it.
///
/// # Example
///
/// ```
/// use mailtrawl::crawler::parse_html;
///
/// let html = r#"<html><head><title>Test</title></head><body><p>Mail</p><p>a@b.io</p></body></html>"#;
/// let parsed = parse_html(html);
/// assert_eq!(parsed.title, Some("Test".to_string()));
/// assert!(parsed.text.contains("Mail a@b.io"));
/// ```
pub fn parse_html(html: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        text: extract_visible_text(&document),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Collects visible text, separating block-level content with whitespace
///
/// Text inside inline elements is joined to its neighbours as written, so
/// `info@<b>acme</b>.io` reads `info@acme.io`. Runs of whitespace collapse
/// to a single space.
fn extract_visible_text(document: &Html) -> String {
    let mut raw = String::new();
    collect_text(document.root_element(), &mut raw);
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                if HIDDEN_ELEMENTS.contains(&el.name()) {
                    continue;
                }
                let Some(child_element) = ElementRef::wrap(child) else {
                    continue;
                };

                let block = !INLINE_ELEMENTS.contains(&el.name());
                if block {
                    out.push(' ');
                }
                collect_text(child_element, out);
                if block {
                    out.push(' ');
                }
            }
            _ => {}
        }
    }
}
