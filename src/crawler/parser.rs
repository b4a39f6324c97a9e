//! HTML parser turning fetched content into text, links and extractions
//!
//! `scraper::Html` is not `Send`, so everything that needs the parsed tree
//! happens inside [`parse_page`] and only owned results leave it.

use crate::extract::{extract_page, PageExtraction};
use once_cell::sync::Lazy;
use scraper::node::Node;
use scraper::{Html, Selector};

/// Elements whose text never counts as page content
const NON_CONTENT_ELEMENTS: &[&str] = &["script", "style", "noscript"];

static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());

static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// Extracted information from an HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// Visible text with whitespace runs collapsed to single spaces
    pub text: String,

    /// Raw `href` values of every anchor, in document order
    pub links: Vec<String>,

    /// Words, entities and metadata found on the page
    pub extraction: PageExtraction,
}

/// Parses HTML content and runs the extraction engine over it
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `min_word_length` - Shortest word kept by the extraction engine
///
/// # Example
///
/// ```
/// use wordforge::crawler::parse_page;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let parsed = parse_page(html, 3);
/// assert_eq!(parsed.title, Some("Test".to_string()));
/// assert_eq!(parsed.links, vec!["/page".to_string()]);
/// ```
pub fn parse_page(html: &str, min_word_length: usize) -> ParsedPage {
    let document = Html::parse_document(html);

    let title = extract_title(&document);
    let text = visible_text(&document);
    let links = extract_hrefs(&document);
    let extraction = extract_page(&text, &document, min_word_length);

    ParsedPage {
        title,
        text,
        links,
        extraction,
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Collects text nodes outside script/style and normalizes whitespace
///
/// Text nodes are concatenated as they appear, so words split by inline
/// markup (`get<b>User</b>Name`) stay whole; only whitespace present in the
/// document separates words.
pub fn visible_text(document: &Html) -> String {
    let mut chunks: Vec<&str> = Vec::new();

    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            matches!(ancestor.value(), Node::Element(e) if NON_CONTENT_ELEMENTS.contains(&e.name()))
        });
        if !hidden {
            chunks.push(&**text);
        }
    }

    collapse_whitespace(&chunks.concat())
}

/// Collapses every whitespace run (including blank lines) into one space
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns the raw `href` of every anchor; resolution happens in the link filter
fn extract_hrefs(document: &Html) -> Vec<String> {
    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.to_string())
        .collect()
}
