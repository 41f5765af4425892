//! Visible text collection
//!
//! Walks an element's subtree in document order, skipping non-rendered
//! content and separating block-level elements so that adjacent paragraphs
//! do not run their words together.

use ego_tree::iter::Edge;
use scraper::{ElementRef, Node};

/// Elements whose content is never rendered as text
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Elements that start a new line when rendered
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "caption", "dd", "details", "div",
    "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3",
    "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "ol", "option", "p", "pre",
    "section", "summary", "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

/// Collapses every run of whitespace into a single space and trims the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns the visible text under `root`, whitespace collapsed
///
/// The walk is iterative; arbitrarily deep nesting is safe.
pub fn visible_text(root: ElementRef<'_>) -> String {
    let mut raw = String::new();
    // Number of hidden elements currently open
    let mut hidden_depth = 0usize;

    for edge in root.traverse() {
        match edge {
            Edge::Open(node) => match node.value() {
                Node::Text(text) if hidden_depth == 0 => raw.push_str(text),
                Node::Element(el) if node.id() != root.id() => {
                    let name = el.name();
                    if HIDDEN_ELEMENTS.contains(&name) {
                        hidden_depth += 1;
                    } else if hidden_depth == 0 && BLOCK_ELEMENTS.contains(&name) {
                        raw.push(' ');
                    }
                }
                _ => {}
            },
            Edge::Close(node) => {
                if let Node::Element(el) = node.value() {
                    if node.id() == root.id() {
                        continue;
                    }
                    let name = el.name();
                    if HIDDEN_ELEMENTS.contains(&name) {
                        hidden_depth = hidden_depth.saturating_sub(1);
                    } else if hidden_depth == 0 && BLOCK_ELEMENTS.contains(&name) {
                        raw.push(' ');
                    }
                }
            }
        }
    }

    collapse_whitespace(&raw)
}
