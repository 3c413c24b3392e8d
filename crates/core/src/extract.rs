//! Article text extraction.
//!
//! This module locates article-like containers in a parsed document and
//! normalizes their visible text into a single lowercase string suitable
//! for word counting.

use crate::Result;
use crate::parse::Document;

/// Selector set for article-like containers.
///
/// Plain `<article>` elements plus the class-based containers used by the
/// news frontpages this tool was written against.
pub const ARTICLE_SELECTORS: &str = "article, .article, .article-content, .df-article-content";

/// Extracts normalized article text from a parsed document.
///
/// Every element matching [`ARTICLE_SELECTORS`] contributes one segment:
/// its full visible text with line breaks collapsed to single spaces,
/// trimmed, and lowercased. Segments are joined with newlines in document
/// order. Returns an empty string when nothing matches; the pipeline treats
/// that as a terminal error for the page.
///
/// # Example
///
/// ```rust
/// use ordsky_core::{extract_text, parse::Document};
///
/// let doc = Document::parse("<article>Hunden\nog katten</article>").unwrap();
/// assert_eq!(extract_text(&doc).unwrap(), "hunden og katten");
/// ```
pub fn extract_text(doc: &Document) -> Result<String> {
    let segments: Vec<String> = doc
        .select(ARTICLE_SELECTORS)?
        .iter()
        .map(|element| normalize_segment(&element.text()))
        .collect();

    Ok(segments.join("\n"))
}

/// Collapses line breaks to single spaces, trims, and lowercases.
fn normalize_segment(text: &str) -> String {
    text.lines().collect::<Vec<_>>().join(" ").trim().to_lowercase()
}
