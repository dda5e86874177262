//! Host page handling: locating the presentation regions and replacing their
//! content in place.
//!
//! The page owns two regions identified by element id (`pub-meta` and
//! `pub-list`). Each write replaces the region's entire inner content, so
//! repeated renders replace rather than append.

use std::ops::Range;
use std::path::Path;

use regex::Regex;
use scraper::{Html, Selector};

use crate::render::html::escape;
use crate::render::RenderError;

/// An HTML page containing the presentation regions.
///
/// The original markup is preserved byte-for-byte outside the regions being
/// written. A region element must not nest another element of its own tag
/// name; the splice looks for the first matching close tag.
#[derive(Debug, Clone)]
pub struct Page {
    html: String,
}

impl Page {
    /// Wrap an HTML document held in memory
    pub fn from_html(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    /// Read the page from a file
    pub fn load(path: &Path) -> Result<Self, RenderError> {
        Ok(Self::from_html(std::fs::read_to_string(path)?))
    }

    /// Write the page out, creating parent directories as needed
    pub fn write_to(&self, path: &Path) -> Result<(), RenderError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, &self.html)?;
        Ok(())
    }

    /// The current page markup
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Replace a region's content with escaped text
    pub fn set_region_text(&mut self, id: &str, text: &str) -> Result<(), RenderError> {
        let escaped = escape(text);
        self.set_region_html(id, &escaped)
    }

    /// Replace a region's content with a raw HTML fragment
    pub fn set_region_html(&mut self, id: &str, fragment: &str) -> Result<(), RenderError> {
        let span = self.region_inner_span(id)?;
        self.html.replace_range(span, fragment);
        Ok(())
    }

    /// Byte range of the region element's inner content.
    ///
    /// Presence is checked with a real HTML parse first so a missing region
    /// produces a clear diagnostic; the splice positions come from matching
    /// the open tag in the raw markup.
    fn region_inner_span(&self, id: &str) -> Result<Range<usize>, RenderError> {
        let selector = Selector::parse(&format!("[id=\"{}\"]", id))
            .map_err(|e| RenderError::Template(format!("bad region id {:?}: {}", id, e)))?;
        if Html::parse_document(&self.html)
            .select(&selector)
            .next()
            .is_none()
        {
            return Err(RenderError::MissingRegion(id.to_string()));
        }

        let open_tag = Regex::new(&format!(
            r#"<([A-Za-z][A-Za-z0-9-]*)[^>]*\sid\s*=\s*["']{}["'][^>]*>"#,
            regex::escape(id)
        ))
        .map_err(|e| RenderError::Template(format!("bad region id {:?}: {}", id, e)))?;

        let captures = open_tag.captures(&self.html).ok_or_else(|| {
            RenderError::Template(format!(
                "region '{}' exists but its open tag could not be located",
                id
            ))
        })?;

        let whole = captures.get(0).expect("match always has a whole group");
        let tag = captures
            .get(1)
            .expect("open tag pattern always captures the tag name")
            .as_str();

        let inner_start = whole.end();
        let close_marker = format!("</{}", tag);
        let inner_len = self.html[inner_start..].find(&close_marker).ok_or_else(|| {
            RenderError::Template(format!("region '{}' has no closing </{}> tag", id, tag))
        })?;

        Ok(inner_start..inner_start + inner_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = concat!(
        "<html><body>",
        r#"<p id="pub-meta">loading…</p>"#,
        r#"<ul id="pub-list"><li>placeholder</li></ul>"#,
        "</body></html>"
    );

    #[test]
    fn test_region_content_is_fully_replaced() {
        let mut page = Page::from_html(PAGE);
        page.set_region_html("pub-list", "<li>new</li>").unwrap();

        assert!(page.html().contains(r#"<ul id="pub-list"><li>new</li></ul>"#));
        assert!(!page.html().contains("placeholder"));
    }

    #[test]
    fn test_repeated_writes_replace_rather_than_append() {
        let mut page = Page::from_html(PAGE);
        page.set_region_html("pub-list", "<li>first</li><li>second</li>")
            .unwrap();
        page.set_region_html("pub-list", "<li>third</li>").unwrap();

        assert_eq!(page.html().matches("<li>").count(), 1);
        assert!(page.html().contains("third"));
        assert!(!page.html().contains("first"));
    }

    #[test]
    fn test_text_writes_are_escaped() {
        let mut page = Page::from_html(PAGE);
        page.set_region_text("pub-meta", "<script>alert(1)</script>")
            .unwrap();

        assert!(page.html().contains("&lt;script&gt;"));
        assert!(!page.html().contains("<script>"));
    }

    #[test]
    fn test_missing_region_fails_fast() {
        let mut page = Page::from_html("<html><body></body></html>");
        let err = page.set_region_text("pub-meta", "x").unwrap_err();

        assert!(matches!(err, RenderError::MissingRegion(id) if id == "pub-meta"));
    }

    #[test]
    fn test_single_quoted_id_and_extra_attributes() {
        let mut page =
            Page::from_html(r#"<div class="wide" id='pub-meta' data-x="1">old</div>"#);
        page.set_region_text("pub-meta", "new").unwrap();

        assert!(page.html().contains(">new</div>"));
        assert!(page.html().contains(r#"class="wide""#));
    }

    #[test]
    fn test_markup_outside_regions_is_untouched() {
        let mut page = Page::from_html(PAGE);
        page.set_region_text("pub-meta", "Total: 1").unwrap();

        assert!(page.html().starts_with("<html><body>"));
        assert!(page.html().contains(r#"<li>placeholder</li>"#));
    }
}
