//! Pure HTML fragment construction for the publications list.
//!
//! Nothing here touches the network or the page; these functions turn a
//! [`PublicationsDocument`] into the exact strings the renderer splices into
//! the host page.

use crate::models::{Publication, PublicationsDocument};

/// User-facing text shown in the metadata region when the document cannot be
/// fetched or parsed
pub const FALLBACK_MESSAGE: &str = "Publications could not be loaded.";

/// Metadata line summarizing the document
pub fn meta_line(document: &PublicationsDocument) -> String {
    format!(
        "Total: {} | Updated (UTC): {}",
        document.count, document.generated_utc
    )
}

/// Render the publications as a sequence of `<li>` fragments, in input order.
///
/// Records without a title are skipped silently.
pub fn list_items(publications: &[Publication]) -> String {
    publications
        .iter()
        .filter_map(list_item)
        .collect::<Vec<_>>()
        .join("\n")
}

fn list_item(publication: &Publication) -> Option<String> {
    let title = publication.title()?;
    let title_span = format!("<span>{}</span>", escape(title));

    let mut item = String::from("<li>");
    match publication.url() {
        Some(url) => item.push_str(&format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
            escape(url),
            title_span
        )),
        None => item.push_str(&title_span),
    }

    if let Some(info) = info_line(publication) {
        item.push_str(&format!(
            r#"<div style="opacity:0.85;font-size:0.9rem">{}</div>"#,
            escape(&info)
        ));
    }

    item.push_str("</li>");
    Some(item)
}

/// Secondary info line: whichever of year, type and `DOI: <doi>` are present,
/// joined with `" | "`. `None` when no piece is present.
pub fn info_line(publication: &Publication) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(year) = publication.year() {
        parts.push(year.to_string());
    }
    if let Some(kind) = publication.kind() {
        parts.push(kind.to_string());
    }
    if let Some(doi) = publication.doi() {
        parts.push(format!("DOI: {}", doi));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" | "))
    }
}

/// Minimal HTML escaping for text and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
