//! Publication model representing one work in the publications document.

use serde::{Deserialize, Serialize};

/// The JSON document listing a researcher's publications.
///
/// Produced by the ORCID generator and consumed by the page renderer. The
/// renderer only needs `count`, `generated_utc` and `publications`; `orcid`
/// records which iD the document was generated for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicationsDocument {
    /// ORCID iD the document was generated for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orcid: Option<String>,

    /// Timestamp of document production (RFC 3339, UTC)
    pub generated_utc: String,

    /// Total number of publications reported
    pub count: usize,

    /// Publications in display order; absent field reads as empty
    #[serde(default)]
    pub publications: Vec<Publication>,
}

/// A single publication record.
///
/// All fields are optional at the serialization layer because documents in the
/// wild carry empty strings for missing values. Use the presence accessors
/// (`title()`, `url()`, `doi()`, `kind()`) rather than the raw fields when
/// deciding what to display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Publication {
    /// Work title; records without one are skipped by the renderer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Publication year, string or numeric in JSON
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<Year>,

    /// Work type (journal-article, conference-paper, book-chapter, ...)
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Digital Object Identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,

    /// Landing page URL (derived from the DOI when one exists)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// ORCID put-code identifying the work within the record
    #[serde(
        default,
        rename = "orcid_put_code",
        skip_serializing_if = "Option::is_none"
    )]
    pub put_code: Option<u64>,
}

impl Publication {
    /// Title, if present and non-empty
    pub fn title(&self) -> Option<&str> {
        present(&self.title)
    }

    /// Landing page URL, if present and non-empty
    pub fn url(&self) -> Option<&str> {
        present(&self.url)
    }

    /// DOI, if present and non-empty
    pub fn doi(&self) -> Option<&str> {
        present(&self.doi)
    }

    /// Work type, if present and non-empty
    pub fn kind(&self) -> Option<&str> {
        present(&self.kind)
    }

    /// Year, if present and (for string years) non-empty.
    ///
    /// A numeric year is always present when set; year `0` still displays.
    pub fn year(&self) -> Option<&Year> {
        self.year.as_ref().filter(|y| !y.is_blank())
    }
}

/// Treat `None` and whitespace-only strings alike: older generator versions
/// wrote `""` for missing `doi`/`url`.
fn present(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Publication year as it appears in the document: either a JSON number or a
/// string, preserved as-is for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Year {
    Number(i64),
    Text(String),
}

impl Year {
    fn is_blank(&self) -> bool {
        match self {
            Year::Number(_) => false,
            Year::Text(s) => s.trim().is_empty(),
        }
    }
}

impl std::fmt::Display for Year {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Year::Number(n) => write!(f, "{}", n),
            Year::Text(s) => write!(f, "{}", s.trim()),
        }
    }
}

impl From<i64> for Year {
    fn from(n: i64) -> Self {
        Year::Number(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_strings_read_as_absent() {
        let publication = Publication {
            title: Some("Paper".to_string()),
            doi: Some(String::new()),
            url: Some("  ".to_string()),
            ..Default::default()
        };

        assert_eq!(publication.title(), Some("Paper"));
        assert_eq!(publication.doi(), None);
        assert_eq!(publication.url(), None);
    }

    #[test]
    fn test_year_zero_is_present() {
        let publication = Publication {
            year: Some(Year::Number(0)),
            ..Default::default()
        };

        assert_eq!(publication.year(), Some(&Year::Number(0)));
        assert_eq!(publication.year().unwrap().to_string(), "0");
    }

    #[test]
    fn test_year_deserializes_from_number_or_string() {
        let numeric: Publication = serde_json::from_str(r#"{"year": 2020}"#).unwrap();
        let text: Publication = serde_json::from_str(r#"{"year": "2020"}"#).unwrap();

        assert_eq!(numeric.year, Some(Year::Number(2020)));
        assert_eq!(text.year, Some(Year::Text("2020".to_string())));
        assert_eq!(numeric.year().unwrap().to_string(), "2020");
        assert_eq!(text.year().unwrap().to_string(), "2020");
    }

    #[test]
    fn test_document_defaults_missing_publications_to_empty() {
        let doc: PublicationsDocument =
            serde_json::from_str(r#"{"generated_utc": "2024-01-01T00:00:00Z", "count": 0}"#)
                .unwrap();

        assert!(doc.publications.is_empty());
        assert_eq!(doc.count, 0);
    }

    #[test]
    fn test_type_field_round_trips_under_its_wire_name() {
        let publication: Publication =
            serde_json::from_str(r#"{"title": "T", "type": "journal-article"}"#).unwrap();
        assert_eq!(publication.kind(), Some("journal-article"));

        let json = serde_json::to_value(&publication).unwrap();
        assert_eq!(json["type"], "journal-article");
    }
}
