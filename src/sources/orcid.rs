//! ORCID public API source implementation.
//!
//! Reads a researcher's works from the ORCID public record and condenses them
//! into a [`PublicationsDocument`]. API documentation:
//! https://info.orcid.org/documentation/api-tutorials/
//!
//! Works on non-public records return 401/403/404; those surface as
//! [`SourceError::Api`].

use std::sync::OnceLock;

use chrono::Utc;
use regex::Regex;
use serde::Deserialize;

use crate::models::{Publication, PublicationsDocument, Year};
use crate::sources::SourceError;
use crate::utils::{collapse_whitespace, HttpClient};

const ORCID_API_BASE: &str = "https://pub.orcid.org";

fn orcid_id_format() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{4}-\d{4}-\d{3}[\dX]$").expect("ORCID iD regex is valid")
    })
}

/// ORCID publication source
///
/// Fetches the works section of a public ORCID record and flattens each work
/// group into one [`Publication`].
#[derive(Debug, Clone)]
pub struct OrcidClient {
    client: HttpClient,
    base_url: String,
    orcid_id: String,
}

impl OrcidClient {
    /// Create a client for the given ORCID iD (e.g. `0000-0002-1825-0097`)
    pub fn new(orcid_id: impl Into<String>) -> Result<Self, SourceError> {
        Self::with_base_url(orcid_id, ORCID_API_BASE)
    }

    /// Create a client against a non-default API endpoint (used in tests and
    /// against the ORCID sandbox)
    pub fn with_base_url(
        orcid_id: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, SourceError> {
        let orcid_id = orcid_id.into();
        if !orcid_id_format().is_match(&orcid_id) {
            return Err(SourceError::InvalidRequest(format!(
                "not a valid ORCID iD: {:?}",
                orcid_id
            )));
        }

        Ok(Self {
            client: HttpClient::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            orcid_id,
        })
    }

    /// Fetch the record's works and build the publications document
    pub async fn fetch_publications(&self) -> Result<PublicationsDocument, SourceError> {
        let url = format!("{}/v3.0/{}/works", self.base_url, self.orcid_id);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to fetch ORCID works: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(SourceError::Api(format!(
                "ORCID API returned status {}: {}",
                status, text
            )));
        }

        let works: WorksResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to parse ORCID response: {}", e)))?;

        let mut publications = flatten_groups(&works);
        sort_publications(&mut publications);

        Ok(PublicationsDocument {
            orcid: Some(self.orcid_id.clone()),
            generated_utc: Utc::now().to_rfc3339(),
            count: publications.len(),
            publications,
        })
    }
}

/// One publication per work group, taken from the group's first summary
fn flatten_groups(works: &WorksResponse) -> Vec<Publication> {
    works
        .group
        .iter()
        .filter_map(|group| group.work_summary.first())
        .map(publication_from_summary)
        .collect()
}

fn publication_from_summary(summary: &WorkSummary) -> Publication {
    let title = summary
        .title
        .as_ref()
        .and_then(|t| t.title.as_ref())
        .and_then(|t| t.value.as_deref())
        .map(collapse_whitespace)
        .filter(|t| !t.is_empty());

    let kind = summary
        .work_type
        .as_deref()
        .map(collapse_whitespace)
        .filter(|t| !t.is_empty());

    let year = summary
        .publication_date
        .as_ref()
        .and_then(|d| d.year.as_ref())
        .and_then(|y| y.value.as_deref())
        .and_then(|v| v.trim().parse::<i64>().ok())
        .map(Year::Number);

    let (doi, url) = resolve_link(summary.external_ids.as_ref());

    Publication {
        title,
        year,
        kind,
        doi,
        url,
        put_code: summary.put_code,
    }
}

/// Pick the work's landing link: a DOI gives both `doi` and a doi.org URL,
/// any other identifier contributes its own URL when it carries one.
fn resolve_link(external_ids: Option<&ExternalIds>) -> (Option<String>, Option<String>) {
    let Some(ext) = external_ids.and_then(best_external_id) else {
        return (None, None);
    };

    let id_type = ext
        .id_type
        .as_deref()
        .map(collapse_whitespace)
        .unwrap_or_default()
        .to_lowercase();
    let id_value = ext
        .value
        .as_deref()
        .map(collapse_whitespace)
        .unwrap_or_default();
    let id_url = ext
        .url
        .as_ref()
        .and_then(|u| u.value.as_deref())
        .map(collapse_whitespace)
        .unwrap_or_default();

    if id_type == "doi" && !id_value.is_empty() {
        let url = format!("https://doi.org/{}", id_value);
        (Some(id_value), Some(url))
    } else if !id_url.is_empty() {
        (None, Some(id_url))
    } else {
        (None, None)
    }
}

/// Prefer a DOI over any other identifier type; fall back to the first listed
fn best_external_id(external_ids: &ExternalIds) -> Option<&ExternalId> {
    external_ids
        .external_id
        .iter()
        .find(|id| {
            id.id_type
                .as_deref()
                .is_some_and(|t| t.trim().eq_ignore_ascii_case("doi"))
        })
        .or_else(|| external_ids.external_id.first())
}

/// Newest first; works without a year sink to the end; ties ordered by title
fn sort_publications(publications: &mut [Publication]) {
    publications.sort_by(|a, b| {
        let year = |p: &Publication| match p.year {
            Some(Year::Number(n)) => Some(n),
            _ => None,
        };
        let title = |p: &Publication| p.title().unwrap_or_default().to_lowercase();

        match (year(a), year(b)) {
            (Some(x), Some(y)) => y.cmp(&x).then_with(|| title(a).cmp(&title(b))),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => title(a).cmp(&title(b)),
        }
    });
}

/// ORCID works API response (the subset this crate reads)
#[derive(Debug, Deserialize)]
struct WorksResponse {
    #[serde(default)]
    group: Vec<WorkGroup>,
}

#[derive(Debug, Deserialize)]
struct WorkGroup {
    #[serde(default, rename = "work-summary")]
    work_summary: Vec<WorkSummary>,
}

#[derive(Debug, Deserialize)]
struct WorkSummary {
    title: Option<TitleContainer>,
    #[serde(rename = "type")]
    work_type: Option<String>,
    #[serde(rename = "publication-date")]
    publication_date: Option<PublicationDate>,
    #[serde(rename = "external-ids")]
    external_ids: Option<ExternalIds>,
    #[serde(rename = "put-code")]
    put_code: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TitleContainer {
    title: Option<TitleValue>,
}

#[derive(Debug, Deserialize)]
struct TitleValue {
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PublicationDate {
    year: Option<YearValue>,
}

#[derive(Debug, Deserialize)]
struct YearValue {
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExternalIds {
    #[serde(default, rename = "external-id")]
    external_id: Vec<ExternalId>,
}

#[derive(Debug, Deserialize)]
struct ExternalId {
    #[serde(rename = "external-id-type")]
    id_type: Option<String>,
    #[serde(rename = "external-id-value")]
    value: Option<String>,
    #[serde(rename = "external-id-url")]
    url: Option<ExternalIdUrl>,
}

#[derive(Debug, Deserialize)]
struct ExternalIdUrl {
    value: Option<String>,
}
