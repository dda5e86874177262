//! Rendering the publications document into a web page.
//!
//! [`PublicationsRenderer`] performs one linear attempt per invocation: fetch
//! the JSON document with cache-bypassing headers, then either render it into
//! the page's two regions or write the fallback message into the metadata
//! region. Network failures, non-2xx statuses and malformed bodies all
//! collapse into the same user-visible fallback; the underlying error goes to
//! the log only. The list region is left untouched on the fallback path.

pub mod html;
mod page;

pub use html::{info_line, list_items, meta_line, FALLBACK_MESSAGE};
pub use page::Page;

use url::Url;

use crate::models::PublicationsDocument;
use crate::utils::HttpClient;

/// Relative path of the publications document under the site base URL
pub const DOCUMENT_PATH: &str = "assets/publications.json";

/// Element id of the metadata text region
pub const META_REGION: &str = "pub-meta";

/// Element id of the list container region
pub const LIST_REGION: &str = "pub-list";

/// Errors that can occur while rendering the publications page
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Network or transport failure while fetching the document
    #[error("Network error: {0}")]
    Network(String),

    /// Document fetch returned a non-success status
    #[error("Document fetch returned status {0}")]
    Status(u16),

    /// Document body could not be parsed as JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// A presentation region is absent from the page
    #[error("Presentation region '{0}' not found in page")]
    MissingRegion(String),

    /// The page markup could not be edited in place
    #[error("Template error: {0}")]
    Template(String),

    /// The configured base URL is not a valid URL
    #[error("Invalid base URL: {0}")]
    Url(#[from] url::ParseError),

    /// File system error reading or writing the page
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// How a render attempt concluded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The document was fetched and rendered; `items` list entries were written
    Rendered { items: usize },
    /// The fetch failed and the fallback message was written instead
    Fallback,
}

/// Renders the publications document into a [`Page`].
#[derive(Debug, Clone)]
pub struct PublicationsRenderer {
    client: HttpClient,
    document_url: Url,
}

impl PublicationsRenderer {
    /// Create a renderer fetching `assets/publications.json` under `base_url`
    pub fn new(base_url: &str) -> Result<Self, RenderError> {
        let mut base = base_url.trim_end_matches('/').to_string();
        base.push('/');
        let document_url = Url::parse(&base)?.join(DOCUMENT_PATH)?;

        Ok(Self {
            client: HttpClient::new(),
            document_url,
        })
    }

    /// The resolved document URL
    pub fn document_url(&self) -> &Url {
        &self.document_url
    }

    /// Run one render attempt against the page.
    ///
    /// Fetch failures produce [`RenderOutcome::Fallback`] rather than an
    /// error; only page-level faults (missing region, unparseable markup)
    /// surface as `Err`.
    pub async fn render_into(&self, page: &mut Page) -> Result<RenderOutcome, RenderError> {
        match self.fetch_document().await {
            Ok(document) => {
                let items = self.apply(page, &document)?;
                Ok(RenderOutcome::Rendered { items })
            }
            Err(err) => {
                tracing::error!(error = %err, url = %self.document_url, "publications fetch failed, rendering fallback");
                page.set_region_text(META_REGION, FALLBACK_MESSAGE)?;
                Ok(RenderOutcome::Fallback)
            }
        }
    }

    /// Fetch and parse the publications document, bypassing HTTP caches
    pub async fn fetch_document(&self) -> Result<PublicationsDocument, RenderError> {
        let response = self
            .client
            .get(self.document_url.as_str())
            .header("Cache-Control", "no-store")
            .header("Pragma", "no-cache")
            .send()
            .await
            .map_err(|e| RenderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RenderError::Status(response.status().as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| RenderError::Parse(e.to_string()))
    }

    /// Write the metadata line and rebuild the list region
    fn apply(&self, page: &mut Page, document: &PublicationsDocument) -> Result<usize, RenderError> {
        page.set_region_text(META_REGION, &html::meta_line(document))?;
        page.set_region_html(LIST_REGION, &html::list_items(&document.publications))?;

        let items = document
            .publications
            .iter()
            .filter(|p| p.title().is_some())
            .count();
        Ok(items)
    }
}
