//! Configuration management.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// ORCID settings for the generator
    #[serde(default)]
    pub orcid: OrcidConfig,

    /// Site settings for the renderer
    #[serde(default)]
    pub site: SiteConfig,
}

/// ORCID record settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrcidConfig {
    /// ORCID iD whose works are fetched
    #[serde(default)]
    pub id: Option<String>,
}

impl Default for OrcidConfig {
    fn default() -> Self {
        Self {
            id: std::env::var("ORCID_ID").ok().filter(|s| !s.is_empty()),
        }
    }
}

/// Site layout settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Where the generator writes the publications document
    #[serde(default = "default_document_path")]
    pub document_path: PathBuf,

    /// Base URL the renderer fetches `assets/publications.json` from
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Page template containing the `pub-meta` and `pub-list` regions
    #[serde(default = "default_template")]
    pub template: PathBuf,

    /// Where the rendered page is written; in-place over the template when unset
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            document_path: default_document_path(),
            base_url: default_base_url(),
            template: default_template(),
            output: None,
        }
    }
}

fn default_document_path() -> PathBuf {
    PathBuf::from("assets/publications.json")
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_template() -> PathBuf {
    PathBuf::from("index.html")
}

/// Load configuration from a file, with a `PUBPAGE`-prefixed environment
/// overlay (e.g. `PUBPAGE_ORCID__ID`, `PUBPAGE_SITE__BASE_URL`)
pub fn load_config(path: &PathBuf) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path.as_path()))
        .add_source(config::Environment::with_prefix("PUBPAGE").separator("__"))
        .build()?;

    settings.try_deserialize()
}

/// Look for `pubpage.toml` in the working directory
pub fn find_config_file() -> Option<PathBuf> {
    let candidate = PathBuf::from("pubpage.toml");
    candidate.is_file().then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(
            config.site.document_path,
            PathBuf::from("assets/publications.json")
        );
        assert_eq!(config.site.base_url, "http://localhost:8000");
        assert!(config.site.output.is_none());
    }

    #[test]
    fn test_config_parses_from_toml() {
        let config: Config = toml::from_str(
            r#"
            [orcid]
            id = "0000-0002-1825-0097"

            [site]
            base_url = "https://example.test"
            template = "site/index.html"
            "#,
        )
        .unwrap();

        assert_eq!(config.orcid.id.as_deref(), Some("0000-0002-1825-0097"));
        assert_eq!(config.site.base_url, "https://example.test");
        assert_eq!(config.site.template, PathBuf::from("site/index.html"));
    }
}
