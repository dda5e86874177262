//! # pubpage
//!
//! Fetch a researcher's publications from the ORCID public API and render
//! them into an HTML list on a web page.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: The publications document and its records
//! - [`sources`]: Publication sources (ORCID public API client)
//! - [`render`]: Page rendering (document fetch, list construction, region splicing)
//! - [`utils`]: HTTP client and text helpers
//! - [`config`]: Configuration management

pub mod config;
pub mod models;
pub mod render;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use models::{Publication, PublicationsDocument};
pub use render::{Page, PublicationsRenderer};
pub use sources::OrcidClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
