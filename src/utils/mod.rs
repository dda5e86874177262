//! Utility modules.
//!
//! - [`HttpClient`]: shared HTTP client with crate defaults
//! - [`collapse_whitespace`]: normalize whitespace in text pulled from APIs

mod http;
mod text;

pub use http::HttpClient;
pub use text::collapse_whitespace;
