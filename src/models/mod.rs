//! Core data models for the publications document.

mod publication;

pub use publication::{Publication, PublicationsDocument, Year};
