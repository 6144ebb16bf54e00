//! # spoofmeta Common Library
//!
//! Shared contracts for the spoofmeta tools:
//! - Unified metadata row types (raw and audio-enriched)
//! - `Split` / `Label` closed enumerations
//! - Schema validation for unified metadata tables
//! - Common error types

pub mod error;
pub mod schema;

pub use error::{Error, Result};
pub use schema::{Label, MetadataRow, RawRow, Split, METADATA_COLUMNS};
