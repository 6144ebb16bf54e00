//! spoofmeta-mb library interface
//!
//! Exposes the ingestion-and-unification pipeline for integration testing
//! and embedding: configuration loading, dataset adapters, audio probing,
//! and metadata table output.

pub mod adapters;
pub mod config;
pub mod pipeline;
pub mod services;
