//! Unification pipeline
//!
//! Single entry point that turns a dataset configuration into a validated
//! collection of unified metadata rows: adapter dispatch, audio-metric
//! enrichment, schema validation, then a sampled path existence check.
//! Probing must precede validation (`sr` and `duration_sec` are required
//! fields); the existence check runs last and covers only a fixed-size
//! leading sample, not the whole dataset.

use crate::adapters;
use crate::services::audio_probe;
use spoofmeta_common::schema::{self, MetadataRow, RawRow};
use spoofmeta_common::{Error, Result};
use std::path::Path;
use tracing::{debug, info};

/// Number of leading rows whose paths are checked for existence.
const EXISTENCE_SAMPLE_SIZE: usize = 20;

/// Build and validate unified metadata rows from a dataset configuration.
pub fn build_metadata(config: &serde_yaml::Value) -> Result<Vec<MetadataRow>> {
    let raw_rows = adapters::build_rows(config)?;
    info!(rows = raw_rows.len(), "adapter produced raw rows");

    let rows = attach_audio_info(raw_rows)?;
    schema::validate_rows(&rows)?;
    check_sample_paths_exist(&rows, EXISTENCE_SAMPLE_SIZE)?;

    Ok(rows)
}

/// Probe every row's audio file and rebuild it with `sr` and `duration_sec`
/// attached.
fn attach_audio_info(raw_rows: Vec<RawRow>) -> Result<Vec<MetadataRow>> {
    raw_rows
        .into_iter()
        .map(|row| {
            let info = audio_probe::probe(Path::new(&row.path))?;
            Ok(row.with_audio(info.sample_rate, info.duration_sec))
        })
        .collect()
}

/// Check that the paths of the first `sample_size` rows exist on disk.
/// Fails with the complete list of missing paths within the sample.
fn check_sample_paths_exist(rows: &[MetadataRow], sample_size: usize) -> Result<()> {
    let missing: Vec<String> = rows
        .iter()
        .take(sample_size)
        .filter(|row| !Path::new(&row.path).exists())
        .map(|row| row.path.clone())
        .collect();

    if !missing.is_empty() {
        return Err(Error::MissingAudio(missing));
    }

    debug!(
        checked = rows.len().min(sample_size),
        "existence sample verified"
    );
    Ok(())
}
